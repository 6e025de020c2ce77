use serde::Serialize;

use crate::timing::schedule::DaySchedule;

pub const NOTHING_OPEN: &str = "No restaurants are open at that time. Please try again.";

/// Body of `/open_restaurants`.
///
/// An empty result is not an error, it is reported with a message instead.
#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum OpenRestaurantsResponse {
    Open { open_restaurants: Vec<String> },
    NoneOpen { message: String },
}

impl OpenRestaurantsResponse {
    pub fn new(open_restaurants: Vec<String>) -> Self {
        if open_restaurants.is_empty() {
            return Self::NoneOpen {
                message: NOTHING_OPEN.to_string(),
            };
        }
        Self::Open { open_restaurants }
    }
}

/// Body of `/restaurants`.
#[derive(Serialize)]
pub struct ScheduleResponse<'a> {
    name: &'a str,
    schedule: &'a DaySchedule,
}

impl<'a> ScheduleResponse<'a> {
    pub fn new(name: &'a str, schedule: &'a DaySchedule) -> Self {
        Self { name, schedule }
    }
}
