use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::{parser::builder::build_schedule, timing::schedule::DaySchedule};

/// Every known restaurant with its normalized week.
///
/// Iteration follows the order names were first seen in. Once built the
/// collection is only ever read; a reload builds a new one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Restaurants {
    entries: Vec<(String, DaySchedule)>,
    index: HashMap<String, usize>,
}

impl Restaurants {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated name keeps its original position and takes the newer schedule.
    pub fn insert(&mut self, name: String, schedule: DaySchedule) {
        match self.index.get(&name) {
            Some(&position) => {
                warn!("Restaurant '{}' listed more than once, keeping the last hours", name);
                self.entries[position].1 = schedule;
            }
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, schedule));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&DaySchedule> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DaySchedule)> {
        self.entries
            .iter()
            .map(|(name, schedule)| (name.as_str(), schedule))
    }

    /// Names of every restaurant open at `timestamp`, in collection order.
    pub fn query_open_at(&self, timestamp: &NaiveDateTime) -> Vec<String> {
        self.iter()
            .filter(|(_, schedule)| schedule.is_open(timestamp))
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// Builds every `(name, hours)` pair on its own. Hours that cannot be
/// understood at all give a restaurant that is always closed.
pub fn build_all<I>(pairs: I) -> Restaurants
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut restaurants = Restaurants::new();
    for (name, hours) in pairs {
        let schedule = build_schedule(&hours);
        if schedule.is_closed_all_week() {
            warn!("Could not find any opening hours for '{}' in '{}'", name, hours);
        }
        restaurants.insert(name, schedule);
    }
    restaurants
}
