use chrono::{NaiveDateTime, NaiveTime};
use serde::{ser::SerializeMap, Serialize, Serializer};

use super::{day_code::DayCode, interval::Interval};

/// A normalized week of opening hours.
///
/// Every day is always present, an empty list means closed all day.
/// Intervals keep the order they were added in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DaySchedule {
    timings: [Vec<Interval>; 7],
}

impl DaySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_interval(&mut self, day: DayCode, interval: Interval) {
        self.timings[day.index()].push(interval);
    }

    pub fn intervals(&self, day: DayCode) -> &[Interval] {
        &self.timings[day.index()]
    }

    pub fn is_closed_all_week(&self) -> bool {
        self.timings.iter().all(|day| day.is_empty())
    }

    pub fn is_open_at(&self, day: DayCode, time: NaiveTime) -> bool {
        self.intervals(day)
            .iter()
            .any(|interval| interval.contains(time))
    }

    /// Looks only at the weekday of `timestamp`; overnight hours were already
    /// split onto the following day when the schedule was built.
    pub fn is_open(&self, timestamp: &NaiveDateTime) -> bool {
        let day = DayCode::from_datetime(timestamp);
        self.is_open_at(day, timestamp.time())
    }
}

impl Serialize for DaySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for day in DayCode::ALL {
            map.serialize_entry(day.code(), self.intervals(day))?;
        }
        map.end()
    }
}
