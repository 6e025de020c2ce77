use std::fmt::Display;

use chrono::{Datelike, NaiveDateTime};

/// The seven days of the week, Monday first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DayCode {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayCode {
    pub const ALL: [DayCode; 7] = [
        DayCode::Mon,
        DayCode::Tue,
        DayCode::Wed,
        DayCode::Thu,
        DayCode::Fri,
        DayCode::Sat,
        DayCode::Sun,
    ];

    /// Monday = 0 .. Sunday = 6
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    pub fn succ(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn code(self) -> &'static str {
        match self {
            DayCode::Mon => "mon",
            DayCode::Tue => "tue",
            DayCode::Wed => "wed",
            DayCode::Thu => "thu",
            DayCode::Fri => "fri",
            DayCode::Sat => "sat",
            DayCode::Sun => "sun",
        }
    }

    pub fn from_datetime(timestamp: &NaiveDateTime) -> Self {
        let weekday = timestamp.weekday().number_from_monday() - 1;
        Self::from_index(weekday as usize)
    }

    /// Walks forward from `start` until `end`, both included.
    /// `Sat..=Tue` wraps over the end of the week.
    pub fn cycle_inclusive(start: DayCode, end: DayCode) -> Vec<DayCode> {
        let mut days = vec![start];
        let mut current = start;
        while current != end {
            current = current.succ();
            days.push(current);
        }
        days
    }
}

impl Display for DayCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
