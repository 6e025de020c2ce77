use std::fmt::Display;

use serde::{Serialize, Serializer};

/// A time of day with minute resolution, no time zone attached.
///
/// Field order matters: the derived `Ord` compares hour first, then minute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };
    pub const END_OF_DAY: ClockTime = ClockTime {
        hour: 23,
        minute: 59,
    };

    /// Returns `None` when the hour or minute falls outside a 24 hour clock.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// The exact moment `HH:MM:00`.
    pub fn seconds_from_midnight(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
