use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use super::clock_time::ClockTime;

/// One opening window within a single day. Stored intervals never wrap past
/// midnight, `opening <= closing` always holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Interval(ClockTime, ClockTime);

impl Interval {
    /// Returns `None` for a window that would cross midnight; those have to be
    /// split by the caller first.
    pub fn new(opening: ClockTime, closing: ClockTime) -> Option<Self> {
        if closing < opening {
            return None;
        }
        Some(Self(opening, closing))
    }

    /// `opening..=23:59`
    pub fn until_end_of_day(opening: ClockTime) -> Self {
        Self(opening, ClockTime::END_OF_DAY)
    }

    /// `00:00..=closing`
    pub fn from_midnight(closing: ClockTime) -> Self {
        Self(ClockTime::MIDNIGHT, closing)
    }

    pub fn opening(&self) -> ClockTime {
        self.0
    }

    pub fn closing(&self) -> ClockTime {
        self.1
    }

    /// Both ends inclusive, at the precision of `time`: a window closing at
    /// 14:00 is closed at 14:00:45. A window closing at 23:59 runs to the end
    /// of the day, where the following day's `00:00` interval takes over.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let seconds = time.num_seconds_from_midnight();
        if seconds < self.opening().seconds_from_midnight() {
            return false;
        }
        if self.closing() == ClockTime::END_OF_DAY {
            return true;
        }
        let closing = self.closing().seconds_from_midnight();
        seconds < closing || (seconds == closing && time.nanosecond() == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u8, minute: u8) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    #[test]
    fn refuses_wrapping_window() {
        assert!(Interval::new(t(22, 0), t(1, 0)).is_none());
        assert!(Interval::new(t(9, 0), t(9, 0)).is_some());
    }

    fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn contains_is_inclusive() {
        let interval = Interval::new(t(11, 0), t(14, 0)).unwrap();
        assert!(interval.contains(at(11, 0, 0)));
        assert!(interval.contains(at(14, 0, 0)));
        assert!(!interval.contains(at(14, 1, 0)));
        assert!(!interval.contains(at(10, 59, 59)));
    }

    #[test]
    fn closing_minute_is_not_stretched() {
        let interval = Interval::new(t(11, 0), t(14, 0)).unwrap();
        assert!(interval.contains(at(13, 59, 59)));
        assert!(!interval.contains(at(14, 0, 45)));
        assert!(!interval.contains(NaiveTime::from_hms_milli_opt(14, 0, 0, 500).unwrap()));
    }

    #[test]
    fn end_of_day_covers_last_minute() {
        let interval = Interval::until_end_of_day(t(22, 0));
        assert_eq!(interval.opening(), t(22, 0));
        assert_eq!(interval.closing(), ClockTime::END_OF_DAY);
        assert!(interval.contains(at(23, 59, 45)));
        assert!(!interval.contains(at(21, 59, 59)));

        let after_midnight = Interval::from_midnight(t(1, 0));
        assert_eq!(after_midnight.opening(), ClockTime::MIDNIGHT);
        assert!(after_midnight.contains(at(0, 0, 0)));
        assert!(!after_midnight.contains(at(1, 0, 1)));
    }

    #[test]
    fn serializes_as_pair() {
        let interval = Interval::until_end_of_day(t(22, 0));
        assert_eq!(
            serde_json::to_string(&interval).unwrap(),
            "[\"22:00\",\"23:59\"]"
        );
    }
}
