use tracing::{debug, warn};

use crate::timing::{clock_time::ClockTime, day_code::DayCode, interval::Interval, schedule::DaySchedule};

use super::{
    day_list::parse_days,
    error::ParseError,
    segment::{parse_segments, RawSegment},
    time_token::parse_time,
};

/// A segment with its days and times resolved, before any midnight splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSegment {
    pub days: Vec<DayCode>,
    pub opening: ClockTime,
    pub closing: ClockTime,
}

pub fn resolve_segment(segment: &RawSegment) -> Result<ParsedSegment, ParseError> {
    Ok(ParsedSegment {
        days: parse_days(&segment.days)?,
        opening: parse_time(&segment.opening)?,
        closing: parse_time(&segment.closing)?,
    })
}

/// Adds one resolved segment to the schedule.
///
/// A window closing before it opens runs past midnight and is stored as two
/// intervals: `opening..=23:59` on the listed day and `00:00..=closing` on
/// the day after.
pub fn apply_segment(schedule: &mut DaySchedule, segment: &ParsedSegment) {
    match Interval::new(segment.opening, segment.closing) {
        Some(interval) => {
            for &day in &segment.days {
                schedule.add_interval(day, interval);
            }
        }
        None => {
            for &day in &segment.days {
                schedule.add_interval(day, Interval::until_end_of_day(segment.opening));
                schedule.add_interval(day.succ(), Interval::from_midnight(segment.closing));
            }
        }
    }
}

/// Builds a schedule from already split segments. Segments that fail to
/// resolve are logged and skipped.
pub fn build<'a, I>(segments: I) -> DaySchedule
where
    I: IntoIterator<Item = &'a RawSegment>,
{
    let mut schedule = DaySchedule::new();
    for segment in segments {
        match resolve_segment(segment) {
            Ok(parsed) => apply_segment(&mut schedule, &parsed),
            Err(err) => warn!("Dropping segment {:?}: {}", segment, err),
        }
    }
    schedule
}

/// Never fails; whatever cannot be understood stays closed.
pub fn build_schedule(hours: &str) -> DaySchedule {
    let segments = parse_segments(hours);
    let schedule = build(&segments);
    if schedule.is_closed_all_week() {
        debug!("No opening hours understood in '{}'", hours);
    }
    schedule
}
