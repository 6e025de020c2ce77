use once_cell::sync::Lazy;
use regex::Regex;

use crate::timing::clock_time::ClockTime;

use super::error::ParseError;

static TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?\s*(am|pm)$").unwrap());

/// Parses a 12 hour clock expression such as `11 am`, `1:30pm` or `12 AM`.
pub fn parse_time(text: &str) -> Result<ClockTime, ParseError> {
    let text = text.trim();
    let invalid = || ParseError::InvalidTimeFormat(text.to_string());

    let captures = TIME_REGEX.captures(text).ok_or_else(invalid)?;
    // The regex only lets digits through, at most two of them
    let hour: u8 = captures[1].parse().map_err(|_| invalid())?;
    let minute: u8 = match captures.get(2) {
        Some(minute) => minute.as_str().parse().map_err(|_| invalid())?,
        None => 0,
    };
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(invalid());
    }

    let pm = captures[3].eq_ignore_ascii_case("pm");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (hour, true) => hour + 12,
        (hour, false) => hour,
    };
    ClockTime::new(hour, minute).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u8, minute: u8) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    #[test]
    fn converts_twelve_hour_clock() {
        assert_eq!(parse_time("1:30 pm"), Ok(t(13, 30)));
        assert_eq!(parse_time("9:00 am"), Ok(t(9, 0)));
        assert_eq!(parse_time("12 pm"), Ok(t(12, 0)));
        assert_eq!(parse_time("12 am"), Ok(t(0, 0)));
        assert_eq!(parse_time("9 pm"), Ok(t(21, 0)));
        assert_eq!(parse_time("12:45 am"), Ok(t(0, 45)));
    }

    #[test]
    fn meridiem_spacing_and_case() {
        assert_eq!(parse_time("11am"), Ok(t(11, 0)));
        assert_eq!(parse_time("  5:15PM "), Ok(t(17, 15)));
        assert_eq!(parse_time("10 Pm"), Ok(t(22, 0)));
    }

    #[test]
    fn rejects_out_of_range() {
        for text in ["25 am", "13:60 pm", "0 am", "13 pm", "11:60 am"] {
            assert_eq!(
                parse_time(text),
                Err(ParseError::InvalidTimeFormat(text.to_string())),
                "{}",
                text
            );
        }
    }

    #[test]
    fn rejects_garbage() {
        for text in ["invalid time", "", "11", "11:5 am", "11 am tomorrow", "noon"] {
            assert!(parse_time(text).is_err(), "{}", text);
        }
    }

    #[test]
    fn every_valid_time_parses() {
        for hour in 1..=12u8 {
            for minute in 0..60u8 {
                let am = parse_time(&format!("{}:{:02} am", hour, minute)).unwrap();
                let pm = parse_time(&format!("{}:{:02} pm", hour, minute)).unwrap();
                assert_eq!(am, t(hour % 12, minute));
                assert_eq!(pm, t(hour % 12 + 12, minute));
            }
        }
    }
}
