use tracing::warn;

use super::error::ParseError;

/// One `/` separated clause of an hours text, still as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    pub days: String,
    pub opening: String,
    pub closing: String,
}

/// Index of the token the time range starts at.
///
/// That is the first token mentioning am/pm, or the one before it when the
/// hour was written apart from the meridiem (`11 am` instead of `11am`).
fn time_boundary(words: &[&str]) -> Option<usize> {
    let index = words.iter().position(|word| {
        let word = word.to_lowercase();
        word.contains("am") || word.contains("pm")
    })?;
    if index > 0 {
        let previous = words[index - 1];
        if previous.chars().any(|c| c.is_ascii_digit() || c == ':') {
            return Some(index - 1);
        }
    }
    Some(index)
}

pub fn split_segment(segment: &str) -> Result<RawSegment, ParseError> {
    let malformed = || ParseError::MalformedSegment(segment.to_string());

    let words: Vec<&str> = segment.split_whitespace().collect();
    let boundary = time_boundary(&words).ok_or_else(malformed)?;
    let days = words[..boundary].join(" ");
    let times = words[boundary..].join(" ");

    let parts: Vec<&str> = times.split('-').map(str::trim).collect();
    let [opening, closing] = parts.as_slice() else {
        return Err(malformed());
    };
    Ok(RawSegment {
        days,
        opening: opening.to_string(),
        closing: closing.to_string(),
    })
}

/// Splits a full hours text on `/`, blank clauses are ignored.
pub fn split_segments(hours: &str) -> Vec<Result<RawSegment, ParseError>> {
    hours
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(split_segment)
        .collect()
}

/// Same as `split_segments` but drops and logs the clauses that could not be split.
pub fn parse_segments(hours: &str) -> Vec<RawSegment> {
    split_segments(hours)
        .into_iter()
        .filter_map(|segment| match segment {
            Ok(segment) => Some(segment),
            Err(err) => {
                warn!("Skipping segment of '{}': {}", hours, err);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(days: &str, opening: &str, closing: &str) -> RawSegment {
        RawSegment {
            days: days.to_string(),
            opening: opening.to_string(),
            closing: closing.to_string(),
        }
    }

    #[test]
    fn splits_days_from_times() {
        assert_eq!(
            split_segment("Mon, Wed, Fri 11 am - 2 pm"),
            Ok(raw("Mon, Wed, Fri", "11 am", "2 pm"))
        );
        assert_eq!(
            split_segment("Sat 11:30am - 10pm"),
            Ok(raw("Sat", "11:30am", "10pm"))
        );
    }

    #[test]
    fn absorbs_detached_hour() {
        assert_eq!(
            split_segment("Mon-Sun 11:30 AM - 9 PM"),
            Ok(raw("Mon-Sun", "11:30 AM", "9 PM"))
        );
    }

    #[test]
    fn multiple_segments() {
        assert_eq!(
            parse_segments("Tues-Fri, Sunday 11 am - 10 pm / Sat 5 pm - 11 pm"),
            vec![
                raw("Tues-Fri, Sunday", "11 am", "10 pm"),
                raw("Sat", "5 pm", "11 pm")
            ]
        );
    }

    #[test]
    fn blank_segments_are_ignored() {
        assert_eq!(split_segments(" / Mon 9 am - 5 pm //  ").len(), 1);
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn missing_meridiem_is_malformed() {
        assert_eq!(
            split_segment("Mon-Fri"),
            Err(ParseError::MalformedSegment("Mon-Fri".to_string()))
        );
        assert_eq!(
            split_segment("Mon 11 - 22"),
            Err(ParseError::MalformedSegment("Mon 11 - 22".to_string()))
        );
    }

    #[test]
    fn time_range_needs_two_parts() {
        assert!(split_segment("Mon 11 am").is_err());
        assert!(split_segment("Mon 11 am - 2 pm - 5 pm").is_err());
    }

    #[test]
    fn bad_segment_does_not_hide_the_rest() {
        let segments = split_segments("Mon-Fri / Sat 10 am - 4 pm");
        assert!(segments[0].is_err());
        assert_eq!(segments[1], Ok(raw("Sat", "10 am", "4 pm")));
        assert_eq!(
            parse_segments("Mon-Fri / Sat 10 am - 4 pm"),
            vec![raw("Sat", "10 am", "4 pm")]
        );
    }
}
