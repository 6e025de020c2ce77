use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::timing::day_code::DayCode;

use super::error::ParseError;

/// Every accepted spelling of a day, lower case.
static DAY_ALIASES: Lazy<HashMap<&'static str, DayCode>> = Lazy::new(|| {
    HashMap::from([
        ("mon", DayCode::Mon),
        ("monday", DayCode::Mon),
        ("tue", DayCode::Tue),
        ("tues", DayCode::Tue),
        ("tuesday", DayCode::Tue),
        ("wed", DayCode::Wed),
        ("weds", DayCode::Wed),
        ("wednesday", DayCode::Wed),
        ("thu", DayCode::Thu),
        ("thurs", DayCode::Thu),
        ("thursday", DayCode::Thu),
        ("fri", DayCode::Fri),
        ("friday", DayCode::Fri),
        ("sat", DayCode::Sat),
        ("saturday", DayCode::Sat),
        ("sun", DayCode::Sun),
        ("sunday", DayCode::Sun),
    ])
});

pub fn resolve_day(name: &str) -> Result<DayCode, ParseError> {
    let name = name.trim();
    DAY_ALIASES
        .get(name.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| ParseError::UnknownDayName(name.to_string()))
}

/// Parses `Mon-Fri`, `Tues, Thursday` or `Sat-Tue, Thu` into day codes.
///
/// Ranges are expanded over the end of the week when needed. Duplicates are
/// kept, a day listed twice simply receives the same hours twice.
pub fn parse_days(text: &str) -> Result<Vec<DayCode>, ParseError> {
    let mut days = Vec::new();
    for token in text.split(',').map(str::trim) {
        match token.split_once('-') {
            Some((start, end)) => {
                let start = resolve_day(start)?;
                let end = resolve_day(end)?;
                days.extend(DayCode::cycle_inclusive(start, end));
            }
            None => days.push(resolve_day(token)?),
        }
    }
    Ok(days)
}
