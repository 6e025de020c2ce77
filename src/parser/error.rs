use thiserror::Error;

/// Failures local to a single `/` separated segment of an hours text.
/// None of these abort a build, the segment is dropped and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid time format: '{0}'")]
    InvalidTimeFormat(String),

    #[error("Unknown day name: '{0}'")]
    UnknownDayName(String),

    #[error("Malformed segment: '{0}'")]
    MalformedSegment(String),
}
