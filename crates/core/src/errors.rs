use thiserror::Error;

/// Rejections raised by the builder when the user tries to add a slot.
///
/// These never escape the builder as panics; the form layer turns them
/// into warning toasts and leaves the schedule untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least one day")]
    NoDaySelected,

    #[error("Please enter a start time")]
    MissingStartTime,

    #[error("Please enter an end time")]
    MissingEndTime,

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Start and end time cannot be the same")]
    ZeroLength,
}

/// Problems found in a stored schedule string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Schedule cannot be empty")]
    Empty,

    #[error("Invalid schedule format in entry: {0}")]
    Entry(String),

    #[error("Invalid time format: {0}")]
    Time(String),

    #[error("Invalid day '{day}' in schedule entry: {entry}")]
    UnknownDay { day: String, entry: String },

    #[error("Invalid day code: {0}")]
    InvalidDayCode(String),

    #[error("No recognizable days in schedule entry: {0}")]
    NoDays(String),

    #[error("Start and end time are identical in schedule entry: {0}")]
    ZeroLength(String),
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Transport error: {0}")]
    Transport(#[from] eyre::Report),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
