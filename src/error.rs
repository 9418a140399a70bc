use std::error::Error;
use std::fmt;

/// Why a caption submission was refused. The form stays open for correction
/// in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InvalidInput,
    DurationExceeded,
    RangeOverlap,
}

impl Error for Rejection {}

impl fmt::Display for Rejection {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::InvalidInput => {
                write!(fmt, "Please fill all fields correctly to add a caption.")
            }
            Rejection::DurationExceeded => write!(
                fmt,
                "End time exceeds video duration. Please enter a valid end time."
            ),
            Rejection::RangeOverlap => write!(
                fmt,
                "The time range overlaps with an existing caption. \
                 Please choose a different time range or edit the existing caption."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    OutOfRange { index: usize, len: usize },
}

impl Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::OutOfRange { index, len } => write!(
                fmt,
                "No caption at position {} (the list holds {})",
                index + 1,
                len
            ),
        }
    }
}

#[derive(Debug)]
pub enum ScriptError {
    ParseError(String),
}

impl Error for ScriptError {}

impl fmt::Display for ScriptError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScriptError::ParseError(msg) => write!(fmt, "{}", msg),
        }
    }
}
