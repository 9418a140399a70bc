//! Conversion between `MM:SS` / `HH:MM:SS` strings and whole seconds.

use std::fmt;

use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{map_res, opt};
use nom::sequence::{pair, preceded};
use nom::IResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampError {
    /// The input did not split into two or three `:`-separated parts.
    WrongShape(usize),
    /// A part had no leading digits, or the total does not fit in a `u64`.
    NotANumber,
}

/// Lenient parse: a wrong part count silently yields `Some(0)`, a part
/// without digits yields `None`. Callers must not trust a `0` result.
///
/// This is the display-side contract, the inverse of [`format_seconds`].
/// Caption submissions go through [`parse_timestamp_strict`] instead, so a
/// malformed field is never mistaken for `0:00`.
pub fn parse_timestamp(input: &str) -> Option<u64> {
    match parse_timestamp_strict(input) {
        Ok(secs) => Some(secs),
        Err(TimestampError::WrongShape(_)) => Some(0),
        Err(TimestampError::NotANumber) => None,
    }
}

/// Like [`parse_timestamp`], but reports the wrong-shape case instead of
/// folding it into zero.
pub fn parse_timestamp_strict(input: &str) -> Result<u64, TimestampError> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(TimestampError::WrongShape(parts.len()));
    }

    parts.iter().try_fold(0u64, |acc, part| {
        let (_, value) = leading_int(part).map_err(|_| TimestampError::NotANumber)?;
        acc.checked_mul(60)
            .and_then(|acc| acc.checked_add(value))
            .ok_or(TimestampError::NotANumber)
    })
}

/// Reads the leading integer of a part, skipping leading whitespace and an
/// optional `+`. Anything after the digits is ignored, so `"5s"` reads as 5.
fn leading_int(input: &str) -> IResult<&str, u64> {
    preceded(
        pair(multispace0, opt(char('+'))),
        map_res(digit1, |s: &str| s.parse::<u64>()),
    )(input)
}

/// Displays whole seconds as `M:SS`, or `H:MM:SS` from one hour on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock(pub u64);

impl fmt::Display for Clock {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let total_secs = self.0;
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        if hours > 0 {
            write!(fmt, "{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(fmt, "{}:{:02}", minutes, seconds)
        }
    }
}

pub fn format_seconds(secs: u64) -> String {
    Clock(secs).to_string()
}
