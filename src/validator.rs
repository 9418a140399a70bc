//! Gatekeeper for every caption submission.

use crate::caption::CaptionId;
use crate::error::Rejection;
use crate::store::CaptionStore;
use crate::timecode::parse_timestamp_strict;

use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Policy {
    /// Accept a start time of exactly `0:00`. Off by default, so a literal
    /// zero is refused along with malformed input.
    pub allow_zero_start: bool,
}

/// The raw form fields, exactly as typed.
#[derive(Debug, Clone, Copy)]
pub struct Submission<'a> {
    pub text: &'a str,
    pub start: &'a str,
    pub end: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted(CaptionId),
    Updated(CaptionId),
}

/// Checks `form` and applies it to `store`.
///
/// While `editing` names a caption still in the store, that caption is
/// overwritten without any overlap check. Otherwise a submission whose range
/// matches an existing caption exactly replaces it, an overlapping one is
/// refused, and anything else is appended.
pub fn submit(
    store: &mut CaptionStore,
    form: Submission,
    editing: Option<CaptionId>,
    duration: Option<f64>,
    policy: Policy,
) -> Result<Outcome, Rejection> {
    let (start, end) = check_range(form, duration, policy)?;

    if let Some(index) = editing.and_then(|id| store.position_of(id)) {
        if let Ok(id) = store.update_at(index, form.text, start, end) {
            debug!("Edited caption at position {} ({}..{})", index + 1, start, end);
            return Ok(Outcome::Updated(id));
        }
    }

    if let Some(index) = store.find_by_exact_range(start, end) {
        if let Ok(id) = store.update_at(index, form.text, start, end) {
            debug!("Replaced caption with identical range {}..{}", start, end);
            return Ok(Outcome::Updated(id));
        }
    }

    if store.iter().any(|c| c.overlaps(start, end)) {
        return Err(Rejection::RangeOverlap);
    }

    Ok(Outcome::Inserted(store.add(form.text, start, end)))
}

/// Validates the form fields alone and returns `(start, end)` in seconds.
///
/// The duration test runs first, and only fires when the end time parses
/// and a positive, finite duration is known.
pub fn check_range(
    form: Submission,
    duration: Option<f64>,
    policy: Policy,
) -> Result<(u64, u64), Rejection> {
    let start = parse_timestamp_strict(form.start);
    let end = parse_timestamp_strict(form.end);

    if let (Ok(end), Some(duration)) = (end, known_duration(duration)) {
        if end as f64 > duration {
            return Err(Rejection::DurationExceeded);
        }
    }

    let (start, end) = match (start, end) {
        (Ok(start), Ok(end)) => (start, end),
        _ => return Err(Rejection::InvalidInput),
    };
    let start_ok = start > 0 || policy.allow_zero_start;
    if form.text.is_empty() || !start_ok || start >= end {
        return Err(Rejection::InvalidInput);
    }
    Ok((start, end))
}

fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}
