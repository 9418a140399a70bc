use crate::caption::Caption;
use crate::store::CaptionStore;

use serde::Serialize;

/// Which end points of a caption's window count as "showing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// `start <= t <= end`
    #[default]
    Inclusive,
    /// `start <= t < end`, matching the overlap test.
    HalfOpen,
}

impl Boundary {
    pub fn contains(self, caption: &Caption, position: f64) -> bool {
        let start = caption.start() as f64;
        let end = caption.end() as f64;
        match self {
            Boundary::Inclusive => position >= start && position <= end,
            Boundary::HalfOpen => position >= start && position < end,
        }
    }
}

/// First caption in store order showing at `position`.
pub fn active_caption(store: &CaptionStore, position: f64, boundary: Boundary) -> Option<&Caption> {
    store.iter().find(|c| boundary.contains(c, position))
}

/// Overlay text at `position`, empty when nothing is showing.
pub fn active_text(store: &CaptionStore, position: f64, boundary: Boundary) -> &str {
    active_caption(store, position, boundary).map_or("", |c| c.text())
}
