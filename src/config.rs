use crate::playback::Boundary;
use crate::validator::Policy;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub validation: Policy,
    pub playback: Boundary,
}
