use serde::Serialize;

/// Identity assigned when a caption is created. Survives edits and the
/// removal of other captions, unlike a list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CaptionId(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    pub(crate) id: CaptionId,
    pub(crate) text: String,
    pub(crate) start: u64,
    pub(crate) end: u64,
}

impl Caption {
    pub fn id(&self) -> CaptionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Half-open intersection test: captions that merely touch do not overlap.
    pub fn overlaps(&self, start: u64, end: u64) -> bool {
        start < self.end && end > self.start
    }

    pub fn spans(&self, start: u64, end: u64) -> bool {
        self.start == start && self.end == end
    }
}
