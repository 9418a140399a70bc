use crate::caption::{Caption, CaptionId};
use crate::error::StoreError;

use serde::Serialize;

/// Captions in insertion order. The order is what the list shows and what
/// breaks ties during playback; edits keep a caption in its place.
///
/// No range checks happen here, see [`crate::validator`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CaptionStore {
    captions: Vec<Caption>,
    next_id: u64,
}

impl CaptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: Into<String>>(&mut self, text: S, start: u64, end: u64) -> CaptionId {
        let id = CaptionId(self.next_id);
        self.next_id += 1;
        self.captions.push(Caption {
            id,
            text: text.into(),
            start,
            end,
        });
        id
    }

    pub fn update_at<S: Into<String>>(
        &mut self,
        index: usize,
        text: S,
        start: u64,
        end: u64,
    ) -> Result<CaptionId, StoreError> {
        let len = self.captions.len();
        let caption = self
            .captions
            .get_mut(index)
            .ok_or(StoreError::OutOfRange { index, len })?;
        caption.text = text.into();
        caption.start = start;
        caption.end = end;
        Ok(caption.id)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Caption, StoreError> {
        if index >= self.captions.len() {
            return Err(StoreError::OutOfRange {
                index,
                len: self.captions.len(),
            });
        }
        Ok(self.captions.remove(index))
    }

    pub fn find_by_exact_range(&self, start: u64, end: u64) -> Option<usize> {
        self.captions.iter().position(|c| c.spans(start, end))
    }

    pub fn position_of(&self, id: CaptionId) -> Option<usize> {
        self.captions.iter().position(|c| c.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Caption> {
        self.captions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Caption> {
        self.captions.iter()
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Ids keep counting after a clear, so an id held from before never
    /// matches a caption added afterwards.
    pub fn clear(&mut self) {
        self.captions.clear();
    }
}
