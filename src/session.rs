//! All state behind the captioning page, driven one event at a time.

use crate::caption::{Caption, CaptionId};
use crate::config::Settings;
use crate::error::{Rejection, StoreError};
use crate::playback;
use crate::store::CaptionStore;
use crate::timecode::format_seconds;
use crate::validator::{self, Outcome, Submission};

use log::{debug, info, warn};
use serde::Serialize;

/// Pending contents of the caption form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Form {
    pub text: String,
    pub start: String,
    pub end: String,
}

impl Form {
    fn clear(&mut self) {
        self.text.clear();
        self.start.clear();
        self.end.clear();
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    settings: Settings,
    video_url: String,
    loaded: bool,
    duration: Option<f64>,
    position: Option<f64>,
    captions: CaptionStore,
    form: Form,
    editing: Option<CaptionId>,
    active_caption: String,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// A different URL drops every caption and all playback state.
    pub fn set_video_url(&mut self, url: &str) {
        if url == self.video_url {
            return;
        }
        info!("Video source changed to '{}', clearing {} caption(s)", url, self.captions.len());
        self.video_url = url.to_string();
        self.captions.clear();
        self.loaded = false;
        self.duration = None;
        self.position = None;
        self.editing = None;
        self.active_caption.clear();
    }

    /// Returns `false` when there is no URL to load.
    pub fn load_video(&mut self) -> bool {
        if self.video_url.is_empty() {
            debug!("Ignoring load request without a video URL");
            return false;
        }
        self.loaded = true;
        true
    }

    /// Playback position report from the media element. `duration` is passed
    /// along whenever the element knows it.
    pub fn time_update(&mut self, position: f64, duration: Option<f64>) {
        if !self.loaded {
            debug!("Ignoring time update at {}s, no video loaded", position);
            return;
        }
        if let Some(duration) = duration {
            self.duration = Some(duration);
        }
        self.position = Some(position);
        self.refresh_active_caption();
    }

    pub fn set_text(&mut self, text: &str) {
        self.form.text = text.to_string();
    }

    pub fn set_start(&mut self, start: &str) {
        self.form.start = start.to_string();
    }

    pub fn set_end(&mut self, end: &str) {
        self.form.end = end.to_string();
    }

    /// `Ok(None)` when no video is loaded: the form is not on the page then,
    /// so nothing is checked or stored.
    pub fn submit(&mut self) -> Result<Option<Outcome>, Rejection> {
        if !self.loaded {
            debug!("Ignoring caption submit, no video loaded");
            return Ok(None);
        }
        let form = Submission {
            text: &self.form.text,
            start: &self.form.start,
            end: &self.form.end,
        };
        let result = validator::submit(
            &mut self.captions,
            form,
            self.editing,
            self.duration,
            self.settings.validation,
        );

        match result {
            Ok(outcome) => {
                match outcome {
                    Outcome::Inserted(id) => info!("Added caption {:?}", id),
                    Outcome::Updated(id) => info!("Updated caption {:?}", id),
                }
                self.form.clear();
                self.editing = None;
                self.refresh_active_caption();
            }
            Err(rejection) => warn!("Caption refused ({:?}): {}", rejection, rejection),
        }
        result.map(Some)
    }

    /// Loads the caption at `index` into the form and makes it the edit target.
    /// `Ok(None)` when no video is loaded.
    pub fn begin_edit(&mut self, index: usize) -> Result<Option<CaptionId>, StoreError> {
        if !self.loaded {
            debug!("Ignoring edit of position {}, no video loaded", index + 1);
            return Ok(None);
        }
        let caption = self.captions.get(index).ok_or(StoreError::OutOfRange {
            index,
            len: self.captions.len(),
        })?;
        self.form = Form {
            text: caption.text().to_string(),
            start: format_seconds(caption.start()),
            end: format_seconds(caption.end()),
        };
        self.editing = Some(caption.id());
        debug!("Editing caption at position {}", index + 1);
        Ok(Some(caption.id()))
    }

    /// Removing the caption under edit leaves the form filled but ends edit
    /// mode.
    pub fn delete(&mut self, index: usize) -> Result<Caption, StoreError> {
        let removed = self.captions.remove_at(index)?;
        if self.editing == Some(removed.id()) {
            debug!("Caption under edit was deleted, leaving edit mode");
            self.editing = None;
        }
        self.refresh_active_caption();
        Ok(removed)
    }

    fn refresh_active_caption(&mut self) {
        let text = match self.position {
            Some(position) => {
                playback::active_text(&self.captions, position, self.settings.playback)
            }
            None => "",
        };
        if text != self.active_caption {
            self.active_caption = text.to_string();
        }
    }

    pub fn video_url(&self) -> &str {
        &self.video_url
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn captions(&self) -> &CaptionStore {
        &self.captions
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn active_caption(&self) -> &str {
        &self.active_caption
    }
}
