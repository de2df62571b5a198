//! Section selector: routes between the two tracks and keeps Lab locked
//! until Legal & Commercial is done.

use serde::Serialize;

use crate::error::NavigationError;

use super::track::Track;

/// Entry card for one track on the selector screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackCard {
    pub track: Track,
    pub unlocked: bool,
    pub badge: &'static str,
}

/// Selector state: the persisted completion flag and the entered track.
#[derive(Debug, Clone, Default)]
pub struct SectionSelector {
    legal_commercial_completed: bool,
    current: Option<Track>,
}

impl SectionSelector {
    pub fn new(legal_commercial_completed: bool) -> Self {
        Self {
            legal_commercial_completed,
            current: None,
        }
    }

    pub fn legal_commercial_completed(&self) -> bool {
        self.legal_commercial_completed
    }

    pub fn current(&self) -> Option<Track> {
        self.current
    }

    pub fn is_unlocked(&self, track: Track) -> bool {
        match track {
            Track::LegalCommercial => true,
            Track::Lab => self.legal_commercial_completed,
        }
    }

    /// Enter a track. Fails while the track is locked.
    pub fn enter(&mut self, track: Track) -> Result<(), NavigationError> {
        if !self.is_unlocked(track) {
            return Err(NavigationError::TrackLocked { track });
        }
        self.current = Some(track);
        Ok(())
    }

    /// Leave the current track and return to the selector.
    pub fn back(&mut self) -> Option<Track> {
        self.current.take()
    }

    /// Record Legal & Commercial completion and return to the selector.
    /// There is no transition back to incomplete.
    pub fn complete_legal_commercial(&mut self) {
        self.legal_commercial_completed = true;
        if self.current == Some(Track::LegalCommercial) {
            self.current = None;
        }
    }

    pub fn cards(&self) -> Vec<TrackCard> {
        Track::ALL
            .into_iter()
            .map(|track| TrackCard {
                track,
                unlocked: self.is_unlocked(track),
                badge: self.badge(track),
            })
            .collect()
    }

    fn badge(&self, track: Track) -> &'static str {
        match (track, self.legal_commercial_completed) {
            (Track::LegalCommercial, true) => "Completed",
            (Track::LegalCommercial, false) => "Required",
            (Track::Lab, true) => "Available",
            (Track::Lab, false) => "Locked",
        }
    }
}
