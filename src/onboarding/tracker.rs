//! Step tracker: per-track state machine over the step list.
//!
//! Owns the single "current step" selection and enforces that at most one
//! step is in progress at a time.

use serde::Serialize;
use tracing::debug;

use crate::error::NavigationError;

use super::step::{OnboardingStep, StepId, StepStatus};
use super::track::Track;

/// Completion counts for a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Exact completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// Percentage rounded for display.
    pub fn rounded_percent(&self) -> u32 {
        self.percent().round() as u32
    }

    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }

    /// Status line under the progress bar.
    pub fn message(&self, track: Track) -> String {
        if self.is_complete() {
            track.completion_message().to_string()
        } else {
            format!(
                "{}% complete - {} steps remaining",
                self.rounded_percent(),
                self.remaining()
            )
        }
    }
}

/// Outcome of selecting a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub step: StepId,
    /// Step that lost its in-progress status because of this selection.
    pub reverted: Option<StepId>,
}

/// Outcome of completing a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub step: StepId,
    /// False when the step was already completed.
    pub newly_completed: bool,
    pub progress: Progress,
    /// True exactly once: on the completion that finished the track.
    pub track_completed: bool,
}

/// Read-only snapshot of a tracker for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct TrackView {
    pub track: Track,
    pub steps: Vec<OnboardingStep>,
    pub current: Option<StepId>,
    pub progress: Progress,
}

/// State machine for one mounted track.
#[derive(Debug, Clone)]
pub struct StepTracker {
    track: Track,
    steps: Vec<OnboardingStep>,
    current: Option<StepId>,
    in_progress: Option<StepId>,
    completion_reported: bool,
}

impl StepTracker {
    /// Mount a track with every step pending.
    pub fn new(track: Track) -> Self {
        Self {
            track,
            steps: track.steps(),
            current: None,
            in_progress: None,
            completion_reported: false,
        }
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn steps(&self) -> &[OnboardingStep] {
        &self.steps
    }

    /// The step whose form is open, if any.
    pub fn current_step(&self) -> Option<StepId> {
        self.current
    }

    pub fn status_of(&self, id: StepId) -> Option<StepStatus> {
        self.steps.iter().find(|s| s.id == id).map(|s| s.status)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.steps.iter().filter(|s| s.status.is_completed()).count(),
            total: self.steps.len(),
        }
    }

    pub fn view(&self) -> TrackView {
        TrackView {
            track: self.track,
            steps: self.steps.clone(),
            current: self.current,
            progress: self.progress(),
        }
    }

    /// Open a step's form.
    ///
    /// A pending step becomes in progress and any other in-progress step goes
    /// back to pending in the same transition. A completed step is re-opened
    /// for review and keeps its status.
    pub fn select(&mut self, id: StepId) -> Result<Selection, NavigationError> {
        self.index_of(id)?;

        let mut reverted = None;
        if let Some(previous) = self.in_progress.filter(|prev| *prev != id) {
            self.transition(previous, StepStatus::Pending)?;
            self.in_progress = None;
            reverted = Some(previous);
        }

        if self.status_of(id) == Some(StepStatus::Pending) {
            self.transition(id, StepStatus::InProgress)?;
            self.in_progress = Some(id);
        }

        self.current = Some(id);
        debug!(track = %self.track.id(), step = %id, ?reverted, "Step selected");
        Ok(Selection { step: id, reverted })
    }

    /// Close the open form and return to the step list. The step keeps its
    /// status.
    pub fn close(&mut self) -> Option<StepId> {
        self.current.take()
    }

    /// Mark a step completed and return to the step list.
    ///
    /// Completing an already-completed step is a no-op that still closes the
    /// form; completing a step that was never opened is rejected.
    pub fn complete(&mut self, id: StepId) -> Result<Completion, NavigationError> {
        let idx = self.index_of(id)?;

        let newly_completed = match self.steps[idx].status {
            StepStatus::Completed => false,
            _ => {
                self.transition(id, StepStatus::Completed)?;
                if self.in_progress == Some(id) {
                    self.in_progress = None;
                }
                true
            }
        };

        if self.current == Some(id) {
            self.current = None;
        }

        let progress = self.progress();
        let track_completed = progress.is_complete() && !self.completion_reported;
        if track_completed {
            self.completion_reported = true;
        }

        debug!(
            track = %self.track.id(),
            step = %id,
            newly_completed,
            completed = progress.completed,
            total = progress.total,
            "Step completed"
        );

        Ok(Completion {
            step: id,
            newly_completed,
            progress,
            track_completed,
        })
    }

    fn index_of(&self, id: StepId) -> Result<usize, NavigationError> {
        self.steps
            .iter()
            .position(|s| s.id == id)
            .ok_or(NavigationError::StepNotInTrack {
                step: id,
                track: self.track,
            })
    }

    fn transition(&mut self, id: StepId, target: StepStatus) -> Result<(), NavigationError> {
        let idx = self.index_of(id)?;
        let from = self.steps[idx].status;
        if !from.can_transition_to(target) {
            return Err(NavigationError::InvalidTransition {
                step: id,
                from,
                to: target,
            });
        }
        self.steps[idx].status = target;
        Ok(())
    }
}
