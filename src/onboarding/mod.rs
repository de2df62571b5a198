//! Onboarding flow: the two tracks, the selector between them and the
//! per-track step state machine.
//!
//! Legal & Commercial must be finished before Lab Onboarding unlocks. Each
//! track is a fixed list of steps moving `pending -> in-progress ->
//! completed`; the manager owns the session and routes submissions.

pub mod manager;
pub mod selector;
pub mod step;
pub mod track;
pub mod tracker;

pub use manager::{OnboardingManager, SubmitOutcome, View};
pub use selector::{SectionSelector, TrackCard};
pub use step::{OnboardingStep, StatusTone, StepId, StepStatus};
pub use track::Track;
pub use tracker::{Completion, Progress, Selection, StepTracker, TrackView};
