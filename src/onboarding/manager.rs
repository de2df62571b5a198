//! OnboardingManager: owns the session and wires the access gate, the
//! selector, the mounted step tracker and the submit port together.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{OnboardConfig, TOKEN_CHECK_LATENCY, TRACK_ADVANCE_DELAY};
use crate::error::{GateError, NavigationError, Result};
use crate::forms::{GameStudioForm, OnboardingForm, StepSubmission};
use crate::gate::AccessGate;
use crate::store::{KeyValueStore, keys};
use crate::submit::{LocalSubmitter, SubmitPort, SubmitReceipt};

use super::selector::{SectionSelector, TrackCard};
use super::step::StepId;
use super::track::Track;
use super::tracker::{Completion, Selection, StepTracker, TrackView};

/// What the user is looking at.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum View {
    /// Access code entry.
    Gate,
    /// Track cards.
    Selector { cards: Vec<TrackCard> },
    /// A mounted track; `current` is set while a step form is open.
    Track(TrackView),
}

/// Result of a successful step submission.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub receipt: SubmitReceipt,
    pub completion: Completion,
    /// Set when this submission finished its track.
    pub track_completed: Option<Track>,
}

impl SubmitOutcome {
    /// Congratulation text when the track was finished.
    pub fn message(&self) -> Option<&'static str> {
        self.track_completed.map(|track| track.completion_message())
    }
}

#[derive(Debug, Default)]
struct Session {
    authenticated: bool,
    selector: SectionSelector,
    tracker: Option<StepTracker>,
}

/// Clears the in-flight flag when the submission finishes, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> std::result::Result<Self, NavigationError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| NavigationError::SubmissionInFlight)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Coordinates the onboarding flow for a single session.
pub struct OnboardingManager {
    config: OnboardConfig,
    store: Arc<dyn KeyValueStore>,
    gate: AccessGate,
    submitter: Arc<dyn SubmitPort>,
    session: RwLock<Session>,
    submitting: AtomicBool,
}

impl OnboardingManager {
    pub fn new(
        config: OnboardConfig,
        store: Arc<dyn KeyValueStore>,
        submitter: Arc<dyn SubmitPort>,
    ) -> Self {
        let gate = AccessGate::new(
            Arc::clone(&store),
            config.access_code.clone(),
            config.latency(TOKEN_CHECK_LATENCY),
        );
        Self {
            config,
            store,
            gate,
            submitter,
            session: RwLock::new(Session::default()),
            submitting: AtomicBool::new(false),
        }
    }

    /// Manager whose submissions are written straight to `store`.
    pub fn local(config: OnboardConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let submitter = Arc::new(LocalSubmitter::new(
            Arc::clone(&store),
            config.simulate_latency,
        ));
        Self::new(config, store, submitter)
    }

    /// Rebuild the session from the store: a stored access marker skips the
    /// gate, and the completion flag decides whether Lab is unlocked. Any
    /// mounted track is dropped.
    pub async fn restore(&self) -> Result<View> {
        let authenticated = self.gate.is_authenticated().await?;
        let legal_completed = self.legal_commercial_flag().await?;

        let mut session = self.session.write().await;
        *session = Session {
            authenticated,
            selector: SectionSelector::new(legal_completed),
            tracker: None,
        };
        debug!(authenticated, legal_completed, "Session restored");
        Ok(Self::render(&session))
    }

    /// Same as a page reload: re-read everything from the store.
    pub async fn reload(&self) -> Result<View> {
        self.restore().await
    }

    /// Submit an access code. On success the selector is shown.
    pub async fn unlock(&self, token: &str) -> Result<View> {
        self.gate.validate(token).await?;
        let legal_completed = self.legal_commercial_flag().await?;

        let mut session = self.session.write().await;
        session.authenticated = true;
        session.selector = SectionSelector::new(legal_completed);
        session.tracker = None;
        Ok(Self::render(&session))
    }

    /// Forget the access marker and return to the gate.
    pub async fn logout(&self) -> Result<View> {
        self.gate.revoke().await?;
        let mut session = self.session.write().await;
        *session = Session::default();
        Ok(View::Gate)
    }

    pub async fn view(&self) -> View {
        Self::render(&*self.session.read().await)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.authenticated
    }

    pub async fn legal_commercial_completed(&self) -> bool {
        self.session.read().await.selector.legal_commercial_completed()
    }

    /// Enter a track from the selector. The track is mounted with every
    /// step pending.
    pub async fn enter_track(&self, track: Track) -> Result<TrackView> {
        let mut session = self.session.write().await;
        Self::require_auth(&session)?;
        self.ensure_idle()?;
        session.selector.enter(track)?;
        let tracker = StepTracker::new(track);
        let view = tracker.view();
        session.tracker = Some(tracker);
        info!(track = track.id(), "Entered track");
        Ok(view)
    }

    /// Leave the mounted track and return to the selector.
    pub async fn leave_track(&self) -> Result<Option<Track>> {
        let mut session = self.session.write().await;
        self.ensure_idle()?;
        session.tracker = None;
        Ok(session.selector.back())
    }

    pub async fn select_step(&self, step: StepId) -> Result<Selection> {
        let mut session = self.session.write().await;
        Self::require_auth(&session)?;
        self.ensure_idle()?;
        let tracker = session
            .tracker
            .as_mut()
            .ok_or(NavigationError::NoActiveTrack)?;
        Ok(tracker.select(step)?)
    }

    /// Close the open step form (the step's `back`). The step keeps its
    /// status.
    pub async fn close_step(&self) -> Result<StepId> {
        let mut session = self.session.write().await;
        self.ensure_idle()?;
        let tracker = session
            .tracker
            .as_mut()
            .ok_or(NavigationError::NoActiveTrack)?;
        Ok(tracker.close().ok_or(NavigationError::NoOpenStep)?)
    }

    /// Validate and submit the form of the open step, then complete it.
    ///
    /// Validation failures leave every step untouched. Navigation is refused
    /// until the submission finishes, so the open step cannot change under
    /// it. When the submission finishes Legal & Commercial, the completion
    /// flag is written after the advance delay and the session returns to
    /// the selector with Lab unlocked.
    pub async fn submit(&self, submission: StepSubmission) -> Result<SubmitOutcome> {
        let step = submission.step();
        let _in_flight = InFlight::acquire(&self.submitting)?;
        let track = {
            let session = self.session.read().await;
            Self::require_auth(&session)?;
            let tracker = session
                .tracker
                .as_ref()
                .ok_or(NavigationError::NoActiveTrack)?;
            match tracker.current_step() {
                None => return Err(NavigationError::NoOpenStep.into()),
                Some(open) if open != step => {
                    return Err(NavigationError::StepMismatch {
                        expected: open,
                        got: step,
                    }
                    .into());
                }
                Some(_) => tracker.track(),
            }
        };

        let snapshot = submission.snapshot()?;
        let receipt = self
            .submitter
            .submit(&snapshot, submission.latency())
            .await?;

        let completion = {
            let mut session = self.session.write().await;
            let tracker = session
                .tracker
                .as_mut()
                .filter(|t| t.track() == track)
                .ok_or(NavigationError::NoActiveTrack)?;
            tracker.complete(step)?
        };

        let track_completed = completion.track_completed.then_some(track);
        if let Some(track) = track_completed {
            info!(track = track.id(), "Track completed");
            if track.auto_advances() {
                self.advance_past(track).await;
            }
        }

        Ok(SubmitOutcome {
            receipt,
            completion,
            track_completed,
        })
    }

    /// Submit the standalone game studio profile. Needs an unlocked gate but
    /// no open step.
    pub async fn submit_studio_profile(&self, form: &GameStudioForm) -> Result<SubmitReceipt> {
        Self::require_auth(&*self.session.read().await)?;
        let _in_flight = InFlight::acquire(&self.submitting)?;
        let snapshot = form.snapshot()?;
        Ok(self
            .submitter
            .submit(&snapshot, GameStudioForm::LATENCY)
            .await?)
    }

    /// Wait out the advance delay, persist the completion flag and unlock Lab.
    async fn advance_past(&self, track: Track) {
        let delay = self.config.latency(TRACK_ADVANCE_DELAY);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Err(e) = self
            .store
            .set(keys::LEGAL_COMMERCIAL_COMPLETED, "true")
            .await
        {
            tracing::warn!("Failed to persist {} completion: {}", track.id(), e);
        }

        let mut session = self.session.write().await;
        session.selector.complete_legal_commercial();
        session.tracker = None;
        info!("Lab onboarding unlocked");
    }

    async fn legal_commercial_flag(&self) -> Result<bool> {
        let raw = self.store.get(keys::LEGAL_COMMERCIAL_COMPLETED).await?;
        Ok(raw.as_deref() == Some("true"))
    }

    /// Navigation is frozen while a submission is in flight.
    fn ensure_idle(&self) -> std::result::Result<(), NavigationError> {
        if self.submitting.load(Ordering::Acquire) {
            Err(NavigationError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }

    fn require_auth(session: &Session) -> std::result::Result<(), GateError> {
        if session.authenticated {
            Ok(())
        } else {
            Err(GateError::NotAuthenticated)
        }
    }

    fn render(session: &Session) -> View {
        if !session.authenticated {
            return View::Gate;
        }
        match &session.tracker {
            Some(tracker) => View::Track(tracker.view()),
            None => View::Selector {
                cards: session.selector.cards(),
            },
        }
    }
}
