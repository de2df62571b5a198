//! End-to-end tests for the onboarding flow.
//!
//! Each test drives an `OnboardingManager` over an in-memory store with
//! latency simulation off, and checks both the session views and what was
//! written to the store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Days, Utc, Weekday};
use tokio::sync::Notify;
use tokio::time::timeout;

use client_onboard::config::OnboardConfig;
use client_onboard::error::{
    GateError, NavigationError, SubmitError, ValidationError, INVALID_TOKEN_MESSAGE,
};
use client_onboard::forms::msa::MasterServiceAgreementForm;
use client_onboard::forms::pricing::{BusinessModel, IntegrationTimeline};
use client_onboard::forms::{
    DemoBooking, DocumentLibrary, FormSnapshot, MutualNdaForm, PortalAdminForm,
    PricingQuestionsForm, StepSubmission,
};
use client_onboard::onboarding::{OnboardingManager, StepId, StepStatus, Track, View};
use client_onboard::store::{KeyValueStore, MemoryStore, keys};
use client_onboard::submit::{LocalSubmitter, SubmitPort, SubmitReceipt};
use client_onboard::Error;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

fn manager(store: &Arc<MemoryStore>) -> OnboardingManager {
    OnboardingManager::local(OnboardConfig::instant(), store.clone())
}

async fn unlocked(store: &Arc<MemoryStore>) -> OnboardingManager {
    let manager = manager(store);
    manager.unlock("RC-ONBOARD-2024").await.unwrap();
    manager
}

fn nda() -> MutualNdaForm {
    let mut form = MutualNdaForm {
        entity_name: "Cherry Games Ltd".into(),
        registration_number: "C-98765".into(),
        registration_country: "Malta".into(),
        registered_address: "12 Triq il-Port, Valletta".into(),
        signatory_name: "Jordan Vella".into(),
        signatory_title: "CEO".into(),
        signatory_email: "jordan@cherry.games".into(),
        ..Default::default()
    };
    form.download_nda();
    form
}

fn pricing() -> PricingQuestionsForm {
    PricingQuestionsForm {
        expected_volume: "40 games per month".into(),
        business_model: Some(BusinessModel::B2b),
        integration_timeline: Some(IntegrationTimeline::Short),
        ..Default::default()
    }
}

fn msa() -> MasterServiceAgreementForm {
    let mut form = MasterServiceAgreementForm::default();
    form.download_msa();
    form.accept_msa(true).unwrap();
    form.accept_pricing(true);
    form
}

fn portal_admin(ips: &[&str]) -> PortalAdminForm {
    PortalAdminForm {
        full_name: "Sam Borg".into(),
        email: "sam@cherry.games".into(),
        ip_addresses: ips.iter().map(|ip| ip.to_string()).collect(),
        additional_notes: String::new(),
    }
}

fn next_weekday() -> chrono::NaiveDate {
    let mut date = Utc::now().date_naive();
    loop {
        date = date.checked_add_days(Days::new(1)).unwrap();
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return date;
        }
    }
}

async fn complete_step(manager: &OnboardingManager, submission: StepSubmission) {
    manager.select_step(submission.step()).await.unwrap();
    manager.submit(submission).await.unwrap();
}

async fn complete_legal(manager: &OnboardingManager) {
    manager.enter_track(Track::LegalCommercial).await.unwrap();
    complete_step(manager, StepSubmission::MutualNda(nda())).await;
    complete_step(manager, StepSubmission::PricingQuestions(pricing())).await;
    complete_step(manager, StepSubmission::MasterServiceAgreement(msa())).await;
}

#[tokio::test]
async fn token_is_case_insensitive_and_persisted() {
    let store = Arc::new(MemoryStore::new());
    let manager = manager(&store);

    let err = manager.unlock("RC-ONBOARD-2023").await.unwrap_err();
    assert!(err.to_string().contains(INVALID_TOKEN_MESSAGE));
    assert!(store.get(keys::ACCESS_TOKEN).await.unwrap().is_none());

    assert!(matches!(
        manager.unlock("   ").await,
        Err(Error::Gate(GateError::EmptyToken))
    ));

    let view = manager.unlock("rc-onboard-2024").await.unwrap();
    assert!(matches!(view, View::Selector { .. }));
    assert!(store.get(keys::ACCESS_TOKEN).await.unwrap().is_some());

    // A fresh session over the same store skips the gate.
    let again = OnboardingManager::local(OnboardConfig::instant(), store.clone());
    assert!(matches!(again.restore().await.unwrap(), View::Selector { .. }));
}

#[tokio::test]
async fn lab_locked_until_legal_commercial_completed() {
    timeout(TEST_TIMEOUT, async {
        let store = Arc::new(MemoryStore::new());
        let manager = unlocked(&store).await;

        assert!(matches!(
            manager.enter_track(Track::Lab).await,
            Err(Error::Navigation(NavigationError::TrackLocked { track: Track::Lab }))
        ));

        manager.enter_track(Track::LegalCommercial).await.unwrap();
        complete_step(&manager, StepSubmission::MutualNda(nda())).await;
        complete_step(&manager, StepSubmission::PricingQuestions(pricing())).await;

        let View::Track(view) = manager.view().await else {
            panic!("expected track view");
        };
        assert_eq!(view.progress.rounded_percent(), 67);
        assert_eq!(
            view.progress.message(view.track),
            "67% complete - 1 steps remaining"
        );
        assert!(store.get(keys::LEGAL_COMMERCIAL_COMPLETED).await.unwrap().is_none());

        manager
            .select_step(StepId::MasterServiceAgreement)
            .await
            .unwrap();
        let outcome = manager
            .submit(StepSubmission::MasterServiceAgreement(msa()))
            .await
            .unwrap();
        assert_eq!(outcome.track_completed, Some(Track::LegalCommercial));
        assert_eq!(
            outcome.message(),
            Some("Legal & Commercial onboarding completed! You can now access Lab Onboarding.")
        );

        assert_eq!(
            store.get(keys::LEGAL_COMMERCIAL_COMPLETED).await.unwrap(),
            Some("true".to_string())
        );
        let View::Selector { cards } = manager.view().await else {
            panic!("expected selector after completing legal");
        };
        assert!(cards.iter().all(|card| card.unlocked));
        assert_eq!(cards[0].badge, "Completed");
        assert_eq!(cards[1].badge, "Available");

        manager.enter_track(Track::Lab).await.unwrap();
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn snapshots_written_for_each_step() {
    let store = Arc::new(MemoryStore::new());
    let manager = unlocked(&store).await;
    complete_legal(&manager).await;

    let nda = store.get_json(keys::MUTUAL_NDA).await.unwrap().unwrap();
    assert_eq!(nda["entity_name"], "Cherry Games Ltd");
    assert_eq!(nda["nda_reviewed"], true);
    assert!(nda["timestamp"].is_string());

    let pricing = store.get_json(keys::PRICING_QUESTIONS).await.unwrap().unwrap();
    assert_eq!(pricing["business_model"], "b2b");
    assert_eq!(pricing["integration_timeline"], "short");

    let msa = store
        .get_json(keys::MASTER_SERVICE_AGREEMENT)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(msa["pricing_accepted"], true);
}

#[tokio::test]
async fn externally_written_flag_unlocks_lab_after_reload() {
    let store = Arc::new(MemoryStore::new());
    let manager = unlocked(&store).await;
    assert!(!manager.legal_commercial_completed().await);

    store
        .set(keys::LEGAL_COMMERCIAL_COMPLETED, "true")
        .await
        .unwrap();
    assert!(manager.enter_track(Track::Lab).await.is_err());

    manager.reload().await.unwrap();
    assert!(manager.legal_commercial_completed().await);
    manager.enter_track(Track::Lab).await.unwrap();
}

#[tokio::test]
async fn selecting_another_step_reverts_the_previous_one() {
    let store = Arc::new(MemoryStore::new());
    let manager = unlocked(&store).await;
    manager.enter_track(Track::LegalCommercial).await.unwrap();

    manager.select_step(StepId::MutualNda).await.unwrap();
    let selection = manager.select_step(StepId::PricingQuestions).await.unwrap();
    assert_eq!(selection.reverted, Some(StepId::MutualNda));

    let View::Track(view) = manager.view().await else {
        panic!("expected track view");
    };
    let in_progress: Vec<StepId> = view
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::InProgress)
        .map(|s| s.id)
        .collect();
    assert_eq!(in_progress, vec![StepId::PricingQuestions]);
    assert_eq!(view.steps[0].status, StepStatus::Pending);
}

#[tokio::test]
async fn portal_admin_rejects_bad_ip_and_keeps_step_open() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(keys::LEGAL_COMMERCIAL_COMPLETED, "true")
        .await
        .unwrap();
    let manager = unlocked(&store).await;
    manager.enter_track(Track::Lab).await.unwrap();
    manager.select_step(StepId::PortalAdmin).await.unwrap();

    let err = manager
        .submit(StepSubmission::PortalAdmin(portal_admin(&["256.1.1.1"])))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidIp(ref ip)) if ip == "256.1.1.1"
    ));
    assert!(store.get(keys::PORTAL_ADMIN).await.unwrap().is_none());

    let err = manager
        .submit(StepSubmission::PortalAdmin(portal_admin(&["", "  "])))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NoIpAddresses)
    ));

    manager
        .submit(StepSubmission::PortalAdmin(portal_admin(&[
            "192.168.1.1",
            "",
        ])))
        .await
        .unwrap();
    let stored = store.get_json(keys::PORTAL_ADMIN).await.unwrap().unwrap();
    assert_eq!(stored["ip_addresses"], serde_json::json!(["192.168.1.1"]));
}

#[tokio::test]
async fn lab_track_completes_without_touching_the_flag() {
    let store = Arc::new(MemoryStore::new());
    let manager = unlocked(&store).await;
    complete_legal(&manager).await;
    manager.enter_track(Track::Lab).await.unwrap();

    let mut library = DocumentLibrary::new();
    library.download("riskcherry-policy").unwrap();
    complete_step(&manager, StepSubmission::Documents(library)).await;
    complete_step(
        &manager,
        StepSubmission::PortalAdmin(portal_admin(&["10.0.0.1"])),
    )
    .await;

    let mut booking = DemoBooking::default();
    booking.select_date(next_weekday());
    booking.select_time("10:30");
    manager.select_step(StepId::BookDemo).await.unwrap();
    let outcome = manager
        .submit(StepSubmission::BookDemo(booking.clone()))
        .await
        .unwrap();
    assert_eq!(outcome.track_completed, Some(Track::Lab));
    assert_eq!(
        outcome.message(),
        Some("Congratulations! You've completed the onboarding process.")
    );

    // Lab stays mounted at 100%.
    let View::Track(view) = manager.view().await else {
        panic!("expected lab track view");
    };
    assert!(view.progress.is_complete());

    let stored = store.get_json(keys::DEMO_BOOKING).await.unwrap().unwrap();
    assert_eq!(stored["time"], "10:30");
    assert_eq!(
        stored["date"],
        next_weekday().format("%Y-%m-%d").to_string()
    );

    // Re-completing a completed step does not double count.
    manager.select_step(StepId::BookDemo).await.unwrap();
    let again = manager
        .submit(StepSubmission::BookDemo(booking))
        .await
        .unwrap();
    assert!(!again.completion.newly_completed);
    assert_eq!(again.completion.progress.completed, 3);
    assert_eq!(again.track_completed, None);
}

/// Submit port that blocks until released, to hold a submission in flight.
struct HeldSubmitter {
    inner: LocalSubmitter,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl SubmitPort for HeldSubmitter {
    async fn submit(
        &self,
        snapshot: &FormSnapshot,
        latency: Duration,
    ) -> Result<SubmitReceipt, SubmitError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.submit(snapshot, latency).await
    }
}

#[tokio::test]
async fn second_submission_rejected_while_first_in_flight() {
    timeout(TEST_TIMEOUT, async {
        let store = Arc::new(MemoryStore::new());
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let submitter = Arc::new(HeldSubmitter {
            inner: LocalSubmitter::new(store.clone(), false),
            entered: entered.clone(),
            release: release.clone(),
        });
        let manager = Arc::new(OnboardingManager::new(
            OnboardConfig::instant(),
            store.clone(),
            submitter,
        ));
        manager.unlock("RC-ONBOARD-2024").await.unwrap();
        manager.enter_track(Track::LegalCommercial).await.unwrap();
        manager.select_step(StepId::MutualNda).await.unwrap();

        let first = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.submit(StepSubmission::MutualNda(nda())).await })
        };
        entered.notified().await;

        assert!(matches!(
            manager.submit(StepSubmission::MutualNda(nda())).await,
            Err(Error::Navigation(NavigationError::SubmissionInFlight))
        ));

        release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert!(outcome.completion.newly_completed);
        assert!(store.get(keys::MUTUAL_NDA).await.unwrap().is_some());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn navigation_frozen_while_submission_in_flight() {
    timeout(TEST_TIMEOUT, async {
        let store = Arc::new(MemoryStore::new());
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let submitter = Arc::new(HeldSubmitter {
            inner: LocalSubmitter::new(store.clone(), false),
            entered: entered.clone(),
            release: release.clone(),
        });
        let manager = Arc::new(OnboardingManager::new(
            OnboardConfig::instant(),
            store.clone(),
            submitter,
        ));
        manager.unlock("RC-ONBOARD-2024").await.unwrap();
        manager.enter_track(Track::LegalCommercial).await.unwrap();
        manager.select_step(StepId::MutualNda).await.unwrap();

        let first = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.submit(StepSubmission::MutualNda(nda())).await })
        };
        entered.notified().await;

        assert!(matches!(
            manager.select_step(StepId::PricingQuestions).await,
            Err(Error::Navigation(NavigationError::SubmissionInFlight))
        ));
        assert!(matches!(
            manager.close_step().await,
            Err(Error::Navigation(NavigationError::SubmissionInFlight))
        ));
        assert!(matches!(
            manager.leave_track().await,
            Err(Error::Navigation(NavigationError::SubmissionInFlight))
        ));

        release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert!(outcome.completion.newly_completed);

        let View::Track(view) = manager.view().await else {
            panic!("expected track view");
        };
        assert_eq!(view.current, None);
        assert_eq!(view.steps[0].status, StepStatus::Completed);
        assert_eq!(view.steps[1].status, StepStatus::Pending);
        assert!(store.get(keys::MUTUAL_NDA).await.unwrap().is_some());

        // Navigation resumes once the submission has finished.
        manager.select_step(StepId::PricingQuestions).await.unwrap();
    })
    .await
    .expect("test timed out");
}

/// Submit port that turns every submission down.
struct RejectingSubmitter;

#[async_trait]
impl SubmitPort for RejectingSubmitter {
    async fn submit(
        &self,
        snapshot: &FormSnapshot,
        _latency: Duration,
    ) -> Result<SubmitReceipt, SubmitError> {
        Err(SubmitError::Rejected {
            key: snapshot.key.to_string(),
            reason: "service unavailable".into(),
        })
    }
}

#[tokio::test]
async fn rejected_submission_leaves_step_open() {
    let store = Arc::new(MemoryStore::new());
    let manager = OnboardingManager::new(
        OnboardConfig::instant(),
        store.clone(),
        Arc::new(RejectingSubmitter),
    );
    manager.unlock("RC-ONBOARD-2024").await.unwrap();
    manager.enter_track(Track::LegalCommercial).await.unwrap();
    manager.select_step(StepId::MutualNda).await.unwrap();

    let err = manager
        .submit(StepSubmission::MutualNda(nda()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Submit(SubmitError::Rejected { ref key, .. }) if key == keys::MUTUAL_NDA
    ));

    let View::Track(view) = manager.view().await else {
        panic!("expected track view");
    };
    assert_eq!(view.current, Some(StepId::MutualNda));
    assert_eq!(view.steps[0].status, StepStatus::InProgress);
    assert!(store.get(keys::MUTUAL_NDA).await.unwrap().is_none());

    // The in-flight flag was released, so the user can retry or move on.
    manager.select_step(StepId::PricingQuestions).await.unwrap();
}
