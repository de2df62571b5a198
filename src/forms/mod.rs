//! Step forms: field data collected by each onboarding step.
//!
//! A form validates locally and, when valid, turns into a `FormSnapshot`
//! that the submit port persists. Validation failures never touch tracker
//! state.

pub mod booking;
pub mod documents;
pub mod game_studio;
pub mod msa;
pub mod nda;
pub mod portal_admin;
pub mod pricing;
pub mod validation;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, StoreError, ValidationError};
use crate::onboarding::step::StepId;

pub use booking::DemoBooking;
pub use documents::DocumentLibrary;
pub use game_studio::GameStudioForm;
pub use msa::MasterServiceAgreementForm;
pub use nda::MutualNdaForm;
pub use portal_admin::PortalAdminForm;
pub use pricing::PricingQuestionsForm;

/// Submitted field values plus the submission time. Written once under
/// `key` and never read back by the wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub key: &'static str,
    pub fields: serde_json::Map<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl FormSnapshot {
    pub fn new(key: &'static str, fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            key,
            fields,
            timestamp: Utc::now(),
        }
    }

    /// Stored representation: the fields with a `timestamp` alongside.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = self.fields.clone();
        object.insert(
            "timestamp".to_string(),
            serde_json::Value::String(self.timestamp.to_rfc3339()),
        );
        serde_json::Value::Object(object)
    }
}

/// A form that can be validated and snapshotted.
pub trait OnboardingForm: Serialize {
    /// Store key the snapshot is written under.
    const KEY: &'static str;

    /// Latency of the simulated network call for this form.
    const LATENCY: Duration;

    fn validate(&self) -> std::result::Result<(), ValidationError>;

    /// Field values to persist.
    fn fields(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| StoreError::from(e).into())
    }

    /// Validate, then capture the fields.
    fn snapshot(&self) -> Result<FormSnapshot> {
        self.validate()?;
        let fields = match self.fields()? {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        Ok(FormSnapshot::new(Self::KEY, fields))
    }
}

/// Completed form for whichever step is open.
#[derive(Debug, Clone)]
pub enum StepSubmission {
    MutualNda(MutualNdaForm),
    PricingQuestions(PricingQuestionsForm),
    MasterServiceAgreement(MasterServiceAgreementForm),
    Documents(DocumentLibrary),
    PortalAdmin(PortalAdminForm),
    BookDemo(DemoBooking),
}

impl StepSubmission {
    pub fn step(&self) -> StepId {
        match self {
            Self::MutualNda(_) => StepId::MutualNda,
            Self::PricingQuestions(_) => StepId::PricingQuestions,
            Self::MasterServiceAgreement(_) => StepId::MasterServiceAgreement,
            Self::Documents(_) => StepId::Documents,
            Self::PortalAdmin(_) => StepId::PortalAdmin,
            Self::BookDemo(_) => StepId::BookDemo,
        }
    }

    pub fn latency(&self) -> Duration {
        match self {
            Self::MutualNda(_) => MutualNdaForm::LATENCY,
            Self::PricingQuestions(_) => PricingQuestionsForm::LATENCY,
            Self::MasterServiceAgreement(_) => MasterServiceAgreementForm::LATENCY,
            Self::Documents(_) => DocumentLibrary::LATENCY,
            Self::PortalAdmin(_) => PortalAdminForm::LATENCY,
            Self::BookDemo(_) => DemoBooking::LATENCY,
        }
    }

    pub fn snapshot(&self) -> Result<FormSnapshot> {
        match self {
            Self::MutualNda(form) => form.snapshot(),
            Self::PricingQuestions(form) => form.snapshot(),
            Self::MasterServiceAgreement(form) => form.snapshot(),
            Self::Documents(form) => form.snapshot(),
            Self::PortalAdmin(form) => form.snapshot(),
            Self::BookDemo(form) => form.snapshot(),
        }
    }

    /// Parse a JSON form body for `step`.
    pub fn from_json(step: StepId, body: &str) -> std::result::Result<Self, serde_json::Error> {
        Ok(match step {
            StepId::MutualNda => Self::MutualNda(serde_json::from_str(body)?),
            StepId::PricingQuestions => Self::PricingQuestions(serde_json::from_str(body)?),
            StepId::MasterServiceAgreement => {
                Self::MasterServiceAgreement(serde_json::from_str(body)?)
            }
            StepId::Documents => Self::Documents(serde_json::from_str(body)?),
            StepId::PortalAdmin => Self::PortalAdmin(serde_json::from_str(body)?),
            StepId::BookDemo => Self::BookDemo(serde_json::from_str(body)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_json_includes_timestamp() {
        let mut fields = serde_json::Map::new();
        fields.insert("name".into(), serde_json::json!("Ada"));
        let snapshot = FormSnapshot::new("k", fields);

        let json = snapshot.to_json();
        assert_eq!(json["name"], "Ada");
        let ts = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn from_json_dispatches_on_step() {
        let submission = StepSubmission::from_json(
            StepId::PortalAdmin,
            r#"{"full_name":"Ada","email":"ada@studio.com","ip_addresses":["10.0.0.1"]}"#,
        )
        .unwrap();
        assert_eq!(submission.step(), StepId::PortalAdmin);
        assert_eq!(submission.latency(), Duration::from_millis(2000));
    }

    #[test]
    fn from_json_rejects_wrong_shape() {
        assert!(StepSubmission::from_json(StepId::BookDemo, r#"{"date": 5}"#).is_err());
    }

    #[test]
    fn invalid_form_produces_no_snapshot() {
        let submission = StepSubmission::PortalAdmin(PortalAdminForm::default());
        assert!(submission.snapshot().is_err());
    }
}
