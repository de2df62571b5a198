//! Mutual NDA: entity details and document review.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::OnboardingForm;
use super::validation::is_blank;
use crate::error::ValidationError;
use crate::store::keys;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutualNdaForm {
    pub entity_name: String,
    pub registration_number: String,
    pub registration_country: String,
    pub registered_address: String,
    pub signatory_name: String,
    pub signatory_title: String,
    pub signatory_email: String,
    /// Set once the NDA document has been downloaded.
    pub nda_reviewed: bool,
    pub nda_accepted: bool,
}

impl MutualNdaForm {
    /// Record that the NDA was downloaded for review.
    pub fn download_nda(&mut self) {
        self.nda_reviewed = true;
    }

    fn required_fields(&self) -> [&str; 7] {
        [
            self.entity_name.as_str(),
            self.registration_number.as_str(),
            self.registration_country.as_str(),
            self.registered_address.as_str(),
            self.signatory_name.as_str(),
            self.signatory_title.as_str(),
            self.signatory_email.as_str(),
        ]
    }
}

impl OnboardingForm for MutualNdaForm {
    const KEY: &'static str = keys::MUTUAL_NDA;
    const LATENCY: Duration = Duration::from_millis(1500);

    fn validate(&self) -> Result<(), ValidationError> {
        if self.required_fields().iter().any(|f| is_blank(f)) {
            return Err(ValidationError::MissingInformation);
        }
        if !self.nda_reviewed {
            return Err(ValidationError::NdaNotReviewed);
        }
        Ok(())
    }
}
