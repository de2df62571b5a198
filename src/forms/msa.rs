//! Master Service Agreement and draft pricing schedule.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::OnboardingForm;
use crate::error::ValidationError;
use crate::store::keys;

/// Rows of the pricing schedule.
pub const SERVICE_TYPES: [&str; 4] = ["New Game", "TOA", "Clone", "Recertification"];

/// Columns of the pricing schedule.
pub const MARKET_COLUMNS: [&str; 4] = ["Base Market", "TOA 1", "TOA 2", "TOA 3"];

/// Placeholder shown in every cell until pricing questions are processed.
pub const UNPRICED: &str = "-";

/// One row of the pricing schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingRow {
    pub service: &'static str,
    pub prices: Vec<&'static str>,
}

/// The draft schedule: every service type against every market, unpriced.
pub fn pricing_schedule() -> Vec<PricingRow> {
    SERVICE_TYPES
        .into_iter()
        .map(|service| PricingRow {
            service,
            prices: vec![UNPRICED; MARKET_COLUMNS.len()],
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterServiceAgreementForm {
    pub msa_reviewed: bool,
    pub msa_accepted: bool,
    pub pricing_accepted: bool,
}

impl MasterServiceAgreementForm {
    pub fn download_msa(&mut self) {
        self.msa_reviewed = true;
    }

    /// The acceptance checkbox only exists once the MSA has been downloaded.
    pub fn accept_msa(&mut self, accepted: bool) -> Result<(), ValidationError> {
        if !self.msa_reviewed {
            return Err(ValidationError::MsaNotDownloaded);
        }
        self.msa_accepted = accepted;
        Ok(())
    }

    pub fn accept_pricing(&mut self, accepted: bool) {
        self.pricing_accepted = accepted;
    }
}

impl OnboardingForm for MasterServiceAgreementForm {
    const KEY: &'static str = keys::MASTER_SERVICE_AGREEMENT;
    const LATENCY: Duration = Duration::from_millis(1500);

    fn validate(&self) -> Result<(), ValidationError> {
        if self.msa_reviewed && self.msa_accepted && self.pricing_accepted {
            Ok(())
        } else {
            Err(ValidationError::AgreementsNotAccepted)
        }
    }
}
