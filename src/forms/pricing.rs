//! Pricing questionnaire.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::OnboardingForm;
use super::validation::is_blank;
use crate::error::ValidationError;
use crate::store::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessModel {
    B2b,
    B2c,
    B2b2c,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationTimeline {
    /// Within 1 month.
    Immediate,
    /// 1-3 months.
    Short,
    /// 3-6 months.
    Medium,
    /// 6+ months.
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under-10k")]
    Under10k,
    #[serde(rename = "10k-50k")]
    From10kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "over-100k")]
    Over100k,
    #[serde(rename = "discuss")]
    ToBeDiscussed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingQuestionsForm {
    /// Approximate tests/transactions per month, free text.
    pub expected_volume: String,
    pub business_model: Option<BusinessModel>,
    pub integration_timeline: Option<IntegrationTimeline>,
    pub budget_range: Option<BudgetRange>,
    pub compliance_needs: String,
    pub specific_requirements: String,
}

impl OnboardingForm for PricingQuestionsForm {
    const KEY: &'static str = keys::PRICING_QUESTIONS;
    const LATENCY: Duration = Duration::from_millis(1500);

    fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.expected_volume)
            || self.business_model.is_none()
            || self.integration_timeline.is_none()
        {
            return Err(ValidationError::MissingInformation);
        }
        Ok(())
    }
}
