//! The two onboarding tracks and their fixed step lists.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::step::{OnboardingStep, StepId};

/// A top-level onboarding path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    #[serde(rename = "legal-commercial")]
    LegalCommercial,
    #[serde(rename = "lab-onboarding")]
    Lab,
}

impl Track {
    pub const ALL: [Track; 2] = [Self::LegalCommercial, Self::Lab];

    pub fn id(&self) -> &'static str {
        match self {
            Self::LegalCommercial => "legal-commercial",
            Self::Lab => "lab-onboarding",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::LegalCommercial => "Legal & Commercial Onboarding",
            Self::Lab => "Lab Onboarding",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Self::LegalCommercial => "Complete legal agreements and commercial setup",
            Self::Lab => "Technical setup and certification process",
        }
    }

    /// Steps of this track, all pending, in display order.
    pub fn steps(&self) -> Vec<OnboardingStep> {
        match self {
            Self::LegalCommercial => vec![
                OnboardingStep::new(
                    StepId::MutualNda,
                    "Mutual NDA",
                    "Review and complete mutual non-disclosure agreement with entity details",
                ),
                OnboardingStep::new(
                    StepId::PricingQuestions,
                    "Pricing Questions",
                    "Complete pricing requirements and questionnaire",
                ),
                OnboardingStep::new(
                    StepId::MasterServiceAgreement,
                    "Master Service Agreement",
                    "Review master service agreement and pricing schedule",
                ),
            ],
            Self::Lab => vec![
                OnboardingStep::new(
                    StepId::Documents,
                    "Review Documentation",
                    "Download and review important onboarding documents",
                ),
                OnboardingStep::new(
                    StepId::PortalAdmin,
                    "Portal Admin Setup",
                    "Configure your portal administrator account details",
                ),
                OnboardingStep::new(
                    StepId::BookDemo,
                    "Book Demo & Intro Call",
                    "Schedule a demo session and introduction call with our team",
                ),
            ],
        }
    }

    /// Whether reaching 100% triggers the track-completion callback.
    pub fn auto_advances(&self) -> bool {
        matches!(self, Self::LegalCommercial)
    }

    /// Message shown once every step is completed.
    pub fn completion_message(&self) -> &'static str {
        match self {
            Self::LegalCommercial => {
                "Legal & Commercial onboarding completed! You can now access Lab Onboarding."
            }
            Self::Lab => "Congratulations! You've completed the onboarding process.",
        }
    }

    pub fn contact(&self) -> &'static str {
        match self {
            Self::LegalCommercial => "onboarding@riskcherry.com",
            Self::Lab => "TAM@riskcherry.com",
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Track {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legal" | "legal-commercial" => Ok(Self::LegalCommercial),
            "lab" | "lab-onboarding" => Ok(Self::Lab),
            other => Err(format!("unknown track: {other}")),
        }
    }
}
