//! Onboarding steps and their status lifecycle.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a single onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    MutualNda,
    PricingQuestions,
    MasterServiceAgreement,
    Documents,
    PortalAdmin,
    BookDemo,
}

impl StepId {
    pub const ALL: [StepId; 6] = [
        Self::MutualNda,
        Self::PricingQuestions,
        Self::MasterServiceAgreement,
        Self::Documents,
        Self::PortalAdmin,
        Self::BookDemo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MutualNda => "mutual-nda",
            Self::PricingQuestions => "pricing-questions",
            Self::MasterServiceAgreement => "master-service-agreement",
            Self::Documents => "documents",
            Self::PortalAdmin => "portal-admin",
            Self::BookDemo => "book-demo",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown step: {s}"))
    }
}

/// Status of a step within its track.
///
/// Progresses `Pending → InProgress → Completed`. An in-progress step that
/// loses the selection falls back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl StepStatus {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: StepStatus) -> bool {
        use StepStatus::*;
        matches!(
            (self, target),
            (Pending, InProgress) | (InProgress, Completed) | (InProgress, Pending)
        )
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Badge text shown next to the step.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Pending => StatusTone::Muted,
            Self::InProgress => StatusTone::Primary,
            Self::Completed => StatusTone::Accent,
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// Color role used when presenting a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Muted,
    Primary,
    Accent,
}

/// A step as shown in a track's step list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingStep {
    pub id: StepId,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
}

impl OnboardingStep {
    pub fn new(id: StepId, title: &'static str, description: &'static str) -> Self {
        Self {
            id,
            title,
            description,
            status: StepStatus::Pending,
        }
    }
}
