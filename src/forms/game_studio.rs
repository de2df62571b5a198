//! Game studio profile. Standalone; not a step of either track.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::OnboardingForm;
use super::validation::{require, require_email};
use crate::error::ValidationError;
use crate::store::keys;

pub const TARGET_MARKETS: [&str; 7] = [
    "Europe",
    "North America",
    "Asia Pacific",
    "Latin America",
    "Africa",
    "Middle East",
    "Australia/Oceania",
];

pub const GAME_TYPES: [&str; 9] = [
    "Slot Games",
    "Table Games",
    "Live Casino",
    "Sports Betting",
    "Poker",
    "Bingo",
    "Lottery",
    "Virtual Sports",
    "Skill Games",
];

pub const COMPLIANCE_STANDARDS: [&str; 9] = [
    "MGA (Malta)",
    "UKGC (UK)",
    "Curacao eGaming",
    "Gibraltar",
    "ISO 27001",
    "eCOGRA",
    "iTech Labs",
    "GLI",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    Small,
    #[serde(rename = "51-200")]
    Medium,
    #[serde(rename = "201-500")]
    Large,
    #[serde(rename = "500+")]
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Operator,
    Developer,
    Provider,
    Platform,
    Aggregator,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStudioForm {
    pub studio_name: String,
    pub website: String,
    pub founded_year: String,
    pub company_size: Option<CompanySize>,
    pub business_type: Option<BusinessType>,
    pub primary_contact: String,
    pub contact_email: String,
    pub target_markets: Vec<String>,
    pub game_types: Vec<String>,
    pub monthly_volume: String,
    pub compliance_requirements: Vec<String>,
    pub current_certifications: String,
    pub project_timeline: String,
    pub technical_requirements: String,
    pub additional_info: String,
}

impl GameStudioForm {
    /// Toggle a checkbox value in one of the multi-select lists.
    pub fn toggle(list: &mut Vec<String>, value: &str) {
        if let Some(pos) = list.iter().position(|v| v == value) {
            list.remove(pos);
        } else {
            list.push(value.to_string());
        }
    }
}

fn check_options(
    selected: &[String],
    allowed: &[&str],
    what: &'static str,
) -> Result<(), ValidationError> {
    match selected.iter().find(|s| !allowed.contains(&s.as_str())) {
        Some(unknown) => Err(ValidationError::UnknownOption {
            what,
            value: unknown.clone(),
        }),
        None => Ok(()),
    }
}

impl OnboardingForm for GameStudioForm {
    const KEY: &'static str = keys::GAME_STUDIO;
    const LATENCY: Duration = Duration::from_millis(2000);

    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.studio_name, "Studio name")?;
        require_email(&self.contact_email, "contact email")?;
        if self.target_markets.is_empty() {
            return Err(ValidationError::EmptySelection {
                what: "target market",
            });
        }
        if self.game_types.is_empty() {
            return Err(ValidationError::EmptySelection { what: "game type" });
        }
        check_options(&self.target_markets, &TARGET_MARKETS, "target market")?;
        check_options(&self.game_types, &GAME_TYPES, "game type")?;
        check_options(
            &self.compliance_requirements,
            &COMPLIANCE_STANDARDS,
            "compliance standard",
        )
    }
}
