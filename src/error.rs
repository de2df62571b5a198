//! Error types for the onboarding wizard.

use crate::onboarding::step::{StepId, StepStatus};
use crate::onboarding::track::Track;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Access error: {0}")]
    Gate(#[from] GateError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("{}: {}", .0.title(), .0)]
    Validation(#[from] ValidationError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    #[error("{0}")]
    Command(#[from] CommandError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Key-value store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Message shown when the access code does not match.
pub const INVALID_TOKEN_MESSAGE: &str =
    "Invalid access token. Please check with your RiskCherry representative.";

/// Access gate errors.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("An access token is required")]
    EmptyToken,

    #[error("Invalid access token. Please check with your RiskCherry representative.")]
    InvalidToken,

    #[error("Not authenticated: enter your access token first")]
    NotAuthenticated,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by the section selector and step tracker.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("{track} is locked. Complete Legal & Commercial Onboarding first")]
    TrackLocked { track: Track },

    #[error("No onboarding track is open")]
    NoActiveTrack,

    #[error("Step {step} is not part of {track}")]
    StepNotInTrack { step: StepId, track: Track },

    #[error("No step is open")]
    NoOpenStep,

    #[error("Submission is for step {got}, but step {expected} is open")]
    StepMismatch { expected: StepId, got: StepId },

    #[error("Step {step} cannot move from {from} to {to}")]
    InvalidTransition {
        step: StepId,
        from: StepStatus,
        to: StepStatus,
    },

    #[error("A submission is already in progress")]
    SubmissionInFlight,
}

/// Form validation failures, surfaced to the user as a transient notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Please enter a valid {field}")]
    InvalidEmail { field: &'static str },

    #[error("At least one IP address is required")]
    NoIpAddresses,

    #[error("Invalid IP address format: {0}")]
    InvalidIp(String),

    #[error("At most {max} IP addresses can be configured")]
    TooManyIps { max: usize },

    #[error("Please select at least one {what}")]
    EmptySelection { what: &'static str },

    #[error("{value} is not a recognised {what}")]
    UnknownOption { what: &'static str, value: String },

    #[error("Please fill in all required fields.")]
    MissingInformation,

    #[error("Please download and review the Mutual NDA to continue.")]
    NdaNotReviewed,

    #[error("Please review and accept all agreements to continue.")]
    AgreementsNotAccepted,

    #[error("The Master Service Agreement must be downloaded before it can be accepted")]
    MsaNotDownloaded,

    #[error("{remaining} required document(s) still need to be downloaded")]
    RequiredDocumentsMissing { remaining: usize },

    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    #[error("Please select both a date and time for your demo call")]
    BookingIncomplete,

    #[error("{0} is not available: choose a weekday from today onwards")]
    UnavailableDate(chrono::NaiveDate),

    #[error("{0} is not an available time slot")]
    UnavailableSlot(String),
}

impl ValidationError {
    /// Notification title paired with the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingInformation => "Missing Information",
            Self::NdaNotReviewed => "NDA Requirements",
            Self::AgreementsNotAccepted | Self::MsaNotDownloaded => "Agreement Required",
            _ => "Validation Error",
        }
    }
}

/// Errors from the submit port.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Submission of {key} was rejected: {reason}")]
    Rejected { key: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Terminal command errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type 'help' for the list of commands")]
    Unknown(String),

    #[error("{command} needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("Invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },

    #[error("Could not read form body: {0}")]
    InvalidBody(String),

    #[error("Documents can only be downloaded while the documents step is open")]
    DocumentsNotOpen,
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
