//! Client Onboard: RiskCherry client onboarding wizard.

pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod gate;
pub mod onboarding;
pub mod render;
pub mod store;
pub mod submit;

pub use error::{Error, Result};
