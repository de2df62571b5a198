//! Field-level checks shared by the step forms.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static DOTTED_QUAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("ip regex"));

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Dotted-quad IPv4 address with every octet in 0-255.
pub fn is_valid_ipv4(value: &str) -> bool {
    DOTTED_QUAD.is_match(value)
        && value
            .split('.')
            .all(|octet| octet.parse::<u16>().is_ok_and(|n| n <= 255))
}

/// Fail with `Required` when `value` is blank.
pub fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if is_blank(value) {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

/// Fail with `InvalidEmail` unless `value` looks like an address.
pub fn require_email(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if is_valid_email(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail { field })
    }
}
