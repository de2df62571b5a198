//! Portal administrator account and IP allow-list.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::OnboardingForm;
use super::validation::{is_valid_ipv4, require, require_email};
use crate::error::{Result, StoreError, ValidationError};
use crate::store::keys;

/// Maximum number of IP address fields.
pub const MAX_IP_ADDRESSES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalAdminForm {
    pub full_name: String,
    pub email: String,
    /// IP fields as entered; blank fields are allowed and ignored.
    pub ip_addresses: Vec<String>,
    pub additional_notes: String,
}

impl Default for PortalAdminForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            ip_addresses: vec![String::new()],
            additional_notes: String::new(),
        }
    }
}

impl PortalAdminForm {
    /// Add an empty IP field. Returns false once the limit is reached.
    pub fn add_ip_field(&mut self) -> bool {
        if self.ip_addresses.len() >= MAX_IP_ADDRESSES {
            return false;
        }
        self.ip_addresses.push(String::new());
        true
    }

    /// Remove an IP field. The last remaining field cannot be removed.
    pub fn remove_ip_field(&mut self, index: usize) -> bool {
        if self.ip_addresses.len() <= 1 || index >= self.ip_addresses.len() {
            return false;
        }
        self.ip_addresses.remove(index);
        true
    }

    pub fn set_ip(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.ip_addresses.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Non-blank IP entries, trimmed.
    pub fn configured_ips(&self) -> Vec<&str> {
        self.ip_addresses
            .iter()
            .map(|ip| ip.trim())
            .filter(|ip| !ip.is_empty())
            .collect()
    }
}

impl OnboardingForm for PortalAdminForm {
    const KEY: &'static str = keys::PORTAL_ADMIN;
    const LATENCY: Duration = Duration::from_millis(2000);

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        require(&self.full_name, "Full name")?;
        require_email(&self.email, "email address")?;

        if self.ip_addresses.len() > MAX_IP_ADDRESSES {
            return Err(ValidationError::TooManyIps {
                max: MAX_IP_ADDRESSES,
            });
        }

        let ips = self.configured_ips();
        if ips.is_empty() {
            return Err(ValidationError::NoIpAddresses);
        }
        if let Some(bad) = ips.iter().find(|ip| !is_valid_ipv4(ip)) {
            return Err(ValidationError::InvalidIp(bad.to_string()));
        }
        Ok(())
    }

    fn fields(&self) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(self).map_err(StoreError::from)?;
        value["ip_addresses"] = serde_json::json!(self.configured_ips());
        Ok(value)
    }
}
