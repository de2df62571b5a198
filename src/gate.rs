//! Access gate: a single shared access code guarding the whole flow.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::error::GateError;
use crate::store::{KeyValueStore, keys};

/// Validates the access code and persists the success marker.
pub struct AccessGate {
    store: Arc<dyn KeyValueStore>,
    access_code: SecretString,
    check_latency: Duration,
}

impl AccessGate {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        access_code: SecretString,
        check_latency: Duration,
    ) -> Self {
        Self {
            store,
            access_code,
            check_latency,
        }
    }

    /// Whether the submit action is enabled for this input.
    pub fn can_submit(candidate: &str) -> bool {
        !candidate.trim().is_empty()
    }

    /// Check a candidate token. On match the token is persisted and later
    /// loads skip the gate; on mismatch nothing is written.
    pub async fn validate(&self, candidate: &str) -> Result<(), GateError> {
        if !Self::can_submit(candidate) {
            return Err(GateError::EmptyToken);
        }

        if !self.check_latency.is_zero() {
            tokio::time::sleep(self.check_latency).await;
        }

        if !self.matches(candidate) {
            debug!("Access token rejected");
            return Err(GateError::InvalidToken);
        }

        self.store.set(keys::ACCESS_TOKEN, candidate).await?;
        info!("Access token accepted");
        Ok(())
    }

    /// Whether a success marker is already stored.
    pub async fn is_authenticated(&self) -> Result<bool, GateError> {
        Ok(self.store.get(keys::ACCESS_TOKEN).await?.is_some())
    }

    /// Remove the success marker.
    pub async fn revoke(&self) -> Result<(), GateError> {
        self.store.remove(keys::ACCESS_TOKEN).await?;
        info!("Access token revoked");
        Ok(())
    }

    fn matches(&self, candidate: &str) -> bool {
        candidate.to_uppercase() == self.access_code.expose_secret().to_uppercase()
    }
}
