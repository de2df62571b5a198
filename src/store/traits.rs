//! `KeyValueStore` trait: the injected replacement for browser local storage.

use async_trait::async_trait;

use crate::error::StoreError;

/// String-keyed, string-valued persistent store.
///
/// Every write is independent: there is no transactional grouping across
/// keys, and the last writer wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Returns whether anything was removed.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// Remove every key.
    async fn clear(&self) -> Result<(), StoreError>;

    /// Read `key` and parse it as JSON.
    async fn get_json(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` as JSON and store it under `key`.
    async fn set_json(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw).await
    }
}

/// Keys written by the wizard.
pub mod keys {
    /// Marker written by the access gate on success.
    pub const ACCESS_TOKEN: &str = "riskcherry-onboard-token";
    /// `"true"` once the Legal & Commercial track has been completed.
    pub const LEGAL_COMMERCIAL_COMPLETED: &str = "riskcherry-legal-commercial-completed";

    pub const MUTUAL_NDA: &str = "riskcherry-mutual-nda";
    pub const PRICING_QUESTIONS: &str = "riskcherry-pricing-questions";
    pub const MASTER_SERVICE_AGREEMENT: &str = "riskcherry-master-service-agreement";
    pub const DOCUMENTS: &str = "riskcherry-documents";
    pub const PORTAL_ADMIN: &str = "riskcherry-portal-admin";
    pub const DEMO_BOOKING: &str = "riskcherry-demo-booking";
    pub const GAME_STUDIO: &str = "riskcherry-game-studio";
}
