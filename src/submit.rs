//! Submit port: where completed form snapshots go.
//!
//! There is no backend. `LocalSubmitter` waits out the simulated network
//! latency and writes the snapshot to the key-value store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::SubmitError;
use crate::forms::FormSnapshot;
use crate::store::KeyValueStore;

/// Acknowledgement of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitReceipt {
    pub id: Uuid,
    pub key: String,
    pub submitted_at: DateTime<Utc>,
}

#[async_trait]
pub trait SubmitPort: Send + Sync {
    /// Deliver a snapshot. `latency` is the simulated round-trip time of
    /// the form's network call.
    async fn submit(
        &self,
        snapshot: &FormSnapshot,
        latency: Duration,
    ) -> Result<SubmitReceipt, SubmitError>;
}

/// Persists snapshots locally after an optional fixed delay.
pub struct LocalSubmitter {
    store: Arc<dyn KeyValueStore>,
    simulate_latency: bool,
}

impl LocalSubmitter {
    pub fn new(store: Arc<dyn KeyValueStore>, simulate_latency: bool) -> Self {
        Self {
            store,
            simulate_latency,
        }
    }
}

#[async_trait]
impl SubmitPort for LocalSubmitter {
    async fn submit(
        &self,
        snapshot: &FormSnapshot,
        latency: Duration,
    ) -> Result<SubmitReceipt, SubmitError> {
        if self.simulate_latency && !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.store.set_json(snapshot.key, &snapshot.to_json()).await?;

        let receipt = SubmitReceipt {
            id: Uuid::new_v4(),
            key: snapshot.key.to_string(),
            submitted_at: snapshot.timestamp,
        };
        info!(key = snapshot.key, id = %receipt.id, "Form snapshot stored");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn snapshot() -> FormSnapshot {
        let mut fields = serde_json::Map::new();
        fields.insert("full_name".into(), serde_json::json!("Ada"));
        FormSnapshot::new("riskcherry-portal-admin", fields)
    }

    #[tokio::test]
    async fn writes_snapshot_with_timestamp() {
        let store = Arc::new(MemoryStore::new());
        let submitter = LocalSubmitter::new(store.clone(), false);

        let receipt = submitter
            .submit(&snapshot(), Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(receipt.key, "riskcherry-portal-admin");

        let stored = store
            .get_json("riskcherry-portal-admin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["full_name"], "Ada");
        assert!(stored["timestamp"].is_string());
    }

    #[tokio::test]
    async fn waits_for_latency_when_simulating() {
        let store = Arc::new(MemoryStore::new());
        let submitter = LocalSubmitter::new(store, true);

        let start = std::time::Instant::now();
        submitter
            .submit(&snapshot(), Duration::from_millis(25))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(25));
    }
}
