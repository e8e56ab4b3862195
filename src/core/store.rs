//! In-memory catalog snapshot store.
//!
//! One writer ([`CatalogStore::load`]) and many readers
//! ([`CatalogStore::current`]). Each load is stamped with a request token; a
//! response only replaces the snapshot if no newer load was issued while it
//! was in flight.

use crate::api::CatalogApi;
use crate::errors::FetchError;
use crate::models::CatalogRecord;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// One immutable catalog fetch result.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Records in backend order
    pub records: Arc<[CatalogRecord]>,
    /// When the snapshot was loaded; `None` for the initial empty snapshot
    pub loaded_at: Option<DateTime<Utc>>,
    /// Token of the load that produced this snapshot (0 for the initial one)
    pub token: u64,
}

impl Snapshot {
    /// Number of records in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Result of a load that reached the backend successfully.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The response was the most recent one issued and now backs the store.
    Applied(Snapshot),
    /// A newer load was issued while this one was in flight; the response was dropped.
    Superseded {
        /// Token of the dropped response
        token: u64,
        /// Most recent token at the time the response arrived
        latest: u64,
    },
}

/// Holds the last successfully loaded catalog snapshot.
#[derive(Debug, Default)]
pub struct CatalogStore {
    snapshot: RwLock<Snapshot>,
    issued: AtomicU64,
}

impl CatalogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the catalog and replaces the snapshot if this is still the most
    /// recent load.
    ///
    /// A failed fetch leaves the current snapshot untouched.
    ///
    /// # Errors
    /// Returns the [`FetchError`] from the backend.
    pub async fn load<A: CatalogApi>(&self, api: &A) -> Result<LoadOutcome, FetchError> {
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Catalog load #{} issued", token);

        let records = match api.fetch_catalog().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Catalog load #{} failed: {}", token, e);
                return Err(e);
            }
        };

        let mut writer = self.snapshot.write().await;
        let latest = self.issued.load(Ordering::SeqCst);
        if token != latest {
            info!(
                "Discarding catalog load #{} ({} records); #{} is newer",
                token,
                records.len(),
                latest
            );
            return Ok(LoadOutcome::Superseded { token, latest });
        }

        *writer = Snapshot {
            records: records.into(),
            loaded_at: Some(Utc::now()),
            token,
        };
        info!(
            "Catalog snapshot #{} loaded with {} records",
            token,
            writer.len()
        );
        Ok(LoadOutcome::Applied(writer.clone()))
    }

    /// The last successfully loaded snapshot, or an empty one before the first load.
    pub async fn current(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }

    /// Number of records in the current snapshot.
    pub async fn total(&self) -> usize {
        self.snapshot.read().await.len()
    }

    /// Whether any load has ever been applied.
    pub async fn has_snapshot(&self) -> bool {
        self.snapshot.read().await.loaded_at.is_some()
    }
}
