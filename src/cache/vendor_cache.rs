//! Double-checked-locking snapshot store keyed by vendor hash

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::api::ApiError;
use crate::data::{VendorHash, VendorSnapshot};

/// Errors that can occur while refreshing a cached vendor snapshot.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The upstream fetch for the vendor failed after retries
    #[error("vendor fetch failed: {0}")]
    Fetch(#[from] ApiError),

    /// The fetched snapshot carried an unparseable refresh instant, so it
    /// cannot be trusted or cached
    #[error("invalid refresh date {value:?}: {source}")]
    InvalidRefreshDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// One cached snapshot plus its parsed expiry instant.
///
/// Entries are replaced wholesale on refresh; readers hold an `Arc` to the
/// snapshot they observed, so a replacement never tears an in-progress read.
#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: Arc<VendorSnapshot>,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Concurrency-safe vendor snapshot cache.
///
/// Keyed by vendor hash alone: vendor inventories are assumed identical for
/// every account at a given time, so one process-wide instance is shared by
/// all callers regardless of which character triggered the fetch. The
/// instance is constructed explicitly and injected into the components that
/// need it; there is no global.
#[derive(Debug, Default)]
pub struct VendorCache {
    entries: RwLock<HashMap<VendorHash, CacheEntry>>,
}

impl VendorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached snapshot for `vendor_hash`, fetching it if the
    /// entry is missing or past its server-declared refresh instant.
    ///
    /// The fast path takes only the shared lock. On a miss the caller
    /// upgrades to the exclusive lock, re-checks (a concurrent caller may
    /// have refreshed the entry while the lock was being upgraded), and
    /// only then invokes `fetch`. The exclusive lock is held across the
    /// fetch, so concurrent callers for the same vendor wait for the
    /// in-flight fetch instead of issuing their own.
    ///
    /// A failed fetch leaves the entry unset; the error goes to the caller
    /// that performed the fetch and the next `get` retries from scratch.
    pub async fn get<F, Fut>(
        &self,
        vendor_hash: VendorHash,
        fetch: F,
    ) -> Result<Arc<VendorSnapshot>, CacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<VendorSnapshot, ApiError>>,
    {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&vendor_hash) {
                if entry.is_fresh(Utc::now()) {
                    return Ok(Arc::clone(&entry.snapshot));
                }
            }
        }

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(&vendor_hash) {
            if entry.is_fresh(Utc::now()) {
                return Ok(Arc::clone(&entry.snapshot));
            }
        }

        info!(%vendor_hash, "refreshing vendor snapshot");
        let snapshot = Arc::new(fetch().await?);
        let expires_at =
            snapshot
                .refreshes_at()
                .map_err(|source| CacheError::InvalidRefreshDate {
                    value: snapshot.next_refresh_date.clone(),
                    source,
                })?;
        debug!(%vendor_hash, %expires_at, "vendor snapshot cached");

        entries.insert(
            vendor_hash,
            CacheEntry {
                snapshot: Arc::clone(&snapshot),
                expires_at,
            },
        );
        Ok(snapshot)
    }

    /// Number of vendors currently held, fresh or stale.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}
