//! Cross-vendor availability aggregation
//!
//! Answers "which items are for sale right now, anywhere" for a character
//! by walking every currently enabled vendor, pulling each inventory
//! through the shared snapshot cache, and unioning the sale item hashes.
//! Kiosks, postmasters, and the bounty tracker are excluded via the fixed
//! identifier blacklist since they are not genuine sale sources.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::api::{ApiError, VendorApi};
use crate::cache::{CacheError, VendorCache};
use crate::data::vendors::is_blacklisted;
use crate::data::{CharacterContext, ItemHash};
use crate::manifest::{ManifestError, ManifestStore};

/// Errors that can occur while computing the for-sale set.
#[derive(Debug, Error)]
pub enum AvailabilityError {
    /// The all-vendors summary call failed
    #[error("all-vendors summary failed: {0}")]
    Summary(#[from] ApiError),

    /// A vendor inventory could not be fetched or cached
    #[error("vendor snapshot unavailable: {0}")]
    Snapshot(#[from] CacheError),

    /// A vendor definition lookup failed
    #[error("definition lookup failed: {0}")]
    Manifest(#[from] ManifestError),
}

/// Computes the set of item hashes currently for sale across all vendors.
///
/// Holds no state of its own; all memoization lives in the injected
/// [`VendorCache`], which is shared with every other caller in the process.
pub struct AvailabilityAggregator<A, M> {
    api: A,
    manifest: M,
    cache: Arc<VendorCache>,
}

impl<A, M> AvailabilityAggregator<A, M>
where
    A: VendorApi,
    M: ManifestStore,
{
    /// Creates an aggregator over the given API, manifest, and shared cache.
    pub fn new(api: A, manifest: M, cache: Arc<VendorCache>) -> Self {
        Self {
            api,
            manifest,
            cache,
        }
    }

    /// Returns every item hash currently on sale at any enabled,
    /// non-blacklisted vendor.
    ///
    /// The all-vendors summary is fetched fresh each call; the per-vendor
    /// inventories come through the shared cache. Iteration order over
    /// vendors does not affect the result.
    pub async fn for_sale_set(
        &self,
        token: &str,
        ctx: &CharacterContext,
    ) -> Result<HashSet<ItemHash>, AvailabilityError> {
        let summary = self.api.vendors_summary(token, ctx).await?;

        let mut for_sale = HashSet::new();
        for vendor in &summary.vendors {
            if !vendor.enabled {
                debug!(vendor_hash = %vendor.vendor_hash, "skipping disabled vendor");
                continue;
            }

            let definition = self.manifest.vendor_definition(vendor.vendor_hash)?;
            if is_blacklisted(&definition.identifier) {
                debug!(identifier = %definition.identifier, "skipping blacklisted vendor");
                continue;
            }

            let snapshot = self
                .cache
                .get(vendor.vendor_hash, || {
                    self.api.vendor_inventory(token, ctx, vendor.vendor_hash)
                })
                .await?;
            for_sale.extend(snapshot.sale_item_hashes());
        }

        Ok(for_sale)
    }
}
