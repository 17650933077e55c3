//! Kiosk status assembly
//!
//! Produces the display-ready status for one vendor and character: every
//! sale item annotated with whether it is missing from the character's
//! collection and, if so, whether it can currently be bought from any
//! other vendor.

use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiError, VendorApi};
use crate::availability::{AvailabilityAggregator, AvailabilityError};
use crate::cache::VendorCache;
use crate::data::{CharacterContext, SaleItem, VendorHash};
use crate::manifest::{ManifestError, ManifestStore};

/// Host serving item icon assets.
const ASSET_BASE_URL: &str = "https://www.bungie.net";

/// Errors that can occur while assembling a kiosk status.
#[derive(Debug, Error)]
pub enum KioskError {
    /// The target vendor's inventory could not be fetched
    #[error("target vendor fetch failed: {0}")]
    Vendor(#[from] ApiError),

    /// The cross-vendor for-sale set could not be computed
    #[error("availability aggregation failed: {0}")]
    Availability(#[from] AvailabilityError),

    /// A definition lookup failed
    #[error("definition lookup failed: {0}")]
    Manifest(#[from] ManifestError),
}

/// One display row of a kiosk status.
#[derive(Debug, Clone)]
pub struct KioskItem {
    /// Item name, annotated with the acquisition failure reason when the
    /// item is missing
    pub description: String,
    /// Absolute icon URL
    pub icon: String,
    /// True when the character does not own the item
    pub missing: bool,
    /// True when the item is missing and currently buyable somewhere
    pub for_sale: bool,
}

/// A titled group of kiosk items, in upstream presentation order.
#[derive(Debug, Clone)]
pub struct KioskCategory {
    pub title: String,
    pub items: Vec<KioskItem>,
}

impl KioskCategory {
    /// True when any item in this category is missing and buyable.
    pub fn missing_and_for_sale(&self) -> bool {
        self.items.iter().any(|item| item.missing && item.for_sale)
    }
}

/// Display-ready status for one vendor and character.
#[derive(Debug, Clone)]
pub struct KioskStatus {
    /// Vendor display name
    pub title: String,
    /// Display name of the user the status was assembled for
    pub user: String,
    pub categories: Vec<KioskCategory>,
}

impl KioskStatus {
    /// True when anything in this kiosk is missing and buyable right now.
    pub fn missing_and_for_sale(&self) -> bool {
        self.categories
            .iter()
            .any(KioskCategory::missing_and_for_sale)
    }
}

/// Assembles [`KioskStatus`] values from the upstream API, the definition
/// store, and the availability aggregator.
pub struct KioskStatusAssembler<A, M> {
    api: A,
    manifest: M,
    availability: AvailabilityAggregator<A, M>,
}

impl<A, M> KioskStatusAssembler<A, M>
where
    A: VendorApi + Clone,
    M: ManifestStore + Clone,
{
    /// Creates an assembler sharing the given snapshot cache.
    pub fn new(api: A, manifest: M, cache: Arc<VendorCache>) -> Self {
        let availability = AvailabilityAggregator::new(api.clone(), manifest.clone(), cache);
        Self {
            api,
            manifest,
            availability,
        }
    }

    /// Builds the status for one target vendor and character.
    ///
    /// The target vendor's snapshot is fetched directly (always current,
    /// even if a cached copy exists) concurrently with the aggregator's
    /// for-sale set. Category and item order follow the upstream response.
    pub async fn assemble(
        &self,
        token: &str,
        ctx: &CharacterContext,
        vendor_hash: VendorHash,
        user: &str,
    ) -> Result<KioskStatus, KioskError> {
        let (snapshot, for_sale) = futures::try_join!(
            async {
                self.api
                    .vendor_inventory(token, ctx, vendor_hash)
                    .await
                    .map_err(KioskError::from)
            },
            async {
                self.availability
                    .for_sale_set(token, ctx)
                    .await
                    .map_err(KioskError::from)
            },
        )?;

        let vendor_definition = self.manifest.vendor_definition(vendor_hash)?;

        let mut categories = Vec::with_capacity(snapshot.sale_item_categories.len());
        for category in &snapshot.sale_item_categories {
            let mut items = Vec::with_capacity(category.sale_items.len());
            for sale_item in &category.sale_items {
                let item_definition = self.manifest.item_definition(sale_item.item_hash())?;

                let missing = is_missing(sale_item);
                let description = if missing {
                    annotate(
                        &item_definition.name,
                        &sale_item.failure_indexes,
                        &vendor_definition.failure_strings,
                    )
                } else {
                    item_definition.name.clone()
                };

                items.push(KioskItem {
                    description,
                    icon: format!("{ASSET_BASE_URL}{}", item_definition.icon),
                    missing,
                    for_sale: missing && for_sale.contains(&sale_item.item_hash()),
                });
            }
            categories.push(KioskCategory {
                title: category.category_title.clone(),
                items,
            });
        }

        Ok(KioskStatus {
            title: vendor_definition.name.clone(),
            user: user.to_string(),
            categories,
        })
    }
}

/// An item is missing when it has at least one acquisition failure and at
/// least one unmet prerequisite. Items with no failure indexes are owned
/// regardless of their unlock flags.
fn is_missing(sale_item: &SaleItem) -> bool {
    !sale_item.failure_indexes.is_empty()
        && sale_item
            .unlock_statuses
            .iter()
            .any(|status| !status.is_set)
}

/// Appends the first failure reason that resolves against the vendor's
/// failure-string list. Indexes that fall outside the list are skipped.
fn annotate(name: &str, failure_indexes: &[usize], failure_strings: &[String]) -> String {
    match failure_indexes
        .iter()
        .find_map(|&index| failure_strings.get(index))
    {
        Some(reason) => format!("{name}\n\n{reason}"),
        None => name.to_string(),
    }
}
