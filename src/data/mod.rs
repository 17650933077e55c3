//! Core data model for the vendor availability engine
//!
//! This module contains the types shared across the API client, the vendor
//! cache, and the availability/kiosk layers: opaque vendor and item hashes,
//! the character scope a request runs under, and the immutable vendor
//! snapshot returned by the upstream platform.

pub mod vendors;

pub use vendors::{
    is_blacklisted, kiosk_by_slug, KioskVendor, KIOSK_VENDORS, VENDOR_IDENTIFIER_BLACKLIST,
};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout the platform uses for `nextRefreshDate` values.
///
/// The upstream service emits second-precision UTC instants with a literal
/// `Z` suffix and no fractional seconds.
pub const REFRESH_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Opaque identifier for a vendor.
///
/// Stable identity key: the same vendor keeps the same hash across snapshot
/// refreshes, which is what makes it usable as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorHash(pub u32);

impl fmt::Display for VendorHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque identifier for an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemHash(pub u32);

impl fmt::Display for ItemHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The account/character scope a vendor request is issued under.
///
/// Vendor inventories are assumed identical across characters at a given
/// time, so the cache never keys on any of these fields; they only shape
/// the upstream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterContext {
    /// Platform membership type (console/PC ecosystem discriminator)
    pub membership_type: i32,
    /// Account-level membership identifier
    pub membership_id: String,
    /// Character identifier within the account
    pub character_id: String,
}

/// Whether a prerequisite condition for obtaining an item is satisfied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockStatus {
    /// True when the prerequisite game state is met
    pub is_set: bool,
}

/// Wire-level reference to the item a sale line points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRef {
    pub item_hash: ItemHash,
}

/// One line of a vendor's current offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    /// The item on offer
    pub item: SaleItemRef,
    /// Indexes into the vendor definition's failure-string list, one per
    /// reason the item cannot currently be acquired
    #[serde(default)]
    pub failure_indexes: Vec<usize>,
    /// Prerequisite flags for obtaining the item
    #[serde(default)]
    pub unlock_statuses: Vec<UnlockStatus>,
}

impl SaleItem {
    /// Returns the hash of the item on offer.
    pub fn item_hash(&self) -> ItemHash {
        self.item.item_hash
    }
}

/// A titled group of sale items, in upstream presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemCategory {
    pub category_title: String,
    #[serde(default)]
    pub sale_items: Vec<SaleItem>,
}

/// The full sale listing for one vendor at one point in time.
///
/// Immutable once fetched. A snapshot is superseded wholesale when the
/// server-declared refresh instant passes; it is never patched in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSnapshot {
    pub vendor_hash: VendorHash,
    /// Server-declared instant after which this snapshot is stale, in
    /// [`REFRESH_DATE_FORMAT`] layout
    pub next_refresh_date: String,
    #[serde(default)]
    pub sale_item_categories: Vec<SaleItemCategory>,
}

impl VendorSnapshot {
    /// Parses the server-declared refresh instant.
    ///
    /// The snapshot cannot be trusted without a known freshness horizon, so
    /// callers treat a parse failure as fatal for the fetch that produced it.
    pub fn refreshes_at(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(&self.next_refresh_date, REFRESH_DATE_FORMAT)
            .map(|dt| dt.and_utc())
    }

    /// Iterates every item hash currently on sale, across all categories.
    pub fn sale_item_hashes(&self) -> impl Iterator<Item = ItemHash> + '_ {
        self.sale_item_categories
            .iter()
            .flat_map(|category| category.sale_items.iter())
            .map(SaleItem::item_hash)
    }
}

/// Summary of every vendor currently known for a character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorsSummary {
    #[serde(default)]
    pub vendors: Vec<VendorSummaryEntry>,
}

/// One vendor row from the all-vendors summary endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummaryEntry {
    pub vendor_hash: VendorHash,
    /// Disabled vendors have no inventory worth querying
    pub enabled: bool,
}
