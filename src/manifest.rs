//! Static definition lookups for vendors and items
//!
//! The manifest is an external, read-only store of display metadata keyed
//! by hash. This module defines the interface the availability and kiosk
//! layers consume plus an in-memory implementation for tests and embedders
//! that preload definitions. Lookups are synchronous and assumed cheap; a
//! missing row is a fatal error, since no status page can be rendered
//! without its definitions.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::data::{ItemHash, VendorHash};

/// Errors from definition lookups.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no vendor definition for hash {0}")]
    MissingVendor(VendorHash),

    #[error("no item definition for hash {0}")]
    MissingItem(ItemHash),
}

/// Static metadata for a vendor.
#[derive(Debug, Clone)]
pub struct VendorDefinition {
    pub hash: VendorHash,
    /// Stable identifier string (e.g. "VENDOR_KIOSK_SHADERS"), the value
    /// the aggregator blacklist matches against
    pub identifier: String,
    /// Human-readable vendor name
    pub name: String,
    /// Human-readable reasons an item cannot be acquired, referenced by
    /// sale items through failure indexes
    pub failure_strings: Vec<String>,
}

/// Static metadata for an inventory item.
#[derive(Debug, Clone)]
pub struct ItemDefinition {
    pub hash: ItemHash,
    /// Human-readable item name
    pub name: String,
    /// Icon path relative to the platform asset host
    pub icon: String,
    /// Hashes of the acquisition sources this item belongs to
    pub source_hashes: Vec<u32>,
}

/// Read-only definition store.
pub trait ManifestStore {
    /// Looks up a vendor definition; a missing row is fatal.
    fn vendor_definition(&self, vendor_hash: VendorHash) -> Result<VendorDefinition, ManifestError>;

    /// Looks up an item definition; a missing row is fatal.
    fn item_definition(&self, item_hash: ItemHash) -> Result<ItemDefinition, ManifestError>;
}

/// In-memory manifest backed by hash maps.
///
/// Cheap to clone; clones share the same underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryManifest {
    vendors: Arc<HashMap<VendorHash, VendorDefinition>>,
    items: Arc<HashMap<ItemHash, ItemDefinition>>,
}

impl MemoryManifest {
    /// Builds a manifest from preloaded definitions.
    pub fn new(vendors: Vec<VendorDefinition>, items: Vec<ItemDefinition>) -> Self {
        Self {
            vendors: Arc::new(vendors.into_iter().map(|v| (v.hash, v)).collect()),
            items: Arc::new(items.into_iter().map(|i| (i.hash, i)).collect()),
        }
    }
}

impl ManifestStore for MemoryManifest {
    fn vendor_definition(&self, vendor_hash: VendorHash) -> Result<VendorDefinition, ManifestError> {
        self.vendors
            .get(&vendor_hash)
            .cloned()
            .ok_or(ManifestError::MissingVendor(vendor_hash))
    }

    fn item_definition(&self, item_hash: ItemHash) -> Result<ItemDefinition, ManifestError> {
        self.items
            .get(&item_hash)
            .cloned()
            .ok_or(ManifestError::MissingItem(item_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_manifest() -> MemoryManifest {
        MemoryManifest::new(
            vec![VendorDefinition {
                hash: VendorHash(2420628997),
                identifier: "VENDOR_KIOSK_SHADERS".to_string(),
                name: "Shader Kiosk".to_string(),
                failure_strings: vec!["Requires completion of X".to_string()],
            }],
            vec![ItemDefinition {
                hash: ItemHash(42),
                name: "Superblack".to_string(),
                icon: "/common/icons/superblack.jpg".to_string(),
                source_hashes: vec![1],
            }],
        )
    }

    #[test]
    fn test_known_hashes_resolve() {
        let manifest = sample_manifest();

        let vendor = manifest.vendor_definition(VendorHash(2420628997)).unwrap();
        assert_eq!(vendor.identifier, "VENDOR_KIOSK_SHADERS");
        assert_eq!(vendor.failure_strings.len(), 1);

        let item = manifest.item_definition(ItemHash(42)).unwrap();
        assert_eq!(item.name, "Superblack");
    }

    #[test]
    fn test_missing_rows_are_fatal() {
        let manifest = sample_manifest();

        assert!(matches!(
            manifest.vendor_definition(VendorHash(1)),
            Err(ManifestError::MissingVendor(VendorHash(1)))
        ));
        assert!(matches!(
            manifest.item_definition(ItemHash(1)),
            Err(ManifestError::MissingItem(ItemHash(1)))
        ));
    }

    #[test]
    fn test_clones_share_tables() {
        let manifest = sample_manifest();
        let clone = manifest.clone();
        assert!(clone.vendor_definition(VendorHash(2420628997)).is_ok());
    }
}
