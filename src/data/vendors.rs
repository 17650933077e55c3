//! Static vendor tables
//!
//! This module contains the fixed vendor identifier blacklist used by the
//! availability aggregator and the registry of collection kiosks that make
//! sense as status targets.

use super::VendorHash;

/// Vendor identifiers excluded from "for sale anywhere" aggregation.
///
/// These entities appear in the all-vendors summary but are not genuine
/// sale sources: collection kiosks only re-show items already unlocked,
/// and the postmaster/bounty tracker hold per-character deliveries.
/// Membership is an exact match on the definition's identifier string.
pub const VENDOR_IDENTIFIER_BLACKLIST: &[&str] = &[
    "VENDOR_BOUNTY_TRACKER",
    "VENDOR_KIOSK_EMBLEMS",
    "VENDOR_KIOSK_EMOTES",
    "VENDOR_KIOSK_EXOTIC_ARMOR",
    "VENDOR_KIOSK_EXOTIC_WEAPON",
    "VENDOR_KIOSK_HOLIDAY",
    "VENDOR_KIOSK_SHADERS",
    "VENDOR_KIOSK_SHIPS",
    "VENDOR_KIOSK_VEHICLES",
    "VENDOR_POSTMASTER",
    "VENDOR_REEF_POSTMASTER",
];

/// Returns true when a vendor identifier is excluded from aggregation.
pub fn is_blacklisted(identifier: &str) -> bool {
    VENDOR_IDENTIFIER_BLACKLIST.contains(&identifier)
}

/// A collection kiosk that can be used as a status target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KioskVendor {
    /// Short route-friendly identifier (e.g. "shaders")
    pub slug: &'static str,
    /// Human-readable kiosk name
    pub name: &'static str,
    /// Stable vendor hash
    pub hash: VendorHash,
}

/// The collection kiosks worth rendering a status page for.
pub static KIOSK_VENDORS: [KioskVendor; 7] = [
    KioskVendor {
        slug: "emblems",
        name: "Emblem Kiosk",
        hash: VendorHash(3301500998),
    },
    KioskVendor {
        slug: "shaders",
        name: "Shader Kiosk",
        hash: VendorHash(2420628997),
    },
    KioskVendor {
        slug: "ships",
        name: "Ship Kiosk",
        hash: VendorHash(2244880194),
    },
    KioskVendor {
        slug: "sparrows",
        name: "Sparrow Kiosk",
        hash: VendorHash(44395194),
    },
    KioskVendor {
        slug: "emotes",
        name: "Emote Kiosk",
        hash: VendorHash(614738178),
    },
    KioskVendor {
        slug: "weapons",
        name: "Exotic Weapon Kiosk",
        hash: VendorHash(1460182514),
    },
    KioskVendor {
        slug: "armor",
        name: "Exotic Armor Kiosk",
        hash: VendorHash(3902439767),
    },
];

/// Looks up a kiosk vendor by its route slug.
pub fn kiosk_by_slug(slug: &str) -> Option<&'static KioskVendor> {
    KIOSK_VENDORS.iter().find(|kiosk| kiosk.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blacklist_matches_exactly() {
        assert!(is_blacklisted("VENDOR_KIOSK_SHADERS"));
        assert!(is_blacklisted("VENDOR_POSTMASTER"));
        assert!(!is_blacklisted("VENDOR_EVERVERSE"));
        // Substrings and case variants do not match.
        assert!(!is_blacklisted("VENDOR_KIOSK"));
        assert!(!is_blacklisted("vendor_kiosk_shaders"));
    }

    #[test]
    fn test_kiosk_by_slug_finds_known_kiosks() {
        let shaders = kiosk_by_slug("shaders").unwrap();
        assert_eq!(shaders.hash, VendorHash(2420628997));
        assert_eq!(shaders.name, "Shader Kiosk");

        assert!(kiosk_by_slug("gunsmith").is_none());
    }

    #[test]
    fn test_kiosk_slugs_are_unique() {
        for (i, a) in KIOSK_VENDORS.iter().enumerate() {
            for b in &KIOSK_VENDORS[i + 1..] {
                assert_ne!(a.slug, b.slug);
                assert_ne!(a.hash, b.hash);
            }
        }
    }
}
