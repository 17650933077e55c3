//! In-memory vendor snapshot cache
//!
//! This module provides a concurrency-safe, per-vendor memoization store
//! whose entries expire at the instant the upstream service declares, not
//! on a locally chosen TTL. Concurrent misses for the same vendor collapse
//! into a single upstream fetch.

mod vendor_cache;

pub use vendor_cache::{CacheError, VendorCache};
