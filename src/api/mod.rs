//! Upstream platform API access
//!
//! This module provides the authenticated, retrying HTTP client for the
//! game-data platform and the [`VendorApi`] seam the availability and
//! kiosk layers consume, so those layers can be exercised against fakes.

pub mod client;
pub mod responses;
pub mod retry;

pub use client::{Client, ClientConfig};
pub use responses::{Envelope, PLATFORM_SUCCESS_CODE};
pub use retry::RetryPolicy;

use std::future::Future;

use thiserror::Error;

use crate::data::{CharacterContext, VendorHash, VendorSnapshot, VendorsSummary};

/// Errors from a single logical platform call.
///
/// All variants except [`ApiError::EmptyResponse`] are transient from the
/// retry policy's point of view; whatever survives the retry budget is
/// surfaced to the caller unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the platform
    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    /// Response body was not a valid envelope
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Envelope carried an application-level error code
    #[error("platform error {code} ({status}): {message}")]
    Platform {
        code: i32,
        status: String,
        message: String,
    },

    /// Envelope reported success but carried no payload
    #[error("platform reported success without a response payload")]
    EmptyResponse,
}

/// The two platform operations the availability engine consumes.
///
/// Implemented by [`Client`] over HTTP and by in-memory fakes in tests.
pub trait VendorApi {
    /// Fetches the all-vendors summary for a character.
    fn vendors_summary(
        &self,
        token: &str,
        ctx: &CharacterContext,
    ) -> impl Future<Output = Result<VendorsSummary, ApiError>> + Send;

    /// Fetches the current sale listing for one vendor.
    fn vendor_inventory(
        &self,
        token: &str,
        ctx: &CharacterContext,
        vendor_hash: VendorHash,
    ) -> impl Future<Output = Result<VendorSnapshot, ApiError>> + Send;
}
