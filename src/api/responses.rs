//! Platform response envelope and per-endpoint payload wrappers
//!
//! Every platform reply wraps its payload in a common envelope carrying an
//! application-level error code. The success sentinel is a fixed code; any
//! other value is treated as a failure of the call, exactly like a bad
//! HTTP status.

use serde::Deserialize;

use crate::api::ApiError;
use crate::data::{VendorSnapshot, VendorsSummary};

/// The envelope error code that marks a successful platform call.
pub const PLATFORM_SUCCESS_CODE: i32 = 1;

/// Common wrapper around every platform response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(rename = "ErrorCode")]
    pub error_code: i32,
    #[serde(rename = "ErrorStatus", default)]
    pub error_status: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "ThrottleSeconds", default)]
    pub throttle_seconds: i32,
    /// Absent or empty on failed calls, so it only becomes required once
    /// the error code has been checked.
    #[serde(rename = "Response", default)]
    pub response: Option<T>,
}

impl<T> Envelope<T> {
    /// Validates the envelope's error code and unwraps the payload.
    pub fn into_response(self) -> Result<T, ApiError> {
        if self.error_code != PLATFORM_SUCCESS_CODE {
            return Err(ApiError::Platform {
                code: self.error_code,
                status: self.error_status,
                message: self.message,
            });
        }
        self.response.ok_or(ApiError::EmptyResponse)
    }
}

/// Payload of the single-vendor inventory endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorDataResponse {
    pub data: VendorSnapshot,
}

/// Payload of the all-vendors summary endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorsSummaryResponse {
    pub data: VendorsSummary,
}
