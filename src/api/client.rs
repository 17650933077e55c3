//! Authenticated HTTP client for the game-data platform
//!
//! Wraps `reqwest` with the headers the platform requires on every call
//! (API key plus bearer token), decodes the shared response envelope, and
//! runs every request through the exponential-backoff retry policy.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::responses::{Envelope, VendorDataResponse, VendorsSummaryResponse};
use crate::api::retry::RetryPolicy;
use crate::api::{ApiError, VendorApi};
use crate::data::{CharacterContext, VendorHash, VendorSnapshot, VendorsSummary};

/// Base URL of the hosted platform API.
const DEFAULT_BASE_URL: &str = "https://www.bungie.net/Platform";

/// Header carrying the registered application's API key.
const API_KEY_HEADER: &str = "X-API-Key";

/// Configuration for a platform [`Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registered application API key, sent on every request
    pub api_key: String,
    /// Base URL for the platform API (overridable for testing)
    pub base_url: String,
    /// Backoff policy applied to every logical call
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Creates a config for the hosted platform with default retry tuning.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Overrides the base URL, keeping the rest of the config.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Retrying platform API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with a fresh connection pool.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    /// Creates a client reusing an existing `reqwest` client.
    pub fn with_http_client(http_client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn vendors_summary_url(&self, ctx: &CharacterContext) -> String {
        format!(
            "{}/Destiny/{}/Account/{}/Character/{}/Vendors/",
            self.config.base_url, ctx.membership_type, ctx.membership_id, ctx.character_id
        )
    }

    fn vendor_inventory_url(&self, ctx: &CharacterContext, vendor_hash: VendorHash) -> String {
        format!(
            "{}/Destiny/{}/Account/{}/Character/{}/Vendor/{}/",
            self.config.base_url,
            ctx.membership_type,
            ctx.membership_id,
            ctx.character_id,
            vendor_hash
        )
    }

    /// Issues one GET through the retry policy and unwraps the envelope.
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        self.config.retry.run(|| self.attempt::<T>(url, token)).await
    }

    /// A single attempt: transport, status, decode, and envelope checks.
    async fn attempt<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<T, ApiError> {
        let response = self
            .http_client
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        envelope.into_response()
    }
}

impl VendorApi for Client {
    async fn vendors_summary(
        &self,
        token: &str,
        ctx: &CharacterContext,
    ) -> Result<VendorsSummary, ApiError> {
        let url = self.vendors_summary_url(ctx);
        debug!(character_id = %ctx.character_id, "fetching all-vendors summary");
        let payload: VendorsSummaryResponse = self.get_envelope(&url, token).await?;
        Ok(payload.data)
    }

    async fn vendor_inventory(
        &self,
        token: &str,
        ctx: &CharacterContext,
        vendor_hash: VendorHash,
    ) -> Result<VendorSnapshot, ApiError> {
        let url = self.vendor_inventory_url(ctx, vendor_hash);
        debug!(%vendor_hash, "fetching vendor inventory");
        let payload: VendorDataResponse = self.get_envelope(&url, token).await?;
        Ok(payload.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context() -> CharacterContext {
        CharacterContext {
            membership_type: 2,
            membership_id: "4611686018428388000".to_string(),
            character_id: "2305843009214000000".to_string(),
        }
    }

    #[test]
    fn test_vendors_summary_url_shape() {
        let client = Client::new(ClientConfig::new("key"));
        let url = client.vendors_summary_url(&test_context());
        assert_eq!(
            url,
            "https://www.bungie.net/Platform/Destiny/2/Account/4611686018428388000/Character/2305843009214000000/Vendors/"
        );
    }

    #[test]
    fn test_vendor_inventory_url_shape() {
        let client = Client::new(ClientConfig::new("key"));
        let url = client.vendor_inventory_url(&test_context(), VendorHash(2420628997));
        assert!(url.ends_with("/Character/2305843009214000000/Vendor/2420628997/"));
    }

    #[test]
    fn test_base_url_override() {
        let config = ClientConfig::new("key").with_base_url("http://localhost:9000");
        let client = Client::new(config);
        let url = client.vendors_summary_url(&test_context());
        assert!(url.starts_with("http://localhost:9000/Destiny/"));
    }
}
