// HTTP client for the ZeroTier Central API
//
// API contract (https://api.zerotier.com/api/v1):
//
//   GET /network
//     Auth: Authorization: token <value>
//     Response: array of network objects
//
//   GET /network/{id}/member
//     Auth: Authorization: token <value>
//     Response: array of member objects
//
// The reqwest client is built once and shared across calls; the token is
// re-read from the config store on every request, so a token update takes
// effect on the next call without reconstructing the client.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::types::{Member, Network, RawMember, RawNetwork};
use crate::config::{Config, ConfigError, ConfigStore};

pub const DEFAULT_BASE_URL: &str = "https://api.zerotier.com/api/v1";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Error type for remote API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable token in the configuration. Nothing was sent.
    #[error("no ZeroTier API token configured")]
    TokenMissing,

    /// Transport failure or non-success HTTP status, with diagnostic text
    /// (the response body when there was one). Never retried here.
    #[error("ZeroTier API error: {0}")]
    RemoteService(String),

    /// A success response whose body was not the expected JSON shape.
    #[error("unexpected ZeroTier API response: {0}")]
    Decode(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Read-only client for the ZeroTier Central service, plus pass-through
/// access to the config store so callers have the whole surface on one
/// value.
#[derive(Debug, Clone)]
pub struct ZeroTier {
    store: ConfigStore,
    http: Client,
    base_url: String,
}

impl ZeroTier {
    pub fn new(store: ConfigStore) -> Result<Self> {
        Self::with_base_url(store, DEFAULT_BASE_URL)
    }

    /// Client against a non-default endpoint. Tests point this at a local
    /// mock server.
    pub fn with_base_url(store: ConfigStore, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            store,
            http,
            base_url: base_url.into(),
        })
    }

    pub fn load_config(&self) -> Result<Config, ConfigError> {
        self.store.load()
    }

    pub fn save_config(&self, config: &Config) -> Result<(), ConfigError> {
        self.store.save(config)
    }

    /// Fetch all networks visible to the configured token, in the order
    /// the service returned them.
    pub async fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        let body = self.get("network").await?;
        let raw: Vec<RawNetwork> =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let networks: Vec<Network> = raw
            .into_iter()
            .map(|n| n.into_network().map_err(|e| ApiError::Decode(e.to_string())))
            .collect::<Result<_, _>>()?;
        tracing::debug!(count = networks.len(), "fetched networks");
        Ok(networks)
    }

    /// Fetch the members of one network.
    pub async fn list_members(&self, network_id: &str) -> Result<Vec<Member>, ApiError> {
        let body = self.get(&format!("network/{network_id}/member")).await?;
        let raw: Vec<RawMember> =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let members: Vec<Member> = raw
            .into_iter()
            .map(|m| m.into_member().map_err(|e| ApiError::Decode(e.to_string())))
            .collect::<Result<_, _>>()?;
        tracing::debug!(network_id, count = members.len(), "fetched members");
        Ok(members)
    }

    // Token is read fresh from the store here, once per request. A blank
    // token is rejected before anything goes on the wire.
    async fn get(&self, path: &str) -> Result<String, ApiError> {
        let config = self.store.load()?;
        let token = config.token().ok_or(ApiError::TokenMissing)?.to_string();

        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "ZeroTier API request");

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("token {token}"))
            .send()
            .await
            .map_err(|e| ApiError::RemoteService(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RemoteService(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::RemoteService(format!("{status}: {body}")));
        }
        Ok(body)
    }
}
