//! HTTP client for the market server.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::PlaceBetResponse;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::state::{BetReceipt, BetRequest, MarketUpdate, UserPositions};

const MARKET_DATA_PATH: &str = "/api/market-data";
const PLACE_BET_PATH: &str = "/api/place-bet";
const USER_POSITIONS_PATH: &str = "/api/user-positions";

/// The three endpoints the dashboard depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Read race status and market figures.
    async fn fetch_market_data(&self) -> Result<MarketUpdate>;

    /// Place a bet. Rejections come back as [`Error::ServerRejection`].
    async fn place_bet(&self, request: BetRequest) -> Result<BetReceipt>;

    /// Read the authoritative balance and the user's positions.
    async fn fetch_user_positions(&self) -> Result<UserPositions>;
}

/// Builder for creating an HTTP client.
pub struct HttpMarketClientBuilder {
    config: ApiConfig,
}

impl HttpMarketClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the server base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpMarketClient> {
        HttpMarketClient::new(self.config)
    }
}

impl Default for HttpMarketClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// reqwest-backed [`MarketApi`].
///
/// The server identifies the user by session cookie, so the cookie store is
/// kept for the lifetime of the client.
#[derive(Clone)]
pub struct HttpMarketClient {
    client: Client,
    base_url: String,
}

impl HttpMarketClient {
    /// Create a new client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .cookie_store(true)
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Failed to reach {}: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!("{} returned {}", path, status)));
        }

        response
            .json()
            .await
            .map_err(|e| Error::network(format!("Failed to parse {} response: {}", path, e)))
    }
}

#[async_trait]
impl MarketApi for HttpMarketClient {
    #[instrument(skip(self))]
    async fn fetch_market_data(&self) -> Result<MarketUpdate> {
        self.get_json(MARKET_DATA_PATH).await
    }

    #[instrument(skip(self))]
    async fn place_bet(&self, request: BetRequest) -> Result<BetReceipt> {
        let response = self
            .client
            .post(self.url(PLACE_BET_PATH))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::network(format!("Failed to reach {}: {}", PLACE_BET_PATH, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read bet response: {}", e)))?;

        match serde_json::from_str::<PlaceBetResponse>(&body) {
            Ok(parsed) if status.is_success() => parsed.into_receipt(),
            Ok(parsed) => Err(Error::rejected(parsed.error)),
            Err(e) if status.is_success() => Err(Error::Serialization(e)),
            Err(_) => Err(Error::network(format!(
                "{} returned {}",
                PLACE_BET_PATH, status
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_user_positions(&self) -> Result<UserPositions> {
        self.get_json(USER_POSITIONS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpMarketClientBuilder::new()
            .base_url("http://race.local:5000/")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "http://race.local:5000");
        assert_eq!(
            client.url(MARKET_DATA_PATH),
            "http://race.local:5000/api/market-data"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = HttpMarketClientBuilder::new()
            .config(ApiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                timeout_secs: 2,
                ..Default::default()
            })
            .build()
            .unwrap();

        let err = client.fetch_market_data().await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
        assert!(!err.is_local());
        assert_eq!(err.bet_failure_reason(), "Unknown error");
    }
}
