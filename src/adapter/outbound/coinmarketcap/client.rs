//! CoinMarketCap REST API client.
//!
//! Three endpoints are used, all relative to the versioned base URL:
//! - `exchange/map` for the paginated listing
//! - `exchange/info` for one exchange's detail
//! - `exchange/assets` for the currencies an exchange holds
//!
//! Every request carries the static API key header. Failures surface as
//! [`Error::Transport`] with the HTTP status, or with the API's in-body
//! error code when the HTTP status was 2xx.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::dto::{AssetsResponse, ErrorEnvelope, ExchangeInfoResponse, ExchangeMapResponse};
use super::settings::CoinMarketCapConfig;
use crate::domain::{CurrencyQuote, ExchangeDetail, ExchangeId, ExchangeStub};
use crate::error::{ConfigError, Error, Result};
use crate::port::outbound::RemoteSource;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-cmc_pro_api_key";

/// HTTP client for the CoinMarketCap exchange endpoints.
pub struct CoinMarketCapClient {
    http: HttpClient,
    base_url: Url,
}

impl CoinMarketCapClient {
    /// Create a client with default timeouts.
    ///
    /// # Errors
    /// Returns a configuration error if the base URL or API key is unusable.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::from_config(
            &CoinMarketCapConfig {
                base_url: base_url.to_string(),
                ..CoinMarketCapConfig::default()
            },
            api_key,
        )
    }

    /// Create a client from the `[api]` settings.
    ///
    /// # Errors
    /// Returns a configuration error if the base URL or API key is unusable,
    /// or if the HTTP client cannot be built.
    pub fn from_config(config: &CoinMarketCapConfig, api_key: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "CMC_API_KEY",
            }
            .into());
        }

        let mut key = HeaderValue::from_str(api_key).map_err(|e| ConfigError::InvalidValue {
            field: "CMC_API_KEY",
            reason: e.to_string(),
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base_url: normalize_base(&config.base_url)?,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    async fn get<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.status.error_message)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(Error::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Parse the base URL, making sure relative joins keep its last segment.
fn normalize_base(raw: &str) -> Result<Url> {
    if raw.is_empty() {
        return Err(ConfigError::MissingField { field: "base_url" }.into());
    }
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Ok(Url::parse(&with_slash)?)
}

#[async_trait]
impl RemoteSource for CoinMarketCapClient {
    async fn list_exchanges(&self, offset: u64, limit: u32) -> Result<Vec<ExchangeStub>> {
        let url = self.endpoint(
            "exchange/map",
            &[
                ("start", offset.to_string()),
                ("limit", limit.to_string()),
                ("sort", "id".to_string()),
            ],
        )?;
        let response: ExchangeMapResponse = self.get(url).await?;
        response.status.check()?;

        Ok(response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(ExchangeStub::from)
            .collect())
    }

    async fn exchange_detail(&self, id: u64) -> Result<ExchangeDetail> {
        let url = self.endpoint("exchange/info", &[("id", id.to_string())])?;
        let response: ExchangeInfoResponse = self.get(url).await?;
        response.status.check()?;

        response
            .data
            .and_then(|mut data| data.remove(&id.to_string()))
            .map(ExchangeDetail::from)
            .ok_or_else(|| Error::NotFound {
                id: ExchangeId::from(id),
            })
    }

    async fn exchange_assets(&self, id: u64) -> Result<Vec<CurrencyQuote>> {
        let url = self.endpoint("exchange/assets", &[("id", id.to_string())])?;
        let response: AssetsResponse = self.get(url).await?;
        response.status.check()?;

        Ok(response
            .data
            .unwrap_or_default()
            .iter()
            .filter_map(|asset| asset.currency.as_ref()?.to_quote())
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "coinmarketcap"
    }
}
