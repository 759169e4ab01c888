//! CoinMarketCap REST response types.
//!
//! Every response is an envelope of `data` plus a `status` block. The API
//! reports logical failures (rate limits, bad keys) through
//! `status.error_code` even when the HTTP status is 200.
//!
//! Example listing response:
//! ```json
//! {"data":[{"id":270,"name":"Binance","slug":"binance","is_active":1}],
//!  "status":{"timestamp":"2024-05-01T00:00:00.000Z","error_code":0,"error_message":null}}
//! ```
//!
//! Numeric fields are read through [`serde_json::Number`], which keeps the
//! literal digits (`arbitrary_precision`), and converted to [`Decimal`] from
//! that text, so no value passes through binary floating point arithmetic.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Number;
use tracing::warn;

use crate::domain::{CurrencyQuote, ExchangeDetail, ExchangeId, ExchangeStub};
use crate::error::{Error, Result};

/// `status` block present on every response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusDto {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl StatusDto {
    /// Turn a non-zero in-body error code into a transport error.
    pub fn check(&self) -> Result<()> {
        if self.error_code == 0 {
            return Ok(());
        }
        Err(Error::Transport {
            status: u16::try_from(self.error_code).ok(),
            message: self
                .error_message
                .clone()
                .unwrap_or_else(|| format!("API error code {}", self.error_code)),
        })
    }
}

/// Body shape used to pull an error message out of a non-2xx response.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub status: StatusDto,
}

/// `GET /exchange/map` response.
#[derive(Debug, Deserialize)]
pub struct ExchangeMapResponse {
    pub data: Option<Vec<ExchangeMapEntry>>,
    #[serde(default)]
    pub status: StatusDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeMapEntry {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

impl From<ExchangeMapEntry> for ExchangeStub {
    fn from(entry: ExchangeMapEntry) -> Self {
        Self::new(entry.id, entry.name, entry.slug)
    }
}

/// `GET /exchange/info` response, keyed by the requested id.
#[derive(Debug, Deserialize)]
pub struct ExchangeInfoResponse {
    pub data: Option<HashMap<String, ExchangeInfoDto>>,
    #[serde(default)]
    pub status: StatusDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfoDto {
    pub id: u64,
    pub name: String,
    pub slug: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub date_launched: Option<String>,
    pub urls: Option<UrlsDto>,
    pub maker_fee: Option<Number>,
    pub taker_fee: Option<Number>,
    pub spot_volume_usd: Option<Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlsDto {
    pub website: Option<Vec<String>>,
}

impl From<ExchangeInfoDto> for ExchangeDetail {
    fn from(dto: ExchangeInfoDto) -> Self {
        Self {
            id: ExchangeId::from(dto.id),
            name: dto.name,
            slug: dto.slug,
            logo_url: dto.logo,
            description: dto.description,
            website_url: dto.urls.and_then(|u| u.website).and_then(|w| w.into_iter().next()),
            maker_fee: optional_decimal("maker_fee", dto.maker_fee.as_ref()),
            taker_fee: optional_decimal("taker_fee", dto.taker_fee.as_ref()),
            spot_volume_usd: optional_decimal("spot_volume_usd", dto.spot_volume_usd.as_ref()),
            date_launched: dto.date_launched.as_deref().and_then(parse_launch_date),
        }
    }
}

/// `GET /exchange/assets` response.
#[derive(Debug, Deserialize)]
pub struct AssetsResponse {
    pub data: Option<Vec<AssetDto>>,
    #[serde(default)]
    pub status: StatusDto,
}

/// One wallet held by the exchange. Only the currency is used.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetDto {
    pub currency: Option<CurrencyDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyDto {
    pub crypto_id: u64,
    pub price_usd: Option<Number>,
    pub symbol: String,
    pub name: String,
}

impl CurrencyDto {
    /// Convert to a quote; currencies without a USD price are skipped.
    #[must_use]
    pub fn to_quote(&self) -> Option<CurrencyQuote> {
        Some(CurrencyQuote {
            id: self.crypto_id,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            price_usd: optional_decimal("price_usd", self.price_usd.as_ref())?,
        })
    }
}

/// Convert a JSON number to a decimal using its textual representation.
fn decimal_from_number(number: &Number) -> Result<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| Error::Parse(format!("{text} is not a decimal: {e}")))
}

/// An absent field stays absent; a number outside the decimal range is
/// logged and treated as absent.
fn optional_decimal(field: &'static str, number: Option<&Number>) -> Option<Decimal> {
    decimal_from_number(number?)
        .map_err(|e| warn!(field, error = %e, "Dropping unrepresentable number"))
        .ok()
}

/// Parse the calendar date from an ISO timestamp such as
/// `2017-07-14T00:00:00.000Z`. Unparseable dates are treated as absent.
fn parse_launch_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // -------------------------------------------------------------------------
    // Listing
    // -------------------------------------------------------------------------

    #[test]
    fn map_response_parses_stubs() {
        let json = r#"{
            "data": [
                {"id": 270, "name": "Binance", "slug": "binance", "is_active": 1},
                {"id": 24, "name": "Kraken", "slug": "kraken"}
            ],
            "status": {"timestamp": "2024-05-01T00:00:00.000Z", "error_code": 0, "error_message": null}
        }"#;

        let response: ExchangeMapResponse = serde_json::from_str(json).unwrap();
        assert!(response.status.check().is_ok());

        let stubs: Vec<ExchangeStub> = response
            .data
            .unwrap()
            .into_iter()
            .map(ExchangeStub::from)
            .collect();
        assert_eq!(stubs[0], ExchangeStub::new(270, "Binance", "binance"));
        assert_eq!(stubs[1], ExchangeStub::new(24, "Kraken", "kraken"));
    }

    #[test]
    fn in_body_error_code_becomes_transport_error() {
        let json = r#"{
            "data": null,
            "status": {"error_code": 1008, "error_message": "You've exceeded your API Key's HTTP request rate limit."}
        }"#;

        let response: ExchangeMapResponse = serde_json::from_str(json).unwrap();
        let err = response.status.check().unwrap_err();

        assert_eq!(err.status(), Some(1008));
        assert!(err.to_string().contains("rate limit"));
    }

    #[test]
    fn error_code_without_message_gets_generic_text() {
        let status = StatusDto {
            error_code: 1002,
            error_message: None,
        };
        let err = status.check().unwrap_err();
        assert!(matches!(
            err,
            Error::Transport { status: Some(1002), ref message } if message == "API error code 1002"
        ));
    }

    // -------------------------------------------------------------------------
    // Detail
    // -------------------------------------------------------------------------

    #[test]
    fn info_response_maps_all_fields() {
        let json = r#"{
            "data": {
                "270": {
                    "id": 270,
                    "name": "Binance",
                    "slug": "binance",
                    "logo": "https://s2.coinmarketcap.com/static/img/exchanges/64x64/270.png",
                    "description": "Largest exchange by volume.",
                    "date_launched": "2017-07-14T00:00:00.000Z",
                    "urls": {"website": ["https://www.binance.com/", "https://binance.us"], "twitter": []},
                    "maker_fee": 0.02,
                    "taker_fee": 0.04,
                    "spot_volume_usd": 1000000
                }
            },
            "status": {"error_code": 0}
        }"#;

        let response: ExchangeInfoResponse = serde_json::from_str(json).unwrap();
        let dto = response.data.unwrap().remove("270").unwrap();
        let detail = ExchangeDetail::from(dto);

        assert_eq!(detail.id.as_str(), "270");
        assert_eq!(detail.slug.as_deref(), Some("binance"));
        assert_eq!(
            detail.website_url.as_deref(),
            Some("https://www.binance.com/")
        );
        assert_eq!(detail.maker_fee, Some(dec!(0.02)));
        assert_eq!(detail.taker_fee, Some(dec!(0.04)));
        assert_eq!(detail.spot_volume_usd, Some(dec!(1000000)));
        assert_eq!(detail.date_launched, NaiveDate::from_ymd_opt(2017, 7, 14));
    }

    #[test]
    fn info_response_leaves_missing_fields_absent() {
        let json = r#"{
            "data": {"9": {"id": 9, "name": "Bare"}},
            "status": {"error_code": 0}
        }"#;

        let response: ExchangeInfoResponse = serde_json::from_str(json).unwrap();
        let detail = ExchangeDetail::from(response.data.unwrap().remove("9").unwrap());

        assert_eq!(detail.name, "Bare");
        assert!(detail.logo_url.is_none());
        assert!(detail.description.is_none());
        assert!(detail.website_url.is_none());
        assert!(detail.maker_fee.is_none());
        assert!(detail.taker_fee.is_none());
        assert!(detail.spot_volume_usd.is_none());
        assert!(detail.date_launched.is_none());
    }

    #[test]
    fn explicit_nulls_are_absent() {
        let json = r#"{"id": 9, "name": "Nulls", "logo": null, "urls": {"website": null}, "maker_fee": null}"#;

        let detail = ExchangeDetail::from(serde_json::from_str::<ExchangeInfoDto>(json).unwrap());

        assert!(detail.logo_url.is_none());
        assert!(detail.website_url.is_none());
        assert!(detail.maker_fee.is_none());
    }

    #[test]
    fn decimals_keep_their_textual_precision() {
        let json = r#"{"id": 1, "name": "Precise", "spot_volume_usd": 123456789.123456789,
            "maker_fee": 0.30000000000000004441, "taker_fee": 0.1}"#;

        let detail = ExchangeDetail::from(serde_json::from_str::<ExchangeInfoDto>(json).unwrap());

        // None of these survive a round trip through f64.
        assert_eq!(detail.spot_volume_usd, Some(dec!(123456789.123456789)));
        assert_eq!(detail.maker_fee, Some(dec!(0.30000000000000004441)));
        assert_eq!(detail.taker_fee, Some(dec!(0.1)));
    }

    #[test]
    fn out_of_range_number_is_a_parse_error() {
        let number: Number = serde_json::from_str("1e40").unwrap();

        let err = decimal_from_number(&number).unwrap_err();

        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
        assert_eq!(optional_decimal("spot_volume_usd", Some(&number)), None);
    }

    #[test]
    fn out_of_range_price_skips_the_currency() {
        let json = r#"{"crypto_id": 1, "price_usd": 1e40, "symbol": "BIG", "name": "Too big"}"#;

        let currency: CurrencyDto = serde_json::from_str(json).unwrap();

        assert_eq!(currency.to_quote(), None);
    }

    #[test]
    fn scientific_notation_is_accepted() {
        let number: Number = serde_json::from_str("1e21").unwrap();
        assert_eq!(
            decimal_from_number(&number).ok(),
            Some(dec!(1000000000000000000000))
        );
    }

    #[test]
    fn launch_date_accepts_plain_dates_and_rejects_garbage() {
        assert_eq!(
            parse_launch_date("2017-07-14"),
            NaiveDate::from_ymd_opt(2017, 7, 14)
        );
        assert_eq!(parse_launch_date("not a date"), None);
        assert_eq!(parse_launch_date(""), None);
    }

    // -------------------------------------------------------------------------
    // Assets
    // -------------------------------------------------------------------------

    #[test]
    fn assets_response_maps_priced_currencies() {
        let json = r#"{
            "data": [
                {
                    "wallet_address": "0xabc",
                    "balance": 12.5,
                    "platform": {"crypto_id": 1027, "symbol": "ETH", "name": "Ethereum"},
                    "currency": {"crypto_id": 825, "price_usd": 1.0002, "symbol": "USDT", "name": "Tether USDt"}
                },
                {
                    "wallet_address": "0xdef",
                    "balance": 1,
                    "currency": {"crypto_id": 5, "symbol": "NOP", "name": "No Price"}
                }
            ],
            "status": {"error_code": 0}
        }"#;

        let response: AssetsResponse = serde_json::from_str(json).unwrap();
        let quotes: Vec<_> = response
            .data
            .unwrap()
            .iter()
            .filter_map(|a| a.currency.as_ref()?.to_quote())
            .collect();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "USDT");
        assert_eq!(quotes[0].price_usd, dec!(1.0002));
    }
}
