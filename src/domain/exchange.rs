//! Exchange records at the three stages of a page request.
//!
//! - [`ExchangeStub`] comes from the listing call.
//! - [`ExchangeDetail`] comes from the per-exchange detail call.
//! - [`Exchange`] is the merged display entity handed to callers and cached.
//!
//! Detail fields are optional throughout: absence upstream is an expected
//! state and is never replaced by a fabricated default.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ExchangeId;

/// Minimal exchange record returned by the listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeStub {
    /// Upstream integer identifier.
    pub id: u64,
    pub name: String,
    pub slug: String,
}

impl ExchangeStub {
    pub fn new(id: u64, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// Enriched per-exchange record returned by the detail call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeDetail {
    pub id: ExchangeId,
    pub name: String,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    /// First website listed upstream.
    pub website_url: Option<String>,
    pub maker_fee: Option<Decimal>,
    pub taker_fee: Option<Decimal>,
    pub spot_volume_usd: Option<Decimal>,
    pub date_launched: Option<NaiveDate>,
}

/// Merged display entity.
///
/// Built from a stub plus an optional detail. A *degraded* exchange carries
/// only the stub fields; it is a valid member of a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: ExchangeId,
    pub name: String,
    pub logo_url: Option<String>,
    pub spot_volume_usd: Option<Decimal>,
    pub date_launched: Option<NaiveDate>,
}

impl Exchange {
    /// Create an exchange with no detail fields.
    pub fn new(id: impl Into<ExchangeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url: None,
            spot_volume_usd: None,
            date_launched: None,
        }
    }

    /// Merge a listing stub with its detail, if one was fetched.
    ///
    /// The stub's id and name always win; detail only contributes the
    /// optional fields.
    #[must_use]
    pub fn merge(stub: &ExchangeStub, detail: Option<&ExchangeDetail>) -> Self {
        Self {
            id: ExchangeId::from(stub.id),
            name: stub.name.clone(),
            logo_url: detail.and_then(|d| d.logo_url.clone()),
            spot_volume_usd: detail.and_then(|d| d.spot_volume_usd),
            date_launched: detail.and_then(|d| d.date_launched),
        }
    }

    /// Build the degraded form from a stub alone.
    #[must_use]
    pub fn degraded(stub: &ExchangeStub) -> Self {
        Self::merge(stub, None)
    }

    /// True when no detail field is populated.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.logo_url.is_none() && self.spot_volume_usd.is_none() && self.date_launched.is_none()
    }
}

/// Remove entries whose id was already seen, keeping the first occurrence.
#[must_use]
pub fn dedup_by_id(exchanges: Vec<Exchange>) -> Vec<Exchange> {
    let mut seen = HashSet::with_capacity(exchanges.len());
    exchanges
        .into_iter()
        .filter(|exchange| seen.insert(exchange.id.clone()))
        .collect()
}
