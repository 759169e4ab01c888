//! Currencies held by an exchange.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::exchange::ExchangeDetail;

/// A currency an exchange holds, with its current USD price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    /// Upstream crypto identifier.
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub price_usd: Decimal,
}

/// Drop repeated currencies (first wins) and order by price, highest first.
///
/// An exchange reports one asset entry per wallet, so the same currency
/// shows up many times.
#[must_use]
pub fn rank_currencies(quotes: Vec<CurrencyQuote>) -> Vec<CurrencyQuote> {
    let mut seen = HashSet::with_capacity(quotes.len());
    let mut ranked: Vec<_> = quotes
        .into_iter()
        .filter(|quote| seen.insert(quote.id))
        .collect();
    // Stable sort keeps upstream order among equal prices.
    ranked.sort_by(|a, b| b.price_usd.cmp(&a.price_usd));
    ranked
}

/// Exchange detail together with the currencies it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeProfile {
    pub detail: ExchangeDetail,
    /// Empty when the assets lookup failed.
    pub currencies: Vec<CurrencyQuote>,
}
