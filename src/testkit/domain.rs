//! Builders for domain primitives used across tests.
//!
//! Every builder is deterministic in its id, so a test can rebuild the
//! expected value instead of threading it through.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{CurrencyQuote, Exchange, ExchangeDetail, ExchangeId, ExchangeStub};

/// Stub named `Exchange {id}` with slug `exchange-{id}`.
pub fn stub(id: u64) -> ExchangeStub {
    ExchangeStub::new(id, format!("Exchange {id}"), format!("exchange-{id}"))
}

pub fn stubs(ids: &[u64]) -> Vec<ExchangeStub> {
    ids.iter().copied().map(stub).collect()
}

/// Fully populated detail for `id`.
pub fn detail_for(id: u64) -> ExchangeDetail {
    ExchangeDetail {
        id: ExchangeId::from(id),
        name: format!("Exchange {id}"),
        slug: Some(format!("exchange-{id}")),
        logo_url: Some(format!("https://img.example/{id}.png")),
        description: Some(format!("Exchange number {id}")),
        website_url: Some(format!("https://exchange-{id}.example")),
        maker_fee: Some(Decimal::new(2, 3)),
        taker_fee: Some(Decimal::new(4, 3)),
        spot_volume_usd: Some(Decimal::from(id) * Decimal::from(1000)),
        date_launched: NaiveDate::from_ymd_opt(2017, 7, 14),
    }
}

/// The merged exchange produced from [`stub`] and [`detail_for`].
pub fn enriched(id: u64) -> Exchange {
    Exchange::merge(&stub(id), Some(&detail_for(id)))
}

/// A bare cached exchange.
pub fn cached(id: &str, name: &str) -> Exchange {
    Exchange::new(id, name)
}

pub fn quote(id: u64, symbol: &str, price_usd: Decimal) -> CurrencyQuote {
    CurrencyQuote {
        id,
        name: symbol.to_lowercase(),
        symbol: symbol.to_string(),
        price_usd,
    }
}
