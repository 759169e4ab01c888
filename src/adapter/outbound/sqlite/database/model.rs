//! Database model types for Diesel ORM.

use std::str::FromStr;

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::warn;

use super::schema::exchanges;
use crate::domain::{Exchange, ExchangeId};

/// Stored projection of an [`Exchange`].
///
/// Decimals and dates are kept as text (`Decimal::to_string`, ISO dates) so
/// no value ever passes through a float column.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = exchanges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRow {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub spot_volume_usd: Option<String>,
    pub date_launched: Option<String>,
    /// Index within the cached set; restores the stored order on read.
    pub position: i32,
}

impl ExchangeRow {
    pub fn from_exchange(exchange: &Exchange, position: i32) -> Self {
        Self {
            id: exchange.id.to_string(),
            name: exchange.name.clone(),
            logo_url: exchange.logo_url.clone(),
            spot_volume_usd: exchange.spot_volume_usd.map(|v| v.to_string()),
            date_launched: exchange
                .date_launched
                .map(|d| d.format("%Y-%m-%d").to_string()),
            position,
        }
    }

    /// Convert back to the domain type.
    ///
    /// A malformed optional column is logged and read as absent rather than
    /// discarding the whole row.
    pub fn into_exchange(self) -> Exchange {
        let spot_volume_usd = self.spot_volume_usd.as_deref().and_then(|raw| {
            Decimal::from_str(raw)
                .map_err(|e| warn!(id = %self.id, value = raw, error = %e, "Unreadable cached volume"))
                .ok()
        });
        let date_launched = self.date_launched.as_deref().and_then(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| warn!(id = %self.id, value = raw, error = %e, "Unreadable cached launch date"))
                .ok()
        });

        Exchange {
            id: ExchangeId::from(self.id),
            name: self.name,
            logo_url: self.logo_url,
            spot_volume_usd,
            date_launched,
        }
    }
}
