//! Filter and reshape raw exchange payloads into per-ticker views.
//!
//! Every aggregator is a pure function of its input records: a filter
//! followed by a reshape into typed records, with decimal strings coerced
//! to `f64`. Malformed records that reach the reshape step fail the whole
//! aggregation with `UnexpectedSchema`.

mod accounts;
mod orders;
mod products;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{Account, Entry, Order, PortfolioError, Product, Ticker};

pub use accounts::{aggregate_accounts, DUST_THRESHOLD};
pub use orders::aggregate_orders;
pub use products::{aggregate_products, QUOTE_CURRENCY};

pub type AccountView = BTreeMap<Ticker, Entry<Account>>;
pub type OrderView = BTreeMap<Ticker, Vec<Entry<Order>>>;
pub type ProductView = BTreeMap<Ticker, Entry<Product>>;

/// Aggregated accounts, orders and products for one dashboard load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedView {
    pub accounts: AccountView,
    pub products: ProductView,
    pub orders: OrderView,
}

impl AggregatedView {
    pub fn balance(&self, ticker: &Ticker) -> Option<f64> {
        self.accounts
            .get(ticker)
            .map(|entry| entry.record.available_balance)
    }

    pub fn spot_price(&self, ticker: &Ticker) -> Option<f64> {
        self.products.get(ticker).map(|entry| entry.record.price)
    }

    pub fn open_orders(&self, ticker: &Ticker) -> &[Entry<Order>] {
        self.orders.get(ticker).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn decode<T: DeserializeOwned>(context: &str, raw: &Value) -> Result<T, PortfolioError> {
    T::deserialize(raw).map_err(|error| PortfolioError::unexpected_schema(context, error.to_string()))
}

/// Coerce an exchange decimal string such as `"28994.76"` to `f64`.
fn parse_decimal(context: &str, field: &str, value: &str) -> Result<f64, PortfolioError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| {
            PortfolioError::unexpected_schema(
                context,
                format!("field '{field}' is not a decimal: '{value}'"),
            )
        })
}

/// Lenient variant for display-only fields: blank, absent or malformed
/// values become `None` instead of failing the load.
fn parse_display_decimal(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

fn keep_raw(include_raw: bool, raw: &Value) -> Option<Value> {
    include_raw.then(|| raw.clone())
}
