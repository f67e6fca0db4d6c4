use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Ticker, UtcDateTime};

/// Exchange account for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub active: bool,
    pub available_balance: f64,
    pub currency: Ticker,
    pub updated_at: UtcDateTime,
}

/// Order direction as reported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl Display for OrderSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open order. `product_id` holds the base ticker derived from the
/// exchange's `BASE-QUOTE` identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Display only; `None` when the exchange sends a blank value.
    pub average_filled_price: Option<f64>,
    pub outstanding_hold_amount: f64,
    pub total_value_after_fees: f64,
    pub product_id: Ticker,
    pub side: OrderSide,
}

/// Spot-price quote for one tradeable pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub base_display_symbol: Ticker,
    pub base_name: String,
    pub price: f64,
    /// Display only; `None` when the exchange sends a blank value.
    pub price_percentage_change_24h: Option<f64>,
    pub quote_display_symbol: Ticker,
}

/// Typed record alongside the upstream object it was built from.
///
/// The record's fields serialize flat, with the original object under `raw`
/// when it was kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl<T> Entry<T> {
    pub fn new(record: T, raw: Option<Value>) -> Self {
        Self { record, raw }
    }
}
