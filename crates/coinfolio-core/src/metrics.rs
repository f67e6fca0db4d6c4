//! Net-worth metrics over an [`AggregatedView`].
//!
//! A held ticker needs both an account balance and a USD spot price to be
//! valued. When either is absent the ticker contributes nothing, orders
//! included, and the miss is reported as [`PortfolioError::MissingData`].
//! Balances at or below the dust threshold never reach the view, so such a
//! holding always lands in the misses.

use serde::Serialize;

use crate::aggregate::AggregatedView;
use crate::config::Holdings;
use crate::error::MissingField;
use crate::{PortfolioError, Ticker};

/// Valuation of a single held ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingValue {
    pub ticker: Ticker,
    pub balance: f64,
    pub spot_price: f64,
    pub open_orders: usize,
    pub liquid: f64,
    pub illiquid: f64,
    pub potential_sale: f64,
}

/// Portfolio totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NetWorth {
    pub liquid: f64,
    pub illiquid: f64,
    pub potential_sale: f64,
    pub total_net_worth: f64,
    pub potential_net_worth: f64,
}

impl NetWorth {
    pub fn from_components(liquid: f64, illiquid: f64, potential_sale: f64) -> Self {
        Self {
            liquid,
            illiquid,
            potential_sale,
            total_net_worth: liquid + illiquid,
            potential_net_worth: liquid + potential_sale,
        }
    }
}

/// Totals plus the per-ticker breakdown and the tickers that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetWorthReport {
    pub net_worth: NetWorth,
    pub holdings: Vec<HoldingValue>,
    pub missing: Vec<PortfolioError>,
}

/// Value one held ticker from its balance, spot price and open orders.
pub fn value_holding(view: &AggregatedView, ticker: &Ticker) -> Result<HoldingValue, PortfolioError> {
    let balance = view.balance(ticker).ok_or_else(|| PortfolioError::MissingData {
        ticker: ticker.clone(),
        field: MissingField::Balance,
    })?;
    let spot_price = view.spot_price(ticker).ok_or_else(|| PortfolioError::MissingData {
        ticker: ticker.clone(),
        field: MissingField::Price,
    })?;

    let orders = view.open_orders(ticker);
    let held: f64 = orders
        .iter()
        .map(|entry| entry.record.outstanding_hold_amount)
        .sum();
    let potential_sale: f64 = orders
        .iter()
        .map(|entry| entry.record.total_value_after_fees)
        .sum();

    Ok(HoldingValue {
        ticker: ticker.clone(),
        balance,
        spot_price,
        open_orders: orders.len(),
        liquid: balance * spot_price,
        illiquid: held * spot_price,
        potential_sale,
    })
}

/// Sum every held ticker into a [`NetWorthReport`].
pub fn calculate(view: &AggregatedView, holdings: &Holdings) -> NetWorthReport {
    let mut liquid = 0.0;
    let mut illiquid = 0.0;
    let mut potential_sale = 0.0;
    let mut valued = Vec::with_capacity(holdings.len());
    let mut missing = Vec::new();

    for ticker in holdings {
        match value_holding(view, ticker) {
            Ok(value) => {
                liquid += value.liquid;
                illiquid += value.illiquid;
                potential_sale += value.potential_sale;
                valued.push(value);
            }
            Err(error) => {
                tracing::warn!(%ticker, %error, "holding left out of net worth");
                missing.push(error);
            }
        }
    }

    NetWorthReport {
        net_worth: NetWorth::from_components(liquid, illiquid, potential_sale),
        holdings: valued,
        missing,
    }
}
