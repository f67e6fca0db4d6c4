use serde::Deserialize;
use serde_json::Value;

use super::{decode, keep_raw, parse_decimal, parse_display_decimal, OrderView};
use crate::{Entry, Order, OrderSide, PortfolioError, Ticker};

#[derive(Debug, Deserialize)]
struct OrderPayload {
    #[serde(default)]
    average_filled_price: Option<String>,
    outstanding_hold_amount: String,
    total_value_after_fees: String,
    product_id: String,
    side: OrderSide,
}

/// Group open orders by the base ticker of their product id.
///
/// Orders keep response order within a ticker.
pub fn aggregate_orders(records: &[Value], include_raw: bool) -> Result<OrderView, PortfolioError> {
    let mut view = OrderView::new();

    for (index, raw) in records.iter().enumerate() {
        let context = format!("orders[{index}]");
        let payload: OrderPayload = decode(&context, raw)?;

        let ticker = Ticker::from_product_id(&payload.product_id)
            .map_err(|error| PortfolioError::unexpected_schema(&context, error.to_string()))?;

        let order = Order {
            average_filled_price: parse_display_decimal(payload.average_filled_price.as_deref()),
            outstanding_hold_amount: parse_decimal(
                &context,
                "outstanding_hold_amount",
                &payload.outstanding_hold_amount,
            )?,
            total_value_after_fees: parse_decimal(
                &context,
                "total_value_after_fees",
                &payload.total_value_after_fees,
            )?,
            product_id: ticker.clone(),
            side: payload.side,
        };

        view.entry(ticker)
            .or_default()
            .push(Entry::new(order, keep_raw(include_raw, raw)));
    }

    Ok(view)
}
