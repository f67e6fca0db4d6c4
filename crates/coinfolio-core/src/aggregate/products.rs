use serde::Deserialize;
use serde_json::Value;

use super::{decode, keep_raw, parse_decimal, parse_display_decimal, ProductView};
use crate::config::Holdings;
use crate::{Entry, PortfolioError, Product, Ticker};

/// Only pairs quoted in this currency carry the spot price.
pub const QUOTE_CURRENCY: &str = "USD";

#[derive(Debug, Deserialize)]
struct ProductPayload {
    base_name: String,
    price: String,
    #[serde(default)]
    price_percentage_change_24h: Option<String>,
    quote_display_symbol: String,
}

/// Keep the USD-quoted product of every held ticker.
pub fn aggregate_products(
    records: &[Value],
    holdings: &Holdings,
    include_raw: bool,
) -> Result<ProductView, PortfolioError> {
    let mut view = ProductView::new();

    for (index, raw) in records.iter().enumerate() {
        let Some(ticker) = held_usd_pair(raw, holdings) else {
            continue;
        };

        let context = format!("products[{index}]");
        let payload: ProductPayload = decode(&context, raw)?;
        let quote = Ticker::parse(&payload.quote_display_symbol)
            .map_err(|error| PortfolioError::unexpected_schema(&context, error.to_string()))?;

        let product = Product {
            base_display_symbol: ticker.clone(),
            base_name: payload.base_name,
            price: parse_decimal(&context, "price", &payload.price)?,
            price_percentage_change_24h: parse_display_decimal(
                payload.price_percentage_change_24h.as_deref(),
            ),
            quote_display_symbol: quote,
        };
        view.insert(ticker, Entry::new(product, keep_raw(include_raw, raw)));
    }

    Ok(view)
}

fn held_usd_pair(raw: &Value, holdings: &Holdings) -> Option<Ticker> {
    let quote = raw.get("quote_display_symbol").and_then(Value::as_str)?;
    if quote != QUOTE_CURRENCY {
        return None;
    }

    let base = raw.get("base_display_symbol").and_then(Value::as_str)?;
    let ticker = Ticker::parse(base).ok()?;
    holdings.contains(&ticker).then_some(ticker)
}
