//! # Domain Models
//!
//! Typed records for the three exchange collections the dashboard reads.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Account`] | Available balance for one currency |
//! | [`Order`] | Open order, keyed by its base ticker |
//! | [`Product`] | Spot price for a tradeable pair |
//! | [`Entry`] | Typed record plus the raw upstream object |
//! | [`Ticker`] | Validated asset symbol |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Numeric fields arrive from the exchange as decimal strings and are
//! coerced to `f64` during aggregation. Nothing else is derived.

mod models;
mod ticker;
mod timestamp;

pub use models::{Account, Entry, Order, OrderSide, Product};
pub use ticker::Ticker;
pub use timestamp::UtcDateTime;
