//! # Coinfolio Core
//!
//! Read-only portfolio pipeline for a cryptocurrency exchange account.
//!
//! ## Overview
//!
//! Each dashboard load runs three stages:
//!
//! 1. **Fetch**: [`ExchangeClient`] signs GET requests (HMAC-SHA256) for the
//!    accounts, open-orders and products endpoints.
//! 2. **Aggregate**: [`aggregate`] filters and reshapes each raw payload
//!    into a per-ticker view.
//! 3. **Value**: [`metrics`] combines the views into liquid, illiquid and
//!    potential net worth.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aggregate`] | Account, order and product aggregators |
//! | [`client`] | Signed exchange client and endpoint table |
//! | [`config`] | Credentials, holdings and client settings |
//! | [`dashboard`] | Serializable dashboard payload |
//! | [`domain`] | Typed records (Account, Order, Product, Ticker) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`metrics`] | Net-worth calculation |
//! | [`service`] | Fetch-aggregate-value facade |
//! | [`signing`] | Request signing |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinfolio_core::{Credentials, ExchangeClient, Holdings, PortfolioConfig, PortfolioService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PortfolioConfig::new(
//!         Credentials::new("api-key", "secret-key")?,
//!         Holdings::parse_list("BTC,ETH")?,
//!     );
//!     let service = PortfolioService::new(ExchangeClient::new(&config), &config);
//!
//!     let dashboard = service.load_dashboard(false).await?;
//!     println!("net worth: ${:.2}", dashboard.total_net_worth);
//!     Ok(())
//! }
//! ```
//!
//! ## Security
//!
//! - Credentials are redacted from `Debug` output and never logged
//! - Errors name endpoints and statuses, never headers

pub mod aggregate;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod metrics;
pub mod service;
pub mod signing;

pub use aggregate::{AggregatedView, DUST_THRESHOLD, QUOTE_CURRENCY};
pub use client::{Endpoint, ExchangeClient};
pub use config::{Credentials, Holdings, PortfolioConfig};
pub use dashboard::{Dashboard, SnapshotMeta};
pub use domain::{Account, Entry, Order, OrderSide, Product, Ticker, UtcDateTime};
pub use error::{MissingField, PortfolioError, PortfolioErrorKind, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use metrics::{HoldingValue, NetWorth, NetWorthReport};
pub use service::PortfolioService;
pub use signing::RequestSigner;
