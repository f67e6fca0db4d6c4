use std::sync::Arc;

use coinfolio_core::{ExchangeClient, PortfolioConfig, PortfolioService};

/// Shared application state, passed to route handlers via `axum::extract::State`.
///
/// Holds no per-request data; every load goes back to the exchange.
pub struct AppState {
    pub service: PortfolioService,
}

impl AppState {
    pub fn new(config: &PortfolioConfig) -> Arc<Self> {
        Self::with_client(ExchangeClient::new(config), config)
    }

    pub fn with_client(client: ExchangeClient, config: &PortfolioConfig) -> Arc<Self> {
        Arc::new(Self {
            service: PortfolioService::new(client, config),
        })
    }
}
