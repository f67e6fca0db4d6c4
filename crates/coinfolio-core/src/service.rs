//! One dashboard load: fetch, aggregate, value.

use std::time::Instant;

use crate::aggregate::{aggregate_accounts, aggregate_orders, aggregate_products, AggregatedView};
use crate::client::ExchangeClient;
use crate::config::{Holdings, PortfolioConfig};
use crate::dashboard::Dashboard;
use crate::metrics;
use crate::PortfolioError;

/// Stateless facade over the exchange client and the aggregation pipeline.
#[derive(Clone)]
pub struct PortfolioService {
    client: ExchangeClient,
    holdings: Holdings,
}

impl PortfolioService {
    pub fn new(client: ExchangeClient, config: &PortfolioConfig) -> Self {
        Self {
            client,
            holdings: config.holdings.clone(),
        }
    }

    /// Fetch the three collections concurrently and aggregate them.
    ///
    /// The first upstream failure fails the whole load.
    pub async fn load_view(&self, include_raw: bool) -> Result<AggregatedView, PortfolioError> {
        let (accounts, products, orders) = tokio::try_join!(
            self.client.accounts(),
            self.client.products(),
            self.client.orders(),
        )?;

        Ok(AggregatedView {
            accounts: aggregate_accounts(&accounts, include_raw)?,
            products: aggregate_products(&products, &self.holdings, include_raw)?,
            orders: aggregate_orders(&orders, include_raw)?,
        })
    }

    /// Load the view and compute net-worth metrics over it.
    pub async fn load_dashboard(&self, include_raw: bool) -> Result<Dashboard, PortfolioError> {
        let started = Instant::now();
        let view = self.load_view(include_raw).await?;
        let report = metrics::calculate(&view, &self.holdings);
        let latency_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            holdings = report.holdings.len(),
            missing = report.missing.len(),
            latency_ms,
            "dashboard loaded"
        );

        Ok(Dashboard::assemble(view, report, latency_ms))
    }
}
