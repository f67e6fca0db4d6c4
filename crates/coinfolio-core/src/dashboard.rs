use serde::Serialize;
use uuid::Uuid;

use crate::aggregate::{AccountView, AggregatedView, OrderView, ProductView};
use crate::metrics::{HoldingValue, NetWorthReport};
use crate::UtcDateTime;

/// Metadata attached to every dashboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotMeta {
    pub request_id: String,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SnapshotMeta {
    pub fn new(latency_ms: u64) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            generated_at: UtcDateTime::now(),
            latency_ms,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Net-worth figures together with the views they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub meta: SnapshotMeta,
    pub liquid: f64,
    pub illiquid: f64,
    pub potential_sale: f64,
    pub total_net_worth: f64,
    pub potential_net_worth: f64,
    pub holdings: Vec<HoldingValue>,
    pub accounts: AccountView,
    pub orders: OrderView,
    pub products: ProductView,
}

impl Dashboard {
    pub fn assemble(view: AggregatedView, report: NetWorthReport, latency_ms: u64) -> Self {
        let mut meta = SnapshotMeta::new(latency_ms);
        for missing in &report.missing {
            meta.push_warning(missing.to_string());
        }

        let totals = report.net_worth;
        Self {
            meta,
            liquid: totals.liquid,
            illiquid: totals.illiquid,
            potential_sale: totals.potential_sale,
            total_net_worth: totals.total_net_worth,
            potential_net_worth: totals.potential_net_worth,
            holdings: report.holdings,
            accounts: view.accounts,
            orders: view.orders,
            products: view.products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MissingField;
    use crate::metrics::NetWorth;
    use crate::{PortfolioError, Ticker};

    #[test]
    fn missing_holdings_become_meta_warnings() {
        let report = NetWorthReport {
            net_worth: NetWorth::from_components(10.0, 2.0, 3.0),
            holdings: Vec::new(),
            missing: vec![PortfolioError::MissingData {
                ticker: Ticker::parse("LTC").expect("valid"),
                field: MissingField::Balance,
            }],
        };

        let dashboard = Dashboard::assemble(AggregatedView::default(), report, 42);
        assert_eq!(dashboard.meta.warnings, vec![String::from("LTC has no balance entry")]);
        assert_eq!(dashboard.meta.latency_ms, 42);
        assert_eq!(dashboard.total_net_worth, 12.0);
        assert_eq!(dashboard.potential_net_worth, 13.0);
        assert_eq!(dashboard.meta.request_id.len(), 36);
    }

    #[test]
    fn serialized_payload_uses_snake_case_totals() {
        let dashboard =
            Dashboard::assemble(AggregatedView::default(), NetWorthReport::default(), 0);
        let value = serde_json::to_value(&dashboard).expect("serializable");

        for key in [
            "liquid",
            "illiquid",
            "potential_sale",
            "total_net_worth",
            "potential_net_worth",
            "accounts",
            "orders",
            "products",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value["meta"].get("warnings").is_none());
    }
}
