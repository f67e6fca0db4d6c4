//! Failure propagation and credential hygiene.

use std::sync::Arc;

use coinfolio_core::{Endpoint, PortfolioError, PortfolioErrorKind, Ticker};
use coinfolio_tests::{
    account, fixture_config, fixture_service, order, product, FixtureExchange, FIXTURE_API_KEY,
    FIXTURE_SECRET,
};
use serde_json::json;

fn assert_no_credentials(rendered: &str) {
    assert!(!rendered.contains(FIXTURE_SECRET), "secret leaked: {rendered}");
    assert!(!rendered.contains(FIXTURE_API_KEY), "api key leaked: {rendered}");
}

// ============================================================================
// Upstream failures
// ============================================================================

#[tokio::test]
async fn rejected_credentials_fail_the_whole_load() {
    // Given
    let exchange = Arc::new(
        FixtureExchange::new()
            .with_accounts(vec![account("BTC", "3")])
            .with_status(Endpoint::Orders, 401, r#"{"error":"UNAUTHORIZED"}"#),
    );
    let service = fixture_service(exchange, "BTC");

    // When
    let error = service.load_dashboard(false).await.expect_err("must fail");

    // Then
    assert_eq!(error.kind(), PortfolioErrorKind::Auth);
    assert_eq!(
        error,
        PortfolioError::Auth {
            endpoint: String::from(Endpoint::Orders.path()),
            status: 401,
        }
    );
}

#[tokio::test]
async fn transport_failure_surfaces_as_network_error() {
    // Given
    let exchange = Arc::new(
        FixtureExchange::new().with_transport_error(Endpoint::Products, "connection failed: reset"),
    );
    let service = fixture_service(exchange, "BTC");

    // When
    let error = service.load_view(false).await.expect_err("must fail");

    // Then
    assert_eq!(error.kind(), PortfolioErrorKind::Network);
    assert!(error.to_string().contains(Endpoint::Products.path()));
}

#[tokio::test]
async fn server_error_surfaces_as_upstream_error() {
    // Given
    let exchange =
        Arc::new(FixtureExchange::new().with_status(Endpoint::Accounts, 503, "maintenance"));
    let service = fixture_service(exchange, "BTC");

    // When
    let error = service.load_view(false).await.expect_err("must fail");

    // Then
    assert_eq!(error.kind(), PortfolioErrorKind::Upstream);
    assert_eq!(error.kind().as_str(), "upstream_error");
}

// ============================================================================
// Schema drift
// ============================================================================

#[tokio::test]
async fn missing_collection_is_unexpected_schema() {
    // Given
    let exchange = Arc::new(
        FixtureExchange::new().with_json(Endpoint::Products, json!({ "pairs": [] })),
    );
    let service = fixture_service(exchange, "BTC");

    // When
    let error = service.load_view(false).await.expect_err("must fail");

    // Then
    assert_eq!(error.kind(), PortfolioErrorKind::UnexpectedSchema);
}

#[tokio::test]
async fn non_numeric_price_on_held_pair_is_unexpected_schema() {
    // Given
    let exchange = Arc::new(
        FixtureExchange::new().with_products(vec![product("BTC", "USD", "n/a", "0")]),
    );
    let service = fixture_service(exchange, "BTC");

    // When
    let error = service.load_view(false).await.expect_err("must fail");

    // Then
    assert_eq!(error.kind(), PortfolioErrorKind::UnexpectedSchema);
    assert!(error.to_string().contains("products[0]"));
}

#[tokio::test]
async fn blank_display_only_fields_do_not_fail_the_dashboard() {
    // Given
    let mut order = order("o-1", "BTC-USD", "0.5", "15000", "SELL");
    order["average_filled_price"] = json!("");
    let exchange = Arc::new(
        FixtureExchange::new()
            .with_accounts(vec![account("BTC", "3")])
            .with_orders(vec![order])
            .with_products(vec![product("BTC", "USD", "30000", "")]),
    );
    let service = fixture_service(exchange, "BTC");

    // When
    let dashboard = service.load_dashboard(false).await.expect("load succeeds");

    // Then
    assert_eq!(dashboard.total_net_worth, 105_000.0);
    assert_eq!(dashboard.potential_sale, 15_000.0);
    let btc = Ticker::parse("BTC").expect("valid ticker");
    assert_eq!(dashboard.products[&btc].record.price_percentage_change_24h, None);
    assert_eq!(dashboard.orders[&btc][0].record.average_filled_price, None);
}

#[tokio::test]
async fn malformed_pair_the_user_does_not_hold_is_ignored() {
    // Given
    let exchange = Arc::new(FixtureExchange::new().with_products(vec![
        json!({ "product_id": "XYZ-USD", "quote_display_symbol": "USD", "base_display_symbol": "XYZ" }),
        product("BTC", "USD", "100", "0"),
    ]));
    let service = fixture_service(exchange, "BTC");

    // When
    let view = service.load_view(false).await.expect("load succeeds");

    // Then
    assert_eq!(view.products.len(), 1);
}

// ============================================================================
// Credential hygiene
// ============================================================================

#[tokio::test]
async fn errors_never_contain_credentials() {
    let failures = [
        FixtureExchange::new().with_status(Endpoint::Accounts, 403, "forbidden"),
        FixtureExchange::new().with_transport_error(Endpoint::Orders, "timed out"),
        FixtureExchange::new().with_json(Endpoint::Accounts, json!({ "accounts": "nope" })),
    ];

    for exchange in failures {
        // Given
        let service = fixture_service(Arc::new(exchange), "BTC");

        // When
        let error = service.load_view(false).await.expect_err("must fail");

        // Then
        assert_no_credentials(&format!("{error} {error:?}"));
    }
}

#[test]
fn config_debug_output_redacts_credentials() {
    let config = fixture_config("BTC,ETH");
    assert_no_credentials(&format!("{config:?}"));
}

#[tokio::test]
async fn secret_is_used_to_sign_but_never_sent() {
    // Given
    let exchange = Arc::new(FixtureExchange::new());
    let service = fixture_service(exchange.clone(), "BTC");

    // When
    service.load_view(false).await.expect("load succeeds");

    // Then
    for request in exchange.recorded_requests() {
        assert_eq!(
            request.headers.get("cb-access-key").map(String::as_str),
            Some(FIXTURE_API_KEY)
        );
        for value in request.headers.values() {
            assert!(!value.contains(FIXTURE_SECRET));
        }
        assert!(!request.url.contains(FIXTURE_SECRET));
    }
}
