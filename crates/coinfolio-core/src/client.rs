//! Signed, read-only access to the exchange's brokerage endpoints.
//!
//! Each call signs a single GET and returns the parsed body. There is no
//! retry: a failed call surfaces as a [`PortfolioError`] for the caller.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::config::PortfolioConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::signing::RequestSigner;
use crate::{PortfolioError, UtcDateTime};

/// Brokerage collection the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Accounts,
    Orders,
    Products,
}

impl Endpoint {
    /// Path that is signed. Never includes the query string.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Accounts => "/api/v3/brokerage/accounts",
            Self::Orders => "/api/v3/brokerage/orders/historical/batch",
            Self::Products => "/api/v3/brokerage/products",
        }
    }

    pub const fn query(self) -> &'static str {
        match self {
            Self::Accounts => "limit=250",
            Self::Orders => "order_status=OPEN",
            Self::Products => "limit=250",
        }
    }

    /// Key of the record array in the response body.
    pub const fn collection_key(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Orders => "orders",
            Self::Products => "products",
        }
    }

    pub fn url(self, base_url: &str) -> String {
        format!("{base_url}{}?{}", self.path(), self.query())
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection_key())
    }
}

/// Authenticated exchange client.
#[derive(Clone)]
pub struct ExchangeClient {
    http_client: Arc<dyn HttpClient>,
    signer: RequestSigner,
    base_url: String,
    timeout_ms: u64,
}

impl ExchangeClient {
    pub fn new(config: &PortfolioConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: &PortfolioConfig) -> Self {
        Self {
            http_client,
            signer: RequestSigner::new(config.credentials.clone()),
            base_url: config.base_url.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Sign and issue a GET for `endpoint_path`, returning the parsed body.
    ///
    /// `endpoint_path` is what gets signed; `url` is what gets requested.
    pub async fn fetch(&self, endpoint_path: &str, url: &str) -> Result<Value, PortfolioError> {
        let timestamp = UtcDateTime::now().unix_timestamp();
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_header("content-type", "application/json")
            .with_timeout_ms(self.timeout_ms);
        let request = self.signer.sign(request, endpoint_path, timestamp);

        let started = Instant::now();
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| PortfolioError::Network {
                endpoint: endpoint_path.to_owned(),
                message: error.message().to_owned(),
            })?;

        tracing::debug!(
            endpoint = endpoint_path,
            status = response.status,
            latency_ms = started.elapsed().as_millis() as u64,
            "exchange call completed"
        );

        if response.is_auth_failure() {
            return Err(PortfolioError::Auth {
                endpoint: endpoint_path.to_owned(),
                status: response.status,
            });
        }

        if !response.is_success() {
            return Err(PortfolioError::Upstream {
                endpoint: endpoint_path.to_owned(),
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|error| {
            PortfolioError::unexpected_schema(endpoint_path, format!("body is not JSON: {error}"))
        })
    }

    /// Fetch one collection and return its raw records.
    pub async fn fetch_records(&self, endpoint: Endpoint) -> Result<Vec<Value>, PortfolioError> {
        let url = endpoint.url(&self.base_url);
        let body = self.fetch(endpoint.path(), &url).await?;
        extract_records(endpoint, body)
    }

    pub async fn accounts(&self) -> Result<Vec<Value>, PortfolioError> {
        self.fetch_records(Endpoint::Accounts).await
    }

    pub async fn orders(&self) -> Result<Vec<Value>, PortfolioError> {
        self.fetch_records(Endpoint::Orders).await
    }

    pub async fn products(&self) -> Result<Vec<Value>, PortfolioError> {
        self.fetch_records(Endpoint::Products).await
    }
}

fn extract_records(endpoint: Endpoint, body: Value) -> Result<Vec<Value>, PortfolioError> {
    let key = endpoint.collection_key();
    match body {
        Value::Object(mut object) => match object.remove(key) {
            Some(Value::Array(records)) => Ok(records),
            Some(_) => Err(PortfolioError::unexpected_schema(
                endpoint.path(),
                format!("'{key}' is not an array"),
            )),
            None => Err(PortfolioError::unexpected_schema(
                endpoint.path(),
                format!("missing '{key}' collection"),
            )),
        },
        _ => Err(PortfolioError::unexpected_schema(
            endpoint.path(),
            "body is not a JSON object",
        )),
    }
}
