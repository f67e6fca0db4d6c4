//! Static configuration supplied before any request is served.
//!
//! Everything here is read-only once built. [`Credentials`] never prints
//! its secrets through `Debug`.

use std::fmt::{Debug, Formatter};

use crate::{Ticker, ValidationError};

pub const DEFAULT_BASE_URL: &str = "https://api.coinbase.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Exchange API key pair used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let api_key = api_key.into().trim().to_owned();
        let secret_key = secret_key.into().trim().to_owned();

        if api_key.is_empty() {
            return Err(ValidationError::EmptyCredential { name: "api_key" });
        }
        if secret_key.is_empty() {
            return Err(ValidationError::EmptyCredential { name: "secret_key" });
        }

        Ok(Self {
            api_key,
            secret_key,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Tickers the user holds, in configured order without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holdings(Vec<Ticker>);

impl Holdings {
    pub fn new(tickers: Vec<Ticker>) -> Result<Self, ValidationError> {
        let mut unique: Vec<Ticker> = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            if !unique.contains(&ticker) {
                unique.push(ticker);
            }
        }

        if unique.is_empty() {
            return Err(ValidationError::EmptyHoldings);
        }

        Ok(Self(unique))
    }

    /// Parse a comma-separated list such as `"BTC, eth,LTC"`.
    pub fn parse_list(input: &str) -> Result<Self, ValidationError> {
        let tickers = input
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Ticker::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tickers)
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.0.contains(ticker)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ticker> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Holdings {
    type Item = &'a Ticker;
    type IntoIter = std::slice::Iter<'a, Ticker>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Everything the client and aggregators need, passed in at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioConfig {
    pub credentials: Credentials,
    pub holdings: Holdings,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl PortfolioConfig {
    pub fn new(credentials: Credentials, holdings: Holdings) -> Self {
        Self {
            credentials,
            holdings,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ValidationError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl { value: base_url });
        }

        self.base_url = base_url;
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ValidationError> {
        if timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }

        self.timeout_ms = timeout_ms;
        Ok(self)
    }
}
