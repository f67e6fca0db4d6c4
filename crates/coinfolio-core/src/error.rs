use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::Ticker;

/// Validation and configuration errors exposed by `coinfolio-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("holdings must contain at least one ticker")]
    EmptyHoldings,

    #[error("credential '{name}' cannot be empty")]
    EmptyCredential { name: &'static str },

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
}

/// Field a held ticker was missing when net worth was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Balance,
    Price,
}

impl MissingField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Price => "price",
        }
    }
}

impl Display for MissingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioErrorKind {
    Auth,
    Network,
    Upstream,
    UnexpectedSchema,
    MissingData,
}

impl PortfolioErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth_error",
            Self::Network => "network_error",
            Self::Upstream => "upstream_error",
            Self::UnexpectedSchema => "unexpected_schema",
            Self::MissingData => "missing_data",
        }
    }
}

/// Errors raised while fetching, aggregating, or valuing the portfolio.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    #[error("exchange rejected credentials for {endpoint} (status {status})")]
    Auth { endpoint: String, status: u16 },

    #[error("transport failure for {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("exchange returned status {status} for {endpoint}")]
    Upstream { endpoint: String, status: u16 },

    #[error("unexpected payload from {context}: {message}")]
    UnexpectedSchema { context: String, message: String },

    #[error("{ticker} has no {field} entry")]
    MissingData { ticker: Ticker, field: MissingField },
}

impl PortfolioError {
    pub fn unexpected_schema(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedSchema {
            context: context.into(),
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> PortfolioErrorKind {
        match self {
            Self::Auth { .. } => PortfolioErrorKind::Auth,
            Self::Network { .. } => PortfolioErrorKind::Network,
            Self::Upstream { .. } => PortfolioErrorKind::Upstream,
            Self::UnexpectedSchema { .. } => PortfolioErrorKind::UnexpectedSchema,
            Self::MissingData { .. } => PortfolioErrorKind::MissingData,
        }
    }
}
