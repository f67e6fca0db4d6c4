//! CLI argument definitions for coinfolio.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the dashboard server (default) |
//! | `snapshot` | Load the dashboard once and print it as JSON |
//!
//! Every option can also come from its `COINFOLIO_*` environment variable.

use std::net::{IpAddr, SocketAddr};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use coinfolio_core::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use coinfolio_core::{Credentials, Holdings, PortfolioConfig, PortfolioError, ValidationError};

/// Personal crypto portfolio dashboard.
#[derive(Debug, Parser)]
#[command(name = "coinfolio", author, version, about = "Read-only crypto portfolio dashboard")]
pub struct Cli {
    #[command(flatten)]
    pub exchange: ExchangeArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Exchange credentials and the tickers to value.
#[derive(Debug, Args)]
pub struct ExchangeArgs {
    /// Exchange API key.
    #[arg(long, global = true, env = "COINFOLIO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Exchange API secret used to sign requests.
    #[arg(long, global = true, env = "COINFOLIO_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Comma-separated tickers you hold.
    #[arg(long, global = true, env = "COINFOLIO_HOLDINGS", default_value = "BTC,ETH,LTC")]
    pub holdings: String,

    /// Exchange REST base URL.
    #[arg(long, global = true, env = "COINFOLIO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, env = "COINFOLIO_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

impl ExchangeArgs {
    pub fn to_config(&self) -> Result<PortfolioConfig, CliError> {
        let credentials = Credentials::new(
            self.api_key.clone().unwrap_or_default(),
            self.secret_key.clone().unwrap_or_default(),
        )?;
        let holdings = Holdings::parse_list(&self.holdings)?;

        Ok(PortfolioConfig::new(credentials, holdings)
            .with_base_url(self.base_url.as_str())?
            .with_timeout_ms(self.timeout_ms)?)
    }
}

/// Listener settings for `serve`.
#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Address to bind.
    #[arg(long, global = true, env = "COINFOLIO_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, global = true, env = "COINFOLIO_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServerArgs {
    pub fn socket_addr(&self) -> Result<SocketAddr, CliError> {
        let ip: IpAddr = self
            .bind
            .trim()
            .parse()
            .map_err(|_| CliError::BindAddress(self.bind.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Available commands. Without one, `serve` runs.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the dashboard over HTTP.
    Serve,
    /// Fetch once and print the dashboard payload.
    Snapshot(SnapshotArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Pretty-print JSON output.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Embed the raw exchange records next to each typed record.
    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::BindAddress(_) => 2,
            Self::Portfolio(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_fail_validation() {
        let args = ExchangeArgs {
            api_key: None,
            secret_key: Some(String::from("fixture-secret")),
            holdings: String::from("BTC"),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        };

        let error = args.to_config().expect_err("must fail");
        assert!(matches!(
            error,
            CliError::Validation(ValidationError::EmptyCredential { name: "api_key" })
        ));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn flags_build_a_validated_config() {
        let cli = Cli::try_parse_from([
            "coinfolio",
            "--api-key",
            "key-id",
            "--secret-key",
            "fixture-secret",
            "--holdings",
            "btc,eth",
            "--base-url",
            "http://127.0.0.1:9000/",
            "--timeout-ms",
            "2500",
            "snapshot",
            "--pretty",
        ])
        .expect("arguments parse");

        let config = cli.exchange.to_config().expect("valid config");
        assert_eq!(config.holdings.len(), 2);
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_ms, 2500);
        assert!(matches!(cli.command, Some(Command::Snapshot(SnapshotArgs { pretty: true, .. }))));
    }

    #[test]
    fn serve_accepts_bind_and_port() {
        let cli = Cli::try_parse_from(["coinfolio", "serve", "--bind", "0.0.0.0", "--port", "9090"])
            .expect("arguments parse");
        assert!(matches!(cli.command, Some(Command::Serve)));
        let addr = cli.server.socket_addr().expect("valid address");
        assert_eq!(addr.to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn ipv6_bind_address_is_accepted() {
        let args = ServerArgs {
            bind: String::from("::1"),
            port: 8080,
        };
        let addr = args.socket_addr().expect("valid address");
        assert!(addr.is_ipv6());
        assert_eq!(addr.to_string(), "[::1]:8080");
    }

    #[test]
    fn malformed_bind_address_is_rejected() {
        let args = ServerArgs {
            bind: String::from("not an address"),
            port: 8080,
        };
        let error = args.socket_addr().expect_err("must fail");
        assert_eq!(error.exit_code(), 2);
    }
}
