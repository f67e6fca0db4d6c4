mod cli;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use coinfolio_core::{ExchangeClient, PortfolioConfig, PortfolioService};
use coinfolio_web::AppState;

use crate::cli::{Cli, CliError, Command, ServerArgs, SnapshotArgs};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = cli.exchange.to_config()?;

    match cli.command {
        None | Some(Command::Serve) => serve(&config, &cli.server).await,
        Some(Command::Snapshot(args)) => snapshot(&config, &args).await,
    }
}

async fn serve(config: &PortfolioConfig, server: &ServerArgs) -> Result<(), CliError> {
    let addr = server.socket_addr()?;
    let app = coinfolio_web::app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(holdings = config.holdings.len(), "coinfolio listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn snapshot(config: &PortfolioConfig, args: &SnapshotArgs) -> Result<(), CliError> {
    let service = PortfolioService::new(ExchangeClient::new(config), config);
    let dashboard = service.load_dashboard(args.raw).await?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&dashboard)?
    } else {
        serde_json::to_string(&dashboard)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping");
}
