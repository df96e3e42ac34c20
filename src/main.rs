use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use budget_dash::config::DashConfig;
use budget_dash::data::{load_data_store, LoadOptions};
use budget_dash::state::AppState;

/// Command-line overrides; everything else comes from `BUDGET_DASH_*` variables.
#[derive(Parser)]
#[command(
    name = "budget-dash",
    version,
    about = "Web dashboard for simulated trading budgets vs market statistics"
)]
struct Cli {
    /// Address to bind (default: $BUDGET_DASH_BIND or 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (default: $BUDGET_DASH_PORT or 80)
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding the `*38.csv` and `*_1_min.csv` files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory with the static page
    #[arg(long)]
    frontend_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut cfg = DashConfig::from_env();
    if let Some(host) = cli.host {
        cfg.bind = host;
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    if let Some(dir) = cli.data_dir {
        cfg.data_dir = dir;
    }
    if let Some(dir) = cli.frontend_dir {
        cfg.frontend_dir = dir;
    }

    let opts = LoadOptions {
        budget_suffix: cfg.budget_suffix.clone(),
        stats_suffix: cfg.stats_suffix.clone(),
    };
    let store = match load_data_store(&cfg.data_dir, &opts) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Startup load failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let addr: SocketAddr = match format!("{}:{}", cfg.bind, cfg.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address {}:{}: {e}", cfg.bind, cfg.port);
            return ExitCode::FAILURE;
        }
    };

    let app = budget_dash::app(AppState::new(cfg, store));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Cannot bind {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Budget dashboard listening on http://{addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully stopping…");
}
