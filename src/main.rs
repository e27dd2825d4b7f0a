//! route-dispatch demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum (request id, trace, timeout)
//!                         │
//!                         ▼
//!                     pipeline ──▶ dispatcher
//!                                     │ route table: path → {controller, action, ..}
//!                                     │ registry:    controller → XxxHandler
//!                                     │ actions:     action → Xxx(params)
//!                                     ▼
//!     Client Response ◀── ActionResult (content / json / redirect / status)
//! ```

mod handlers;

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_dispatch::config::{load_config, validate_config, ConfigError, ServerConfig};
use route_dispatch::observability::logging;
use route_dispatch::{AppServer, RouteTable};

#[derive(Parser)]
#[command(name = "route-dispatch")]
#[command(about = "Convention-based routing demo server", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in demo routes are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate configuration, print the route table and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = ServerConfig::default();
            let mut routes = handlers::demo_routes();
            routes.append(&mut config.routes);
            config.routes = routes;
            config
        }
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability)?;

    tracing::info!("route-dispatch v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let registry = handlers::registry()?;

    if cli.check {
        let routes = RouteTable::from_config(&config.routes)?;
        println!("Routes (tried in order):");
        for entry in routes.entries() {
            println!("  {:<12} {:<28} {}", entry.name(), entry.pattern().as_str(), entry.defaults());
        }
        println!("Handlers:");
        for (name, actions) in registry.describe() {
            println!("  {:<12} {}", name, actions.join(", "));
        }
        return Ok(());
    }

    let server = AppServer::new(config, registry)?;
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
