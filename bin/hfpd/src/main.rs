//! `hfpd` — the Holy Family Polymers operations server.
//!
//! Usage:
//!   hfpd [-c <context-name-or-path>] [--listen <addr>]
//!
//! The context name resolves to `/etc/hfp/<name>.toml`. If a path with `/`
//! or `.` is given, it's used directly. Without `-c`, defaults apply.

mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use hfp_core::Module;
use hfp_guard::GuardConfig;
use hfp_inventory::InventoryModule;
use hfp_rates::{RatesConfig, RatesModule};
use tracing::info;

use config::ServerConfig;

/// Holy Family Polymers server.
#[derive(Parser, Debug)]
#[command(name = "hfpd", about = "Holy Family Polymers operations server")]
struct Cli {
    /// Context name or path to config file (defaults apply when omitted).
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let server_config = match &cli.config {
        Some(name) => {
            let path = ServerConfig::resolve_path(name);
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(&path)?
        }
        None => ServerConfig::default(),
    };
    server_config.verify()?;

    // Request guard applied across every route.
    let guard = Arc::new(GuardConfig {
        max_depth: server_config.guard.max_depth,
        max_body_bytes: server_config.guard.max_body_bytes,
    });

    // Business modules.
    let rates_module = RatesModule::new(RatesConfig {
        cutoff_hour_ist: server_config.rates.cutoff_hour_ist,
    });
    info!("Rates module initialized");

    let inventory_module = InventoryModule::new();
    info!("Inventory module initialized");

    let modules: Vec<&dyn Module> = vec![&rates_module, &inventory_module];
    let app = routes::build_router(guard, &modules);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("hfpd listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
