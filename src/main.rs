//! Gateway adapter (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!   Front door                          ┌──────────────────────────────────────────────┐
//!   (runtime API or local HTTP)         │                   ADAPTER                    │
//!                                       │                                              │
//!   InboundEvent ──────────────────────▶│ allow-list ─▶ denylist ─▶ translate ─▶ invoke│──▶ Backend
//!                                       │                   │ 429                      │    (localhost)
//!                                       │                   ▼                          │
//!   AdaptedResponse ◀───────────────────│ passthrough │ inline gzip │ redirect ◀─ gzip │◀── response
//!                                       │                                  │           │
//!                                       └──────────────────────────────────┼───────────┘
//!                                                                          ▼
//!                                                               Object store (signed URL)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use gateway_adapter::config::load_config;
use gateway_adapter::lifecycle::{signals, Shutdown};
use gateway_adapter::observability::{logging, metrics};
use gateway_adapter::runtime_api::{RuntimeApiClient, RUNTIME_API_ENV};
use gateway_adapter::{Adapter, HttpServer};

#[derive(Parser)]
#[command(name = "gateway-adapter")]
#[command(about = "Adapts serverless invocation events to a local HTTP backend", long_about = None)]
struct Cli {
    /// TOML configuration file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Accept invocation events over HTTP (local runs)
    Serve {
        /// Overrides `server.bind_address`
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Poll the serverless runtime API
    Runtime,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("gateway-adapter v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let adapter = Arc::new(Adapter::from_config(&config).await);

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let command = cli.command.unwrap_or_else(|| {
        if std::env::var_os(RUNTIME_API_ENV).is_some() {
            Command::Runtime
        } else {
            Command::Serve { bind: None }
        }
    });

    match command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind_address.clone());
            let listener = TcpListener::bind(&bind).await?;
            HttpServer::new(adapter).run(listener, shutdown.subscribe()).await?;
        }
        Command::Runtime => {
            let client = RuntimeApiClient::from_env()?;
            client.run(adapter, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
