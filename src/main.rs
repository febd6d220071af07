//! List Service (v1)
//!
//! Serves head/tail list operations with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ middleware ──▶ handlers ──▶ request ──▶ lists engine
//!                     (id, trace,    (route,      (CSV or       (validate,
//!                      cors, limit)   method)      JSON body)    slice)
//!                                                                   │
//!     Client Response                                               ▼
//!     ◀────────────── cache ◀──────── response ◀─────────── Ok / ListError
//!                     (ETag,          ({result} /
//!                      Cache-Control)  {error})
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use list_service::config::load_config;
use list_service::lifecycle::{shutdown_signal, Shutdown};
use list_service::observability::{logging, metrics};
use list_service::HttpServer;

#[derive(Parser)]
#[command(name = "list-service")]
#[command(about = "HTTP service for list head/tail operations", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "LIST_SERVICE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!(
        app_name = %config.app_name,
        bind_address = %config.listener.bind_address,
        cache_ttl_secs = config.cache.ttl_secs,
        cors_allow_origins = ?config.cors.allow_origins,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    if config.observability.metrics_enabled {
        // Address already checked during config validation
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
