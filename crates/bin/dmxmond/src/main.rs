//! # dmxmond — dmxmon daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the channel source (lighting server or virtual universes)
//! - Spawn the monitor, drawing on an in-memory grid
//! - Build the axum router around the monitor handle and the grid
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no monitor logic belongs here.

mod config;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use dmxmon_adapter_http_axum::grid::GridRenderer;
use dmxmon_adapter_http_axum::router;
use dmxmon_adapter_http_axum::state::AppState;
use dmxmon_adapter_ola_http::OlaHttpSource;
use dmxmon_adapter_virtual::{UniverseStore, spawn_chase};
use dmxmon_app::poll::{self, MonitorHandle};

use crate::config::{Config, SourceKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let grid = Arc::new(GridRenderer::new());
    let (monitor, chase) = start_monitor(&config, Arc::clone(&grid))?;

    if config.monitor.enabled {
        monitor.set_state(true, config.monitor.universe)?;
    }

    let state = AppState::new(monitor, grid).with_refresh_seconds(config.monitor.refresh_seconds);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, source = ?config.source.kind, "dmxmond listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(chase) = chase {
        chase.abort();
    }
    tracing::info!("dmxmond stopped");
    Ok(())
}

/// Spawn the monitor on the configured source.
///
/// For the virtual source, also returns the demo chase task feeding it.
fn start_monitor(
    config: &Config,
    grid: Arc<GridRenderer>,
) -> Result<(MonitorHandle, Option<JoinHandle<()>>), Box<dyn std::error::Error>> {
    let interval = config.poll_interval();
    match config.source.kind {
        SourceKind::Ola => {
            let source = OlaHttpSource::new(&config.source.ola)?;
            tracing::info!(endpoint = %source.endpoint(), "polling lighting server");
            let (monitor, _task) = poll::spawn(source, grid, interval);
            Ok((monitor, None))
        }
        SourceKind::Virtual => {
            let store = Arc::new(UniverseStore::new());
            let chase = spawn_chase(
                Arc::clone(&store),
                config.monitor.universe,
                config.chase_interval(),
            );
            let (monitor, _task) = poll::spawn(store, grid, interval);
            Ok((monitor, Some(chase)))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
