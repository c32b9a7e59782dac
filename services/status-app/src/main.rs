//! Status App
//!
//! Serves the platform status page and the `/ping`, `/warn`, `/error`
//! diagnostics, forwarding each diagnostic event to the log collector.
//!
//! # Usage
//! ```bash
//! TENANT=collector.example.com:8088 BEARER_TOKEN=... ARTIFACT=pcf-sample status-app
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use collector_client::{EventDispatcher, EventForwarder, SourceIdentifiers};
use tracing::{error, info};

use status_app::{logging, router, startup, AppState, Config, ProcessExit, StatusIndex};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.verbose, config.log_format)?;

    info!("Starting status app");

    // Missing collector credentials stop startup before any network call
    let credentials = match config.credentials() {
        Ok(creds) => creds,
        Err(e) => {
            error!(error = %e, "Collector credentials are not configured");
            return Err(e).context("collector credentials are not configured");
        }
    };

    let index = StatusIndex::from_env().context("Failed to read platform environment")?;
    info!(
        app_name = %index.app_name,
        instance_index = index.instance_index,
        space = %index.space_name,
        services = index.services.len(),
        "Platform environment loaded"
    );

    let forwarder = EventForwarder::with_options(
        credentials,
        config.collector_scheme,
        config.collector_timeout(),
    )
    .context("Failed to build collector HTTP client")?;

    let sources = SourceIdentifiers::new(index.app_name.clone(), config.artifact.clone());
    let dispatcher = EventDispatcher::new(Arc::new(forwarder), sources);

    startup::run(
        &dispatcher,
        config.startup_sleep.as_deref(),
        &config.listen_label(),
    )
    .await;

    let state = AppState::new(
        dispatcher,
        index,
        config.static_dir.clone(),
        Arc::new(ProcessExit),
    );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Status app listening on {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
