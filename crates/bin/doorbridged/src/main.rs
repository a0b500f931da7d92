//! # doorbridged — doorbridge daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the hub transport and database connector (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Register the configured doors (manual list or database discovery)
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use doorbridge_adapter_discovery_sqlx::SqlxConnector;
use doorbridge_adapter_http_axum::router;
use doorbridge_adapter_http_axum::state::{AppState, HubTarget};
use doorbridge_adapter_hub_reqwest::ReqwestHubTransport;
use doorbridge_app::services::discovery::DoorDiscoveryService;
use doorbridge_app::services::dispatcher::DoorCommandDispatcher;
use doorbridge_app::services::doors::DoorService;
use doorbridge_app::services::setup::SetupService;
use doorbridge_domain::error::BridgeError;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Adapters
    let transport =
        ReqwestHubTransport::new(&config.hub_client()).context("building hub client")?;
    let connector = SqlxConnector::new(&config.discovery);

    // Services
    let door_service = Arc::new(DoorService::new(DoorCommandDispatcher::new(transport)));
    let setup_service = Arc::new(SetupService::new(DoorDiscoveryService::new(connector)));

    match setup_service
        .run(&config.hub.host, config.hub.port, &config.setup, &door_service)
        .await
    {
        Ok(report) => {
            tracing::info!(
                created = report.created,
                skipped = report.skipped,
                "doors registered"
            );
        }
        // The server still starts so doors can be imported through the API.
        Err(BridgeError::Discovery(err)) => {
            tracing::error!(
                kind = err.kind(),
                detail = %err.detail(),
                guidance = err.guidance(),
                "startup discovery failed, no doors registered"
            );
        }
        Err(err @ BridgeError::Setup(_)) => {
            tracing::error!(error = %err, "startup setup failed, no doors registered");
        }
        Err(err) => return Err(err).context("invalid setup"),
    }

    // HTTP
    let state = AppState::from_arcs(
        door_service,
        setup_service,
        HubTarget {
            host: config.hub.host.clone(),
            port: config.hub.port,
        },
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "doorbridged listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("doorbridged stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
