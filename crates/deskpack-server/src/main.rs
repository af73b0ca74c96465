// deskpack-server/src/main.rs
// ============================================================================
// Module: DeskPack Daemon
// Description: Binary entry point for the bundle engine HTTP server.
// Purpose: Wire real adapters into the route table and serve.
// Dependencies: axum, deskpack-adapters, deskpack-core, deskpack-schema, tokio
// ============================================================================

//! ## Overview
//! `deskpackd` binds the route table to real collaborators: the compiled
//! bundle schema, the scenario-analyzer client, and the secrets-manager
//! client, all resolved from the environment at startup. The bind address
//! comes from `DESKPACK_BIND` and defaults to loopback.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use deskpack_adapters::ScenarioAnalyzerClient;
use deskpack_adapters::SecretsManagerClient;
use deskpack_core::AdapterError;
use deskpack_core::BundleOrchestrator;
use deskpack_core::BundleValidator;
use deskpack_core::OrchestratorConfig;
use deskpack_schema::CompiledBundleSchema;
use deskpack_server::AppState;
use deskpack_server::router;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Environment variable carrying the bind address.
const DESKPACK_BIND: &str = "DESKPACK_BIND";

/// Default bind address when none is configured.
const DEFAULT_BIND: &str = "127.0.0.1:4620";

/// Deadline applied to adapter calls made on behalf of one request.
const ADAPTER_DEADLINE: Duration = Duration::from_secs(10);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Daemon startup and serve errors.
#[derive(Debug, Error)]
enum DaemonError {
    /// The configured bind address does not parse.
    #[error("invalid bind address {0:?}")]
    Bind(String),
    /// An adapter endpoint could not be resolved or constructed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// A socket operation failed.
    #[error("server io failure: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Starts the daemon.
#[tokio::main]
async fn main() -> Result<(), DaemonError> {
    init_tracing();

    let validator = BundleValidator::new(Arc::new(CompiledBundleSchema::new()));
    let analyzer = ScenarioAnalyzerClient::from_env(validator.clone())?;
    let secrets = SecretsManagerClient::from_env()?;
    let orchestrator =
        BundleOrchestrator::new(analyzer, secrets, validator, OrchestratorConfig::default());
    let state = Arc::new(AppState::new(orchestrator, ADAPTER_DEADLINE));

    let bind = env::var(DESKPACK_BIND).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let addr: SocketAddr = bind.parse().map_err(|_| DaemonError::Bind(bind.clone()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "deskpackd listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Initializes the tracing subscriber from the environment.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
