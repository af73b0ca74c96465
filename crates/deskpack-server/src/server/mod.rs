// deskpack-server/src/server/mod.rs
// ============================================================================
// Module: HTTP Routes
// Description: Route table, request shells, and blocking handler glue.
// Purpose: Expose bundle and scaffold operations over HTTP.
// Dependencies: axum, deskpack-core, deskpack-scaffold, serde, serde_json, tokio
// ============================================================================

//! ## Overview
//! Five routes: validate, merge-secrets, and assemble for bundles;
//! generate and a generated-listing for scenarios. Request bodies are
//! capped at 2 MiB before decoding. Engine work is blocking (network and
//! filesystem I/O), so every handler runs it on the blocking thread pool
//! and only shapes envelopes on the async side.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::routing::get;
use axum::routing::post;
use deskpack_core::BundleManifest;
use deskpack_core::BundleOrchestrator;
use deskpack_core::SecretPlanSource;
use deskpack_core::SkeletonSource;
use deskpack_scaffold::ScaffoldRequest;
use deskpack_scaffold::generate_scenario;
use deskpack_scaffold::list_generated;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

use crate::error::ApiError;


// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted request body size.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Schema token reported in success envelopes.
const SCHEMA_TOKEN: &str = "desktop.v0.1";

// ============================================================================
// SECTION: State and Router
// ============================================================================

/// Shared state behind every route.
pub struct AppState<S, P> {
    /// The bundle composition engine.
    pub orchestrator: BundleOrchestrator<S, P>,
    /// Deadline applied to adapter calls made on behalf of one request.
    pub adapter_deadline: Duration,
}

impl<S, P> AppState<S, P> {
    /// Creates the shared state.
    #[must_use]
    pub const fn new(orchestrator: BundleOrchestrator<S, P>, adapter_deadline: Duration) -> Self {
        Self {
            orchestrator,
            adapter_deadline,
        }
    }
}

/// Builds the route table over the given state.
pub fn router<S, P>(state: Arc<AppState<S, P>>) -> Router
where
    S: SkeletonSource + Send + Sync + 'static,
    P: SecretPlanSource + Send + Sync + 'static,
{
    Router::new()
        .route("/bundles/validate", post(validate_bundle::<S, P>))
        .route("/bundles/merge-secrets", post(merge_bundle_secrets::<S, P>))
        .route("/bundles/assemble", post(assemble_bundle::<S, P>))
        .route("/scenarios/generate", post(generate_scenario_route))
        .route("/scenarios/generated", get(list_generated_route))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

// ============================================================================
// SECTION: Request Shells
// ============================================================================

/// Body of `POST /bundles/merge-secrets`.
#[derive(Debug, Deserialize)]
struct MergeRequest {
    /// Scenario whose secret plans are fetched.
    scenario: String,
    /// Optional tier selector.
    #[serde(default)]
    tier: Option<String>,
    /// Manifest to merge into. Required; its absence is a caller error.
    #[serde(default)]
    manifest: Option<Value>,
}

/// Body of `POST /bundles/assemble`.
#[derive(Debug, Deserialize)]
struct AssembleRequest {
    /// Scenario to assemble.
    scenario: String,
    /// Optional tier selector.
    #[serde(default)]
    tier: Option<String>,
    /// Whether secret plans are merged in. Defaults to true.
    #[serde(default)]
    include_secrets: Option<bool>,
}

/// Body of `POST /scenarios/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    /// Template to copy from.
    #[serde(alias = "templateID")]
    template_id: String,
    /// Human-readable name for the new scenario.
    display_name: String,
    /// Directory-safe identifier for the new scenario.
    slug: String,
    /// Plan only; touch nothing on disk.
    #[serde(default)]
    dry_run: bool,
}

// ============================================================================
// SECTION: Bundle Handlers
// ============================================================================

/// `POST /bundles/validate`: run both validation stages over raw bytes.
async fn validate_bundle<S, P>(
    State(state): State<Arc<AppState<S, P>>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError>
where
    S: SkeletonSource + Send + Sync + 'static,
    P: SecretPlanSource + Send + Sync + 'static,
{
    run_blocking(move || state.orchestrator.validate(&body).map_err(ApiError::from)).await?;
    Ok(Json(json!({ "status": "valid", "schema": SCHEMA_TOKEN })))
}

/// `POST /bundles/merge-secrets`: merge fetched plans into a manifest.
async fn merge_bundle_secrets<S, P>(
    State(state): State<Arc<AppState<S, P>>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError>
where
    S: SkeletonSource + Send + Sync + 'static,
    P: SecretPlanSource + Send + Sync + 'static,
{
    let request: MergeRequest = decode_shell(&body)?;
    let Some(manifest) = request.manifest else {
        return Err(ApiError::bad_request("manifest is required".to_string()));
    };
    let manifest_raw = serde_json::to_vec(&manifest)
        .map_err(|err| ApiError::internal(format!("manifest did not serialize: {err}")))?;
    let merged = run_blocking(move || {
        state
            .orchestrator
            .merge_secrets(
                &request.scenario,
                request.tier.as_deref(),
                &manifest_raw,
                state.adapter_deadline,
            )
            .map_err(ApiError::from)
    })
    .await?;
    Ok(Json(manifest_value(&merged)?))
}

/// `POST /bundles/assemble`: build a full manifest from the collaborators.
async fn assemble_bundle<S, P>(
    State(state): State<Arc<AppState<S, P>>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError>
where
    S: SkeletonSource + Send + Sync + 'static,
    P: SecretPlanSource + Send + Sync + 'static,
{
    let request: AssembleRequest = decode_shell(&body)?;
    let include_secrets = request.include_secrets.unwrap_or(true);
    let assembled = run_blocking(move || {
        state
            .orchestrator
            .assemble(&request.scenario, request.tier.as_deref(), include_secrets)
            .map_err(ApiError::from)
    })
    .await?;
    Ok(Json(json!({
        "status": "assembled",
        "schema": SCHEMA_TOKEN,
        "manifest": manifest_value(&assembled)?,
    })))
}

// ============================================================================
// SECTION: Scaffold Handlers
// ============================================================================

/// `POST /scenarios/generate`: scaffold a scenario from a template.
async fn generate_scenario_route(body: Bytes) -> Result<Json<Value>, ApiError> {
    let request: GenerateRequest = decode_shell(&body)?;
    let scaffold = ScaffoldRequest {
        template_id: request.template_id,
        display_name: request.display_name,
        slug: request.slug,
        dry_run: request.dry_run,
    };
    let outcome =
        run_blocking(move || generate_scenario(&scaffold).map_err(ApiError::from)).await?;
    let status = if outcome.dry_run { "planned" } else { "generated" };
    Ok(Json(json!({
        "status": status,
        "output_dir": outcome.output_dir.display().to_string(),
        "planned_paths": outcome.planned_paths,
    })))
}

/// `GET /scenarios/generated`: list scenarios under the output root.
async fn list_generated_route() -> Result<Json<Value>, ApiError> {
    let records = run_blocking(move || list_generated().map_err(ApiError::from)).await?;
    Ok(Json(json!({ "scenarios": records })))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a request shell, mapping failures to 400s.
fn decode_shell<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|err| ApiError::bad_request(format!("request body did not decode: {err}")))
}

/// Serializes a manifest into a response value.
fn manifest_value(manifest: &BundleManifest) -> Result<Value, ApiError> {
    serde_json::to_value(manifest)
        .map_err(|err| ApiError::internal(format!("manifest did not serialize: {err}")))
}

/// Runs blocking engine work on the worker pool.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| ApiError::internal(format!("worker task failed: {err}")))?
}
