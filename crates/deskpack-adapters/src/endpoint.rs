// deskpack-adapters/src/endpoint.rs
// ============================================================================
// Module: Endpoint Resolution
// Description: Environment-driven resolution of collaborator endpoints.
// Purpose: Turn env configuration into base URLs with explicit precedence.
// Dependencies: deskpack-core
// ============================================================================

//! ## Overview
//! Both collaborators are located through environment variables. The secrets
//! manager resolves explicit URL > explicit port (synthesized loopback URL).
//! The analyzer resolves explicit port > a best-effort host-tool lookup via
//! the `vrooli` CLI. Empty or missing resolution is a configuration error,
//! never a silent default endpoint.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::process::Command;

use deskpack_core::AdapterError;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Explicit secrets-manager base URL.
pub const SECRETS_MANAGER_URL: &str = "SECRETS_MANAGER_URL";
/// Alternate secrets-manager base URL key.
pub const SECRETS_MANAGER_API_URL: &str = "SECRETS_MANAGER_API_URL";
/// Secrets-manager loopback port.
pub const SECRETS_MANAGER_API_PORT: &str = "SECRETS_MANAGER_API_PORT";
/// Scenario-analyzer loopback port.
pub const SCENARIO_DEPENDENCY_ANALYZER_API_PORT: &str = "SCENARIO_DEPENDENCY_ANALYZER_API_PORT";

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the secrets-manager base URL.
///
/// Precedence: `SECRETS_MANAGER_URL` > `SECRETS_MANAGER_API_URL` >
/// `SECRETS_MANAGER_API_PORT` synthesized as `http://127.0.0.1:<port>`.
///
/// # Errors
///
/// Returns [`AdapterError::Unavailable`] when no variable resolves to a
/// non-empty value, or when the port variable is not a valid TCP port.
pub fn secrets_endpoint() -> Result<String, AdapterError> {
    if let Some(url) = env_value(SECRETS_MANAGER_URL) {
        return Ok(url);
    }
    if let Some(url) = env_value(SECRETS_MANAGER_API_URL) {
        return Ok(url);
    }
    if let Some(port) = env_value(SECRETS_MANAGER_API_PORT) {
        return loopback_url("secrets manager", &port);
    }
    Err(AdapterError::Unavailable(
        "secrets manager endpoint is not configured; set SECRETS_MANAGER_URL, \
         SECRETS_MANAGER_API_URL, or SECRETS_MANAGER_API_PORT"
            .to_string(),
    ))
}

/// Resolves the scenario-analyzer base URL.
///
/// Precedence: `SCENARIO_DEPENDENCY_ANALYZER_API_PORT` > a best-effort
/// `vrooli scenario-analyzer port` host-tool lookup.
///
/// # Errors
///
/// Returns [`AdapterError::Unavailable`] when neither the variable nor the
/// host tool yields a valid TCP port.
pub fn analyzer_endpoint() -> Result<String, AdapterError> {
    if let Some(port) = env_value(SCENARIO_DEPENDENCY_ANALYZER_API_PORT) {
        return loopback_url("scenario analyzer", &port);
    }
    let port = analyzer_port_from_host_tool()?;
    loopback_url("scenario analyzer", &port)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable, treating blank values as absent.
fn env_value(key: &str) -> Option<String> {
    let raw = env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.trim_end_matches('/').to_string())
}

/// Synthesizes a loopback base URL from a textual port.
fn loopback_url(label: &str, raw: &str) -> Result<String, AdapterError> {
    let port: u16 = raw.parse().map_err(|_| {
        AdapterError::Unavailable(format!("{label} port {raw:?} is not a valid TCP port"))
    })?;
    if port == 0 {
        return Err(AdapterError::Unavailable(format!("{label} port must be non-zero")));
    }
    Ok(format!("http://127.0.0.1:{port}"))
}

/// Asks the `vrooli` host tool for the analyzer port.
fn analyzer_port_from_host_tool() -> Result<String, AdapterError> {
    let output = Command::new("vrooli")
        .args(["scenario-analyzer", "port"])
        .output()
        .map_err(|err| {
            AdapterError::Unavailable(format!("analyzer port lookup failed: {err}"))
        })?;
    if !output.status.success() {
        return Err(AdapterError::Unavailable(
            "analyzer port lookup exited with failure".to_string(),
        ));
    }
    let port = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if port.is_empty() {
        return Err(AdapterError::Unavailable(
            "analyzer port lookup produced no output".to_string(),
        ));
    }
    Ok(port)
}
