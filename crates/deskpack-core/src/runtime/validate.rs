// deskpack-core/src/runtime/validate.rs
// ============================================================================
// Module: Bundle Validator
// Description: Two-stage validation of desktop bundle manifests.
// Purpose: Reject malformed or semantically invalid manifests early.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! Validation runs in two passes: strict decode plus ordered domain checks,
//! then the compiled JSON Schema over the raw payload. The first failing
//! check wins and short-circuits the rest. Validation is a pure predicate:
//! identical bytes always yield identical verdicts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::core::manifest::BundleManifest;
use crate::core::manifest::SUPPORTED_IPC_MODE;
use crate::core::manifest::SUPPORTED_SCHEMA_VERSION;
use crate::core::manifest::SUPPORTED_TARGET;
use crate::core::manifest::Secret;
use crate::core::manifest::Service;
use crate::core::manifest::is_recognized_secret_class;
use crate::core::manifest::is_recognized_service_type;
use crate::core::manifest::is_supported_target_type;
use crate::interfaces::ManifestSchema;
use crate::interfaces::SchemaError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Manifest validation errors.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The payload carried fields outside the manifest contract.
    #[error("manifest contains unexpected fields: {0}")]
    UnexpectedFields(String),
    /// The payload could not be decoded as a bundle manifest.
    #[error("manifest failed to decode: {0}")]
    Decode(String),
    /// A domain invariant does not hold.
    #[error("{0}")]
    Domain(String),
    /// The schema pass rejected the payload, or the schema never loaded.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Classifies a serde decode failure, surfacing unknown-field rejections
/// under the stable "unexpected fields" message.
fn classify_decode_error(err: &serde_json::Error) -> ValidateError {
    let message = err.to_string();
    if message.contains("unknown field") {
        ValidateError::UnexpectedFields(message)
    } else {
        ValidateError::Decode(message)
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Two-stage bundle manifest validator.
#[derive(Clone)]
pub struct BundleValidator {
    /// Compiled schema used for the second validation pass.
    schema: Arc<dyn ManifestSchema>,
}

impl BundleValidator {
    /// Creates a validator over a compiled bundle schema.
    #[must_use]
    pub fn new(schema: Arc<dyn ManifestSchema>) -> Self {
        Self {
            schema,
        }
    }

    /// Validates raw manifest bytes and returns the decoded manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError`] on decode failures, unexpected fields,
    /// domain violations, or schema violations, in that order.
    pub fn validate_bytes(&self, raw: &[u8]) -> Result<BundleManifest, ValidateError> {
        let payload: Value =
            serde_json::from_slice(raw).map_err(|err| ValidateError::Decode(err.to_string()))?;
        let manifest: BundleManifest =
            serde_json::from_value(payload.clone()).map_err(|err| classify_decode_error(&err))?;
        check_domain(&manifest)?;
        self.schema.check(&payload)?;
        Ok(manifest)
    }

    /// Validates an already-decoded manifest by re-serializing it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError`] on domain or schema violations.
    pub fn validate_manifest(&self, manifest: &BundleManifest) -> Result<(), ValidateError> {
        check_domain(manifest)?;
        let payload = serde_json::to_value(manifest)
            .map_err(|err| ValidateError::Decode(err.to_string()))?;
        self.schema.check(&payload)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Domain Checks
// ============================================================================

/// Applies the ordered domain checks, short-circuiting on first failure.
fn check_domain(manifest: &BundleManifest) -> Result<(), ValidateError> {
    check_envelope(manifest)?;
    for secret in &manifest.secrets {
        check_secret(secret)?;
    }
    for service in &manifest.services {
        check_service(service)?;
    }
    Ok(())
}

/// Checks the manifest envelope: version, target, app, ipc, telemetry,
/// services presence.
fn check_envelope(manifest: &BundleManifest) -> Result<(), ValidateError> {
    if manifest.schema_version != SUPPORTED_SCHEMA_VERSION {
        return Err(domain(format!(
            "schema_version must be {SUPPORTED_SCHEMA_VERSION}, got {}",
            manifest.schema_version
        )));
    }
    if manifest.target != SUPPORTED_TARGET {
        return Err(domain(format!(
            "target must be {SUPPORTED_TARGET}, got {}",
            manifest.target
        )));
    }
    if manifest.app.name.is_empty() {
        return Err(domain("app.name must not be empty".to_string()));
    }
    if manifest.app.version.is_empty() {
        return Err(domain("app.version must not be empty".to_string()));
    }
    if manifest.ipc.mode != SUPPORTED_IPC_MODE {
        return Err(domain(format!(
            "ipc.mode must be {SUPPORTED_IPC_MODE}, got {}",
            manifest.ipc.mode
        )));
    }
    if manifest.ipc.host.is_empty() {
        return Err(domain("ipc.host must not be empty".to_string()));
    }
    if manifest.ipc.port == 0 {
        return Err(domain("ipc.port must be non-zero".to_string()));
    }
    if manifest.ipc.auth_token_path.is_empty() {
        return Err(domain("ipc.auth_token_path must not be empty".to_string()));
    }
    if manifest.telemetry.file.is_empty() {
        return Err(domain("telemetry.file must not be empty".to_string()));
    }
    if manifest.services.is_empty() {
        return Err(domain("services must not be empty".to_string()));
    }
    Ok(())
}

/// Checks one secret entry.
fn check_secret(secret: &Secret) -> Result<(), ValidateError> {
    if !is_recognized_secret_class(&secret.class) {
        return Err(domain(format!(
            "secret {}: unrecognized class {}",
            secret.id, secret.class
        )));
    }
    if !is_supported_target_type(&secret.target.target_type) {
        return Err(domain(format!(
            "secret {}: target.type must be one of env, file",
            secret.id
        )));
    }
    if secret.target.name.is_empty() {
        return Err(domain(format!("secret {}: target.name must not be empty", secret.id)));
    }
    Ok(())
}

/// Checks one service entry.
fn check_service(service: &Service) -> Result<(), ValidateError> {
    if service.id.is_empty() {
        return Err(domain("service id must not be empty".to_string()));
    }
    if !is_recognized_service_type(&service.service_type) {
        return Err(domain(format!(
            "service {}: unrecognized type {}",
            service.id, service.service_type
        )));
    }
    if service.binaries.is_empty() {
        return Err(domain(format!("service {}: binaries must not be empty", service.id)));
    }
    for (platform, binary) in &service.binaries {
        if binary.path.is_empty() {
            return Err(domain(format!(
                "service {}: binary for {platform} has an empty path",
                service.id
            )));
        }
    }
    if service.health.check_type.is_empty() {
        return Err(domain(format!("service {}: health.type must not be empty", service.id)));
    }
    if service.readiness.check_type.is_empty() {
        return Err(domain(format!(
            "service {}: readiness.type must not be empty",
            service.id
        )));
    }
    Ok(())
}

/// Wraps a domain-check message.
fn domain(message: String) -> ValidateError {
    ValidateError::Domain(message)
}
