// deskpack-core/src/interfaces/mod.rs
// ============================================================================
// Module: DeskPack Interfaces
// Description: Contracts between the bundle engine and its collaborators.
// Purpose: Define adapter and schema seams without embedding clients.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The bundle engine talks to the scenario analyzer, the secrets manager, and
//! the compiled bundle schema through these interfaces. Implementations must
//! be injectable for tests, honor caller deadlines, and fail closed: missing
//! or malformed collaborator data is an error, never a silent default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::core::manifest::BundleManifest;
use crate::core::plan::BundleSecretPlan;

// ============================================================================
// SECTION: Schema Seam
// ============================================================================

/// Schema-loader errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema could not be read or compiled. Memoized by loaders: the
    /// first failure is returned on every subsequent call.
    #[error("bundle schema unavailable: {0}")]
    Load(String),
    /// The payload violates the schema.
    #[error("schema violation at {path}: {message}")]
    Violation {
        /// Offending instance path inside the payload.
        path: String,
        /// Violation message from the schema engine.
        message: String,
    },
}

/// Compiled, process-wide JSON Schema for desktop bundles.
pub trait ManifestSchema: Send + Sync {
    /// Checks a generic JSON payload against the bundle schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Load`] when the schema never compiled and
    /// [`SchemaError::Violation`] with the offending path otherwise.
    fn check(&self, payload: &Value) -> Result<(), SchemaError>;
}

// ============================================================================
// SECTION: Adapter Seams
// ============================================================================

/// Errors surfaced by external adapter calls.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The collaborator could not be reached, returned a non-2xx status, or
    /// its endpoint could not be resolved from configuration.
    #[error("adapter unavailable: {0}")]
    Unavailable(String),
    /// The collaborator answered with JSON missing required fields or with a
    /// skeleton that fails validation.
    #[error("adapter returned malformed response: {0}")]
    Malformed(String),
}

/// Source of scenario skeleton manifests (the external analyzer).
pub trait SkeletonSource {
    /// Fetches and validates the skeleton manifest for a scenario.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the analyzer is unreachable, answers
    /// with a non-2xx status, or produces a non-conforming skeleton.
    fn fetch_skeleton(
        &self,
        scenario: &str,
        deadline: Duration,
    ) -> Result<BundleManifest, AdapterError>;
}

/// Source of bundle secret plans (the external secrets manager).
pub trait SecretPlanSource {
    /// Fetches the secret plans for a (scenario, tier) pair.
    ///
    /// An absent plan list on the wire decodes as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the secrets manager is unreachable or
    /// answers with malformed JSON.
    fn fetch_plans(
        &self,
        scenario: &str,
        tier: &str,
        deadline: Duration,
    ) -> Result<Vec<BundleSecretPlan>, AdapterError>;
}
