// deskpack-schema/src/loader.rs
// ============================================================================
// Module: Schema Loader
// Description: One-shot compilation of the desktop bundle schema.
// Purpose: Expose a process-wide validator with memoized failure.
// Dependencies: crate::schema, deskpack-core, jsonschema
// ============================================================================

//! ## Overview
//! The compiled validator is the only process-wide mutable state in the
//! bundle engine. Construction happens under a one-shot guard: concurrent
//! callers observe the same result, and a compile failure is memoized and
//! returned on every subsequent call. The loader never retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use deskpack_core::ManifestSchema;
use deskpack_core::SchemaError;
use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;

use crate::schema::bundle_schema;

// ============================================================================
// SECTION: One-Shot Compilation
// ============================================================================

/// Memoized compilation result for the process lifetime.
static COMPILED: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Returns the process-wide compiled bundle schema validator.
///
/// # Errors
///
/// Returns [`SchemaError::Load`] carrying the original compile failure; the
/// same error is returned on every call after the first failure.
pub fn compiled() -> Result<&'static Validator, SchemaError> {
    match COMPILED.get_or_init(compile) {
        Ok(validator) => Ok(validator),
        Err(message) => Err(SchemaError::Load(message.clone())),
    }
}

/// Compiles the canonical schema document.
fn compile() -> Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&bundle_schema())
        .map_err(|err| format!("schema compile failed: {err}"))
}

// ============================================================================
// SECTION: Schema Seam Implementation
// ============================================================================

/// [`ManifestSchema`] implementation backed by the process-wide validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledBundleSchema;

impl CompiledBundleSchema {
    /// Creates a handle to the process-wide compiled schema.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ManifestSchema for CompiledBundleSchema {
    fn check(&self, payload: &Value) -> Result<(), SchemaError> {
        let validator = compiled()?;
        if let Some(err) = validator.iter_errors(payload).next() {
            return Err(SchemaError::Violation {
                path: err.instance_path().to_string(),
                message: err.to_string(),
            });
        }
        Ok(())
    }
}
