// deskpack-server/src/error.rs
// ============================================================================
// Module: API Error Mapping
// Description: Structured error categories and HTTP status mapping.
// Purpose: Give every engine failure a stable wire category and status.
// Dependencies: axum, deskpack-core, deskpack-scaffold, serde_json
// ============================================================================

//! ## Overview
//! Engine errors are categorized, not typed, on the wire: every failure
//! surfaces as `{error, details}` with a category string and a status code.
//! Caller mistakes are 400, upstream adapter trouble is 502, occupied
//! scaffold targets are 409, and schema-load or post-scaffold damage is
//! 500. A schema that never compiled outranks whatever validation stage
//! tripped over it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use deskpack_core::AdapterError;
use deskpack_core::AnalysisError;
use deskpack_core::BundleOpError;
use deskpack_core::MergeError;
use deskpack_core::SchemaError;
use deskpack_core::ValidateError;
use deskpack_scaffold::ScaffoldError;
use serde_json::json;

// ============================================================================
// SECTION: Error Shape
// ============================================================================

/// A categorized API failure, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status for the response.
    pub status: StatusCode,
    /// Stable category string.
    pub category: &'static str,
    /// Human-readable failure details.
    pub details: String,
}

impl ApiError {
    /// Builds an error from its parts.
    #[must_use]
    pub fn new(status: StatusCode, category: &'static str, details: String) -> Self {
        Self {
            status,
            category,
            details,
        }
    }

    /// A 400 for unusable request shells (missing fields, bad JSON).
    #[must_use]
    pub fn bad_request(details: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "input_invalid", details)
    }

    /// A 500 for server-side faults outside the engine's categories.
    #[must_use]
    pub fn internal(details: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.category,
            "details": self.details,
        }));
        (self.status, body).into_response()
    }
}

// ============================================================================
// SECTION: Engine Mappings
// ============================================================================

impl From<BundleOpError> for ApiError {
    fn from(err: BundleOpError) -> Self {
        let details = err.to_string();
        match err {
            BundleOpError::InputInvalid(inner) | BundleOpError::AssembledInvalid(inner) => {
                if is_schema_load(&inner) {
                    Self::new(StatusCode::INTERNAL_SERVER_ERROR, "schema_load", details)
                } else {
                    Self::new(StatusCode::BAD_REQUEST, "input_invalid", details)
                }
            }
            BundleOpError::Merge(inner) => match inner {
                MergeError::Revalidation(validate) if is_schema_load(&validate) => {
                    Self::new(StatusCode::INTERNAL_SERVER_ERROR, "schema_load", details)
                }
                MergeError::UnsupportedTarget {
                    ..
                }
                | MergeError::Revalidation(_) => {
                    Self::new(StatusCode::BAD_REQUEST, "merge_invalid", details)
                }
            },
            BundleOpError::Adapter(inner) => match inner {
                AdapterError::Unavailable(_) => {
                    Self::new(StatusCode::BAD_GATEWAY, "adapter_unavailable", details)
                }
                AdapterError::Malformed(_) => {
                    Self::new(StatusCode::BAD_GATEWAY, "adapter_malformed", details)
                }
            },
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let details = err.to_string();
        match err {
            AnalysisError::CycleDetected {
                ..
            } => Self::new(StatusCode::BAD_REQUEST, "cycle_detected", details),
        }
    }
}

impl From<ScaffoldError> for ApiError {
    fn from(err: ScaffoldError) -> Self {
        let details = err.to_string();
        match err {
            ScaffoldError::Input(_) | ScaffoldError::TemplateMissing(_) => {
                Self::new(StatusCode::BAD_REQUEST, "input_invalid", details)
            }
            ScaffoldError::Conflict(_) => {
                Self::new(StatusCode::CONFLICT, "scaffold_conflict", details)
            }
            ScaffoldError::Incomplete(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "scaffold_incomplete", details)
            }
            ScaffoldError::Io {
                ..
            }
            | ScaffoldError::Descriptor(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "scaffold_failed", details)
            }
        }
    }
}

/// Returns true when a validation failure traces back to a schema that
/// never compiled.
fn is_schema_load(err: &ValidateError) -> bool {
    matches!(err, ValidateError::Schema(SchemaError::Load(_)))
}
