// deskpack-core/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Fixtures
// Description: Sample manifests, plans, and schema stubs for core tests.
// Purpose: Keep bundle engine tests focused on behavior under test.
// ============================================================================

//! ## Overview
//! Fixtures mirror the happy-path manifest from the bundle contract: one
//! api-binary service with a linux-x64 binary, a tcp health check, and a
//! port_open readiness check. The schema stub accepts everything so that
//! core tests exercise domain checks in isolation; schema behavior is
//! covered by the schema crate's own tests.

#![allow(dead_code, reason = "Fixtures are shared across test binaries.")]

use std::sync::Arc;

use deskpack_core::BundleSecretPlan;
use deskpack_core::BundleValidator;
use deskpack_core::ManifestSchema;
use deskpack_core::SchemaError;
use deskpack_core::SecretPrompt;
use deskpack_core::SecretTarget;
use serde_json::Value;
use serde_json::json;

/// Schema stub that accepts every payload.
pub struct OpenSchema;

impl ManifestSchema for OpenSchema {
    fn check(&self, _payload: &Value) -> Result<(), SchemaError> {
        Ok(())
    }
}

/// Schema stub that rejects every payload at the root path.
pub struct ClosedSchema;

impl ManifestSchema for ClosedSchema {
    fn check(&self, _payload: &Value) -> Result<(), SchemaError> {
        Err(SchemaError::Violation {
            path: "/".to_string(),
            message: "rejected by test schema".to_string(),
        })
    }
}

/// Creates a validator whose schema pass accepts everything.
pub fn open_validator() -> BundleValidator {
    BundleValidator::new(Arc::new(OpenSchema))
}

/// Returns the happy-path manifest as generic JSON.
pub fn sample_manifest_value() -> Value {
    json!({
        "schema_version": "v0.1",
        "target": "desktop",
        "app": {
            "name": "demo",
            "version": "1.0.0",
            "description": "sample scenario"
        },
        "ipc": {
            "mode": "loopback-http",
            "host": "127.0.0.1",
            "port": 47710,
            "auth_token_path": "runtime/auth-token"
        },
        "telemetry": {
            "file": "telemetry.jsonl",
            "upload_url": ""
        },
        "secrets": [],
        "services": [
            {
                "id": "api",
                "type": "api-binary",
                "description": "scenario api",
                "binaries": {
                    "linux-x64": {
                        "path": "bin/api",
                        "args": ["--port", "47710"]
                    }
                },
                "health": { "type": "tcp", "port": 47710 },
                "readiness": { "type": "port_open", "port": 47710 }
            }
        ]
    })
}

/// Returns the happy-path manifest as raw bytes.
pub fn sample_manifest_bytes() -> Vec<u8> {
    sample_manifest_value().to_string().into_bytes()
}

/// Builds an env-targeted secret plan.
pub fn env_plan(id: &str) -> BundleSecretPlan {
    BundleSecretPlan {
        id: id.to_string(),
        class: "per_install_generated".to_string(),
        required: Some(true),
        description: format!("{id} for the scenario"),
        format: "string".to_string(),
        target: SecretTarget {
            target_type: "env".to_string(),
            name: id.to_string(),
        },
        prompt: None,
        generator: None,
    }
}

/// Builds a user-prompt secret plan with prompt metadata.
pub fn prompt_plan(id: &str) -> BundleSecretPlan {
    BundleSecretPlan {
        prompt: Some(SecretPrompt {
            label: format!("Enter {id}"),
            description: String::new(),
        }),
        class: "user_prompt".to_string(),
        ..env_plan(id)
    }
}
