// deskpack-schema/src/schema.rs
// ============================================================================
// Module: Desktop Bundle Schema
// Description: JSON Schema builders for desktop bundle manifests.
// Purpose: Provide the canonical validation schema for bundle artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The schema mirrors the manifest data model: closed objects everywhere
//! except the health/readiness checks and secret generators, which are open
//! maps by contract. Two deliberate widenings are load bearing: `required`
//! on secrets stays optional so the merger's unset/true/false tri-state
//! round-trips, and secret ids are NOT required to be unique. Duplicates
//! pass through to downstream tooling unchanged.

use serde_json::Value;
use serde_json::json;

/// Returns the JSON Schema for desktop bundle manifests.
#[must_use]
pub fn bundle_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "deskpack://schemas/desktop-bundle.v0.1.json",
        "title": "Desktop Bundle Manifest",
        "description": "Describes how a platform scenario is packaged for local desktop execution.",
        "type": "object",
        "properties": {
            "schema_version": {
                "const": "v0.1",
                "description": "Manifest schema version token."
            },
            "target": {
                "const": "desktop",
                "description": "Bundling target."
            },
            "app": app_schema(),
            "ipc": ipc_schema(),
            "telemetry": telemetry_schema(),
            "ports": ports_schema(),
            "swaps": {
                "type": "array",
                "items": swap_schema(),
                "description": "Dependency swaps applied during bundling."
            },
            "secrets": {
                "type": "array",
                "items": secret_schema(),
                "default": [],
                "description": "Bundle secrets. May be empty."
            },
            "services": {
                "type": "array",
                "items": service_schema(),
                "minItems": 1,
                "description": "Bundled services."
            }
        },
        "required": ["schema_version", "target", "app", "ipc", "telemetry", "services"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Envelope Sections
// ============================================================================

/// Schema for the application envelope.
fn app_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": non_empty_string("Application display name."),
            "version": non_empty_string("Application version string."),
            "description": {
                "type": "string",
                "default": "",
                "description": "Free-form description."
            }
        },
        "required": ["name", "version"],
        "additionalProperties": false
    })
}

/// Schema for IPC wiring.
fn ipc_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "mode": {
                "const": "loopback-http",
                "description": "IPC mode for desktop bundles."
            },
            "host": non_empty_string("Loopback host for IPC traffic."),
            "port": {
                "type": "integer",
                "minimum": 1,
                "maximum": 65535,
                "description": "IPC port."
            },
            "auth_token_path": non_empty_string("Path to the per-install IPC auth token.")
        },
        "required": ["mode", "host", "port", "auth_token_path"],
        "additionalProperties": false
    })
}

/// Schema for the telemetry sink.
fn telemetry_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "file": non_empty_string("Local telemetry spool file."),
            "upload_url": {
                "type": "string",
                "default": "",
                "description": "Optional upload endpoint for spooled telemetry."
            }
        },
        "required": ["file"],
        "additionalProperties": false
    })
}

/// Schema for the port allocation policy.
fn ports_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "default_range": port_range_schema(),
            "reserved": {
                "type": "array",
                "items": { "type": "integer" },
                "default": [],
                "description": "Ports excluded from allocation."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for an inclusive port range.
fn port_range_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "min": { "type": "integer", "description": "Lowest allocatable port." },
            "max": { "type": "integer", "description": "Highest allocatable port." }
        },
        "required": ["min", "max"],
        "additionalProperties": false
    })
}

/// Schema for a dependency swap entry.
fn swap_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "original": non_empty_string("Original dependency identifier."),
            "replacement": non_empty_string("Replacement dependency identifier."),
            "reason": { "type": "string", "default": "" },
            "limitations": { "type": "string", "default": "" }
        },
        "required": ["original", "replacement"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Secrets
// ============================================================================

/// Schema for a bundle secret.
fn secret_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": non_empty_string("Secret identifier."),
            "class": {
                "type": "string",
                "enum": ["", "infrastructure", "per_install_generated", "user_prompt", "remote_fetch"],
                "default": "",
                "description": "Secret class. Empty is allowed for legacy secrets."
            },
            "description": { "type": "string", "default": "" },
            "format": { "type": "string", "default": "" },
            "required": {
                "type": "boolean",
                "description": "Whether the secret is required. Absence means unspecified."
            },
            "prompt": prompt_schema(),
            "generator": {
                "type": "object",
                "description": "Generator parameters (open map)."
            },
            "target": secret_target_schema()
        },
        "required": ["id", "target"],
        "additionalProperties": false
    })
}

/// Schema for interactive prompt metadata.
fn prompt_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "label": non_empty_string("Prompt label shown to the user."),
            "description": { "type": "string", "default": "" }
        },
        "required": ["label"],
        "additionalProperties": false
    })
}

/// Schema for a secret delivery target.
fn secret_target_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": {
                "type": "string",
                "enum": ["env", "file"],
                "description": "Delivery target type."
            },
            "name": non_empty_string("Environment variable name or file path.")
        },
        "required": ["type", "name"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Services
// ============================================================================

/// Schema for a bundled service.
fn service_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": non_empty_string("Service identifier."),
            "type": {
                "type": "string",
                "enum": ["ui-bundle", "api-binary", "worker", "resource"],
                "description": "Service type."
            },
            "description": { "type": "string", "default": "" },
            "binaries": {
                "type": "object",
                "minProperties": 1,
                "additionalProperties": binary_schema(),
                "description": "Per-platform binaries."
            },
            "env": {
                "type": "object",
                "additionalProperties": { "type": "string" },
                "default": {},
                "description": "Static environment for the service."
            },
            "secrets": {
                "type": "array",
                "items": { "type": "string" },
                "default": [],
                "description": "Secret identifiers consumed by the service."
            },
            "data_dirs": {
                "type": "array",
                "items": { "type": "string" },
                "default": [],
                "description": "Data directories created for the service."
            },
            "log_dir": { "type": "string", "default": "" },
            "ports": service_ports_schema(),
            "health": check_schema("Health check definition."),
            "readiness": check_schema("Readiness check definition."),
            "dependencies": {
                "type": "array",
                "items": { "type": "string" },
                "default": [],
                "description": "Identifiers of services this service depends on."
            },
            "migrations": {
                "description": "Migration configuration (opaque to the engine)."
            },
            "assets": {
                "type": "array",
                "items": asset_schema(),
                "default": [],
                "description": "Static assets shipped with the service."
            },
            "gpu": {
                "description": "GPU requirements (opaque to the engine)."
            },
            "critical": {
                "type": "boolean",
                "description": "Whether bundle startup fails when this service fails."
            }
        },
        "required": ["id", "type", "binaries", "health", "readiness"],
        "additionalProperties": false
    })
}

/// Schema for a per-platform binary definition.
fn binary_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "path": non_empty_string("Binary path relative to the bundle root."),
            "args": {
                "type": "array",
                "items": { "type": "string" },
                "default": []
            },
            "env": {
                "type": "object",
                "additionalProperties": { "type": "string" },
                "default": {}
            },
            "cwd": { "type": "string", "default": "" }
        },
        "required": ["path"],
        "additionalProperties": false
    })
}

/// Schema for service port requests.
fn service_ports_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "requested": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": non_empty_string("Port name referenced at runtime."),
                        "range": port_range_schema(),
                        "requires_socket": { "type": "boolean", "default": false }
                    },
                    "required": ["name"],
                    "additionalProperties": false
                },
                "default": []
            }
        },
        "additionalProperties": false
    })
}

/// Schema for a health or readiness check. Checks are open maps: only the
/// `type` discriminator is constrained.
fn check_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "type": non_empty_string("Check type discriminator.")
        },
        "required": ["type"]
    })
}

/// Schema for a static asset entry.
fn asset_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "path": non_empty_string("Asset path relative to the bundle root."),
            "sha256": { "type": "string", "default": "" },
            "size_bytes": { "type": "integer", "default": 0 }
        },
        "required": ["path"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Schema fragment for a non-empty string.
fn non_empty_string(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": description
    })
}
