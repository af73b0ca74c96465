// deskpack-core/src/core/manifest.rs
// ============================================================================
// Module: Desktop Bundle Manifest
// Description: Manifest data model for desktop bundle composition.
// Purpose: Define the strict wire shape of desktop bundle manifests.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The bundle manifest describes how a scenario is packaged for local desktop
//! execution: the application envelope, IPC and telemetry wiring, secrets,
//! and service definitions. Decoding is strict; unknown fields anywhere in a
//! closed struct are rejected so that upstream collaborators cannot smuggle
//! unvalidated extensions into assembled bundles. Health, readiness, and
//! generator sections are open maps by contract and flatten their extras.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Supported Values
// ============================================================================

/// The single supported manifest schema version token.
pub const SUPPORTED_SCHEMA_VERSION: &str = "v0.1";

/// The single supported bundling target.
pub const SUPPORTED_TARGET: &str = "desktop";

/// The single supported IPC mode for desktop bundles.
pub const SUPPORTED_IPC_MODE: &str = "loopback-http";

/// Secret class that must never be shipped inside a bundle.
pub const SECRET_CLASS_INFRASTRUCTURE: &str = "infrastructure";

/// Recognized secret classes. The empty class is allowed for legacy secrets.
pub const SECRET_CLASSES: [&str; 5] =
    ["", SECRET_CLASS_INFRASTRUCTURE, "per_install_generated", "user_prompt", "remote_fetch"];

/// Supported secret target types.
pub const SECRET_TARGET_TYPES: [&str; 2] = ["env", "file"];

/// Recognized service types.
pub const SERVICE_TYPES: [&str; 4] = ["ui-bundle", "api-binary", "worker", "resource"];

/// Returns true when the secret class is recognized.
#[must_use]
pub fn is_recognized_secret_class(class: &str) -> bool {
    SECRET_CLASSES.contains(&class)
}

/// Returns true when the secret target type is supported.
#[must_use]
pub fn is_supported_target_type(target_type: &str) -> bool {
    SECRET_TARGET_TYPES.contains(&target_type)
}

/// Returns true when the service type is recognized.
#[must_use]
pub fn is_recognized_service_type(service_type: &str) -> bool {
    SERVICE_TYPES.contains(&service_type)
}

// ============================================================================
// SECTION: Manifest Root
// ============================================================================

/// Desktop bundle manifest root entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleManifest {
    /// Manifest schema version token. Must equal [`SUPPORTED_SCHEMA_VERSION`].
    pub schema_version: String,
    /// Bundling target. Must equal [`SUPPORTED_TARGET`].
    pub target: String,
    /// Application envelope.
    pub app: AppInfo,
    /// IPC wiring between bundled services.
    pub ipc: IpcConfig,
    /// Telemetry sink configuration.
    pub telemetry: TelemetryConfig,
    /// Optional port allocation policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<PortsConfig>,
    /// Optional dependency swaps applied during bundling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swaps: Option<Vec<SwapEntry>>,
    /// Bundle secrets. May be empty; skeletons arrive without this section.
    #[serde(default)]
    pub secrets: Vec<Secret>,
    /// Bundled services. Must be non-empty.
    pub services: Vec<Service>,
}

/// Application envelope of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppInfo {
    /// Application display name.
    pub name: String,
    /// Application version string.
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// IPC wiring for bundled services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IpcConfig {
    /// IPC mode. Must equal [`SUPPORTED_IPC_MODE`].
    pub mode: String,
    /// Loopback host for IPC traffic.
    pub host: String,
    /// IPC port. Must be non-zero.
    pub port: i64,
    /// Path to the per-install IPC auth token.
    pub auth_token_path: String,
}

/// Telemetry sink configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Local telemetry spool file.
    pub file: String,
    /// Optional upload endpoint for spooled telemetry.
    #[serde(default)]
    pub upload_url: String,
}

/// Port allocation policy for the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortsConfig {
    /// Default range ports are allocated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_range: Option<PortRange>,
    /// Ports excluded from allocation.
    #[serde(default)]
    pub reserved: Vec<i64>,
}

/// Inclusive port range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortRange {
    /// Lowest allocatable port.
    pub min: i64,
    /// Highest allocatable port.
    pub max: i64,
}

/// Dependency swap applied while assembling the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwapEntry {
    /// Original dependency identifier.
    pub original: String,
    /// Replacement dependency identifier.
    pub replacement: String,
    /// Reason the swap is required for desktop execution.
    #[serde(default)]
    pub reason: String,
    /// Known limitations introduced by the swap.
    #[serde(default)]
    pub limitations: String,
}

// ============================================================================
// SECTION: Secrets
// ============================================================================

/// Secret carried by a bundle manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Secret {
    /// Secret identifier.
    pub id: String,
    /// Secret class. Empty is allowed for legacy secrets.
    #[serde(default)]
    pub class: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Value format hint.
    #[serde(default)]
    pub format: String,
    /// Whether the secret is required. `None` means unspecified; the
    /// distinction from `Some(false)` must survive round-trips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Optional interactive prompt metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<SecretPrompt>,
    /// Optional generator parameters (open map).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<Map<String, Value>>,
    /// Delivery target inside the bundle.
    pub target: SecretTarget,
}

impl Secret {
    /// Returns true when the secret may be shipped inside a bundle.
    ///
    /// Infrastructure-class secrets belong to the host platform and are never
    /// bundle-safe.
    #[must_use]
    pub fn bundle_safe(&self) -> bool {
        self.class != SECRET_CLASS_INFRASTRUCTURE
    }
}

/// Interactive prompt metadata for user-supplied secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretPrompt {
    /// Prompt label shown to the user.
    pub label: String,
    /// Longer prompt description.
    #[serde(default)]
    pub description: String,
}

/// Delivery target for a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretTarget {
    /// Target type: `env` or `file`.
    #[serde(rename = "type")]
    pub target_type: String,
    /// Environment variable name or file path.
    pub name: String,
}

// ============================================================================
// SECTION: Services
// ============================================================================

/// Service definition inside a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    /// Service identifier.
    pub id: String,
    /// Service type: ui-bundle, api-binary, worker, or resource.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Per-platform binaries. Must be non-empty with non-empty paths.
    pub binaries: BTreeMap<String, BinarySpec>,
    /// Static environment for the service.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Secret identifiers consumed by the service.
    #[serde(default)]
    pub secrets: Vec<String>,
    /// Data directories created for the service.
    #[serde(default)]
    pub data_dirs: Vec<String>,
    /// Log directory for the service.
    #[serde(default)]
    pub log_dir: String,
    /// Optional port requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<ServicePorts>,
    /// Health check definition. The `type` discriminator must be non-empty.
    pub health: CheckSpec,
    /// Readiness check definition. The `type` discriminator must be non-empty.
    pub readiness: CheckSpec,
    /// Identifiers of services this service depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Optional migration configuration (opaque to the engine).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrations: Option<Value>,
    /// Static assets shipped with the service.
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
    /// Optional GPU requirements (opaque to the engine).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<Value>,
    /// Whether bundle startup fails when this service fails. `None` means
    /// unspecified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
}

/// Per-platform binary definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinarySpec {
    /// Binary path relative to the bundle root. Must be non-empty.
    pub path: String,
    /// Launch arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Launch environment overrides.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Working directory for the binary.
    #[serde(default)]
    pub cwd: String,
}

/// Port requests for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServicePorts {
    /// Requested port allocations.
    #[serde(default)]
    pub requested: Vec<PortRequest>,
}

/// A single requested port allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortRequest {
    /// Port name referenced by the service at runtime.
    pub name: String,
    /// Optional range restriction for the allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<PortRange>,
    /// Whether a bound socket must be handed to the service.
    #[serde(default)]
    pub requires_socket: bool,
}

/// Health or readiness check definition.
///
/// Checks are open maps by contract: only the `type` discriminator is fixed,
/// and check-specific parameters flatten into `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSpec {
    /// Check type discriminator. Must be non-empty.
    #[serde(rename = "type")]
    pub check_type: String,
    /// Check-specific parameters.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Static asset shipped with a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetEntry {
    /// Asset path relative to the bundle root.
    pub path: String,
    /// Hex SHA-256 digest of the asset.
    #[serde(default)]
    pub sha256: String,
    /// Asset size in bytes.
    #[serde(default)]
    pub size_bytes: i64,
}
