// deskpack-core/src/core/mod.rs
// ============================================================================
// Module: DeskPack Core Types
// Description: Manifest data model, secret plans, tier policy, and graph analysis.
// Purpose: Define the value objects and pure policies of the bundle engine.
// Dependencies: crate::core::{graph, manifest, plan, tier}
// ============================================================================

//! ## Overview
//! Core types are value objects: manifests are created from JSON input,
//! mutated only by the secret merger, and never shared across requests. The
//! tier fitness table and the recognized-value sets are immutable for the
//! process lifetime.

/// Dependency-graph cycle detection.
pub mod graph;
/// Bundle manifest data model.
pub mod manifest;
/// External secret plan shape.
pub mod plan;
/// Tier fitness policy.
pub mod tier;

pub use graph::detect_cycles;
pub use manifest::AppInfo;
pub use manifest::AssetEntry;
pub use manifest::BinarySpec;
pub use manifest::BundleManifest;
pub use manifest::CheckSpec;
pub use manifest::IpcConfig;
pub use manifest::PortRange;
pub use manifest::PortRequest;
pub use manifest::PortsConfig;
pub use manifest::SECRET_CLASS_INFRASTRUCTURE;
pub use manifest::SECRET_CLASSES;
pub use manifest::SECRET_TARGET_TYPES;
pub use manifest::SERVICE_TYPES;
pub use manifest::SUPPORTED_IPC_MODE;
pub use manifest::SUPPORTED_SCHEMA_VERSION;
pub use manifest::SUPPORTED_TARGET;
pub use manifest::is_recognized_secret_class;
pub use manifest::is_recognized_service_type;
pub use manifest::is_supported_target_type;
pub use manifest::Secret;
pub use manifest::SecretPrompt;
pub use manifest::SecretTarget;
pub use manifest::Service;
pub use manifest::ServicePorts;
pub use manifest::SwapEntry;
pub use manifest::TelemetryConfig;
pub use plan::BundleSecretPlan;
pub use tier::TierFitness;
pub use tier::tier_display_name;
pub use tier::tier_fitness;
