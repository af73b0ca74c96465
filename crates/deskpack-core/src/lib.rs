// deskpack-core/src/lib.rs
// ============================================================================
// Module: DeskPack Core Library
// Description: Public API surface for the DeskPack bundle composition engine.
// Purpose: Expose manifest types, interfaces, and runtime operations.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! DeskPack core turns a scenario identifier plus a tier selector into a fully
//! validated desktop bundle manifest. It owns the manifest data model, the
//! two-stage validator, the secret merger, the dependency-graph cycle
//! detector, and the tier fitness policy. External collaborators (the
//! scenario analyzer and the secrets manager) integrate through explicit
//! interfaces rather than concrete clients.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::AdapterError;
pub use interfaces::ManifestSchema;
pub use interfaces::SchemaError;
pub use interfaces::SecretPlanSource;
pub use interfaces::SkeletonSource;
pub use runtime::AnalysisError;
pub use runtime::BundleOpError;
pub use runtime::BundleOrchestrator;
pub use runtime::BundleValidator;
pub use runtime::MergeError;
pub use runtime::OrchestratorConfig;
pub use runtime::ScenarioAnalysis;
pub use runtime::SecretMerger;
pub use runtime::ValidateError;
pub use runtime::analyze_scenario;
