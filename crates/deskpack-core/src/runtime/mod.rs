// deskpack-core/src/runtime/mod.rs
// ============================================================================
// Module: DeskPack Runtime
// Description: Validator, merger, orchestrator, and scenario analysis.
// Purpose: Execute bundle composition operations over the core types.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime operations are pure with respect to local state: repeated
//! invocations with identical inputs and a stable external world yield
//! byte-identical manifests. The only process-wide mutable state in the
//! engine lives behind the schema loader seam.

/// Scenario analysis (cycle rejection plus tier annotation).
pub mod analysis;
/// Secret plan merging.
pub mod merge;
/// Bundle orchestration operations.
pub mod orchestrator;
/// Two-stage manifest validation.
pub mod validate;

pub use analysis::AnalysisError;
pub use analysis::ScenarioAnalysis;
pub use analysis::analyze_scenario;
pub use merge::MergeError;
pub use merge::SecretMerger;
pub use orchestrator::BundleOpError;
pub use orchestrator::DEFAULT_TIER;
pub use orchestrator::BundleOrchestrator;
pub use orchestrator::OrchestratorConfig;
pub use validate::BundleValidator;
pub use validate::ValidateError;
