// deskpack-scaffold/src/lib.rs
// ============================================================================
// Module: DeskPack Scaffold Library
// Description: Scenario scaffolder over template payload trees.
// Purpose: Materialize new scenario directories from factory templates.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! The scaffolder turns a factory template payload into a new scenario
//! directory: a recursive mode-preserving copy minus factory-only entries,
//! a rewritten service descriptor, rewritten workspace package specifiers,
//! and a provenance stamp. Failures abort without rolling back partial
//! writes; callers delete the target directory when retry safety matters.
//! Dry runs plan the copy without touching the filesystem.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Service descriptor and package specifier rewrites.
pub mod descriptor;
/// Scaffold generation pipeline.
pub mod generate;
/// Generated scenario recovery from the output root.
pub mod records;
/// Template records and payload-root resolution.
pub mod template;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use generate::ScaffoldError;
pub use generate::ScaffoldOutcome;
pub use generate::ScaffoldRequest;
pub use generate::generate_scenario;
pub use records::GeneratedScenarioRecord;
pub use records::list_generated;
pub use template::TemplateRecord;
