// deskpack-schema/src/lib.rs
// ============================================================================
// Module: DeskPack Schema Library
// Description: Canonical desktop-bundle JSON Schema and compiled loader.
// Purpose: Provide the authoritative schema pass for bundle validation.
// Dependencies: deskpack-core, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! This crate owns the authoritative JSON Schema for desktop bundle
//! manifests and the process-wide compiled validator built from it. The
//! schema document is generated from builder functions so that tooling,
//! docs, and validation pipelines share one canonical source. Compilation
//! happens exactly once per process, and the result is memoized for the
//! process lifetime whether it succeeded or failed.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// One-shot compiled schema loader.
pub mod loader;
/// Schema document builders.
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use loader::CompiledBundleSchema;
pub use loader::compiled;
pub use schema::bundle_schema;
