// deskpack-adapters/src/lib.rs
// ============================================================================
// Module: DeskPack Adapters Library
// Description: HTTP clients for the analyzer and secrets-manager collaborators.
// Purpose: Implement the engine's adapter seams against real services.
// Dependencies: deskpack-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! The bundle engine consumes two external collaborators: the scenario
//! analyzer (skeleton manifests) and the secrets manager (bundle secret
//! plans). This crate implements [`deskpack_core::SkeletonSource`] and
//! [`deskpack_core::SecretPlanSource`] with bounded blocking HTTP clients:
//! redirects disabled, caller-supplied per-request deadlines, and error
//! bodies capped before they are echoed into error messages. Endpoint
//! resolution is environment-driven with an explicit precedence order.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Scenario analyzer client (skeleton manifests).
pub mod analyzer;
/// Environment-driven endpoint resolution.
pub mod endpoint;
/// Shared HTTP plumbing: client construction and bounded body reads.
mod http;
/// Secrets manager client (bundle secret plans).
pub mod secrets;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use analyzer::ScenarioAnalyzerClient;
pub use endpoint::analyzer_endpoint;
pub use endpoint::secrets_endpoint;
pub use secrets::SecretsManagerClient;
