// deskpack-core/src/runtime/orchestrator.rs
// ============================================================================
// Module: Bundle Orchestrator
// Description: Public validate / merge-secrets / assemble operations.
// Purpose: Coordinate adapters, merger, and validator for bundle composition.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The orchestrator is the single canonical execution path for bundle
//! composition. All API surfaces call into these methods. Within one
//! operation the skeleton → secrets → merge → validate ordering is strict;
//! across operations there is no shared mutable state, so repeated
//! invocations against a stable external world yield byte-identical
//! manifests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use thiserror::Error;

use crate::core::manifest::BundleManifest;
use crate::interfaces::AdapterError;
use crate::interfaces::SecretPlanSource;
use crate::interfaces::SkeletonSource;
use crate::runtime::merge::MergeError;
use crate::runtime::merge::SecretMerger;
use crate::runtime::validate::BundleValidator;
use crate::runtime::validate::ValidateError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Tier selector used when the caller does not supply one.
pub const DEFAULT_TIER: &str = "tier-2-desktop";

/// Configuration for the bundle orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Tier selector applied when a request omits the tier.
    pub default_tier: String,
    /// Total wall-clock budget for all adapter calls during `assemble`.
    pub assemble_deadline: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_tier: DEFAULT_TIER.to_string(),
            assemble_deadline: Duration::from_secs(10),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Bundle operation errors, categorized for transport mapping.
#[derive(Debug, Error)]
pub enum BundleOpError {
    /// The inbound manifest failed decode or validation.
    #[error("invalid manifest: {0}")]
    InputInvalid(#[source] ValidateError),
    /// The merge step rejected the plans or the merged manifest.
    #[error(transparent)]
    Merge(#[from] MergeError),
    /// An adapter call failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// The assembled manifest failed the final validation pass, meaning the
    /// upstream analyzer produced a non-conforming skeleton.
    #[error("assembled manifest failed validation: {0}")]
    AssembledInvalid(#[source] ValidateError),
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Coordinates skeleton fetch, secret planning, merging, and validation.
pub struct BundleOrchestrator<S, P> {
    /// Skeleton source (the external scenario analyzer).
    skeleton: S,
    /// Secret plan source (the external secrets manager).
    secrets: P,
    /// Two-stage manifest validator.
    validator: BundleValidator,
    /// Secret merger bound to the same validator.
    merger: SecretMerger,
    /// Orchestrator configuration.
    config: OrchestratorConfig,
}

impl<S, P> BundleOrchestrator<S, P>
where
    S: SkeletonSource,
    P: SecretPlanSource,
{
    /// Creates an orchestrator over the given adapters and validator.
    #[must_use]
    pub fn new(
        skeleton: S,
        secrets: P,
        validator: BundleValidator,
        config: OrchestratorConfig,
    ) -> Self {
        let merger = SecretMerger::new(validator.clone());
        Self {
            skeleton,
            secrets,
            validator,
            merger,
            config,
        }
    }

    /// Validates raw manifest bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BundleOpError::InputInvalid`] when the manifest fails decode
    /// or validation.
    pub fn validate(&self, raw: &[u8]) -> Result<BundleManifest, BundleOpError> {
        self.validator.validate_bytes(raw).map_err(BundleOpError::InputInvalid)
    }

    /// Merges secret plans for a scenario into a caller-supplied manifest.
    ///
    /// The inbound manifest is re-validated before any network I/O so that
    /// malformed input is rejected cheaply. The caller's deadline applies to
    /// the plan fetch.
    ///
    /// # Errors
    ///
    /// Returns [`BundleOpError`] when the inbound manifest is invalid, the
    /// secrets manager is unavailable, or the merge fails.
    pub fn merge_secrets(
        &self,
        scenario: &str,
        tier: Option<&str>,
        manifest_raw: &[u8],
        deadline: Duration,
    ) -> Result<BundleManifest, BundleOpError> {
        let mut manifest =
            self.validator.validate_bytes(manifest_raw).map_err(BundleOpError::InputInvalid)?;
        let tier = effective_tier(tier, &self.config);
        let plans = self.secrets.fetch_plans(scenario, tier, deadline)?;
        self.merger.merge(&mut manifest, &plans)?;
        Ok(manifest)
    }

    /// Assembles a complete bundle manifest for a scenario.
    ///
    /// Fetches the skeleton (which validates it), optionally merges secret
    /// plans, and re-validates the assembled result as a final check. All
    /// adapter calls share one bounded wall-clock budget.
    ///
    /// # Errors
    ///
    /// Returns [`BundleOpError`] when an adapter fails, the merge fails, or
    /// the assembled manifest does not validate.
    pub fn assemble(
        &self,
        scenario: &str,
        tier: Option<&str>,
        include_secrets: bool,
    ) -> Result<BundleManifest, BundleOpError> {
        let started = Instant::now();
        let budget = self.config.assemble_deadline;
        // The skeleton fetch gets at most half the budget so that a slow
        // analyzer cannot starve the secrets fetch.
        let mut manifest = self.skeleton.fetch_skeleton(scenario, budget / 2)?;
        if include_secrets {
            let remaining = budget.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                return Err(BundleOpError::Adapter(AdapterError::Unavailable(
                    "assemble deadline exhausted before secrets fetch".to_string(),
                )));
            }
            let tier = effective_tier(tier, &self.config);
            let plans = self.secrets.fetch_plans(scenario, tier, remaining)?;
            self.merger.merge(&mut manifest, &plans)?;
        }
        self.validator
            .validate_manifest(&manifest)
            .map_err(BundleOpError::AssembledInvalid)?;
        Ok(manifest)
    }
}

/// Resolves the effective tier selector for a request.
fn effective_tier<'a>(tier: Option<&'a str>, config: &'a OrchestratorConfig) -> &'a str {
    match tier {
        Some(value) if !value.is_empty() => value,
        _ => config.default_tier.as_str(),
    }
}
