// deskpack-core/src/runtime/merge.rs
// ============================================================================
// Module: Secret Merger
// Description: Merges external secret plans into a bundle manifest.
// Purpose: Replace the manifest secrets section and re-validate the result.
// Dependencies: crate::{core, runtime::validate}
// ============================================================================

//! ## Overview
//! The merger translates secret plans from the secrets manager into
//! manifest-shaped secrets and replaces the manifest's secrets section
//! wholesale; prior secrets are discarded, not appended to. Translation
//! preserves input order and performs no deduplication by id; the schema is
//! the only guard against duplicates. Any plan with an unsupported delivery
//! target fails the whole operation before the manifest is touched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::manifest::BundleManifest;
use crate::core::manifest::Secret;
use crate::core::manifest::SecretTarget;
use crate::core::manifest::is_supported_target_type;
use crate::core::plan::BundleSecretPlan;
use crate::runtime::validate::BundleValidator;
use crate::runtime::validate::ValidateError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Secret merge errors.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A plan carries a delivery target the bundle cannot satisfy.
    #[error("secret {id} has unsupported target type {target_type}")]
    UnsupportedTarget {
        /// Identifier of the offending plan.
        id: String,
        /// The unsupported target type value.
        target_type: String,
    },
    /// The manifest no longer validates after the merge.
    #[error("manifest failed validation after merging secrets: {0}")]
    Revalidation(#[source] ValidateError),
}

// ============================================================================
// SECTION: Merger
// ============================================================================

/// Merges secret plans into manifests and re-validates the result.
#[derive(Clone)]
pub struct SecretMerger {
    /// Validator run over the manifest after the secrets section is replaced.
    validator: BundleValidator,
}

impl SecretMerger {
    /// Creates a merger that re-validates with the given validator.
    #[must_use]
    pub const fn new(validator: BundleValidator) -> Self {
        Self {
            validator,
        }
    }

    /// Replaces `manifest.secrets` with the translated plans and re-validates.
    ///
    /// Idempotent: merging the same plan list twice produces byte-identical
    /// secrets sections.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnsupportedTarget`] before mutating the manifest
    /// when any plan has an unsupported target type, and
    /// [`MergeError::Revalidation`] when the merged manifest fails
    /// validation.
    pub fn merge(
        &self,
        manifest: &mut BundleManifest,
        plans: &[BundleSecretPlan],
    ) -> Result<(), MergeError> {
        let secrets = translate_plans(plans)?;
        manifest.secrets = secrets;
        self.validator.validate_manifest(manifest).map_err(MergeError::Revalidation)
    }
}

/// Translates plans into manifest secrets, preserving input order.
///
/// Infrastructure-class plans are never bundle-safe and are filtered out
/// after their target type has been checked.
fn translate_plans(plans: &[BundleSecretPlan]) -> Result<Vec<Secret>, MergeError> {
    let mut secrets = Vec::with_capacity(plans.len());
    for plan in plans {
        if !is_supported_target_type(&plan.target.target_type) {
            return Err(MergeError::UnsupportedTarget {
                id: plan.id.clone(),
                target_type: plan.target.target_type.clone(),
            });
        }
        if !plan.bundle_safe() {
            continue;
        }
        secrets.push(translate_plan(plan));
    }
    Ok(secrets)
}

/// Translates one plan into a manifest secret.
fn translate_plan(plan: &BundleSecretPlan) -> Secret {
    Secret {
        id: plan.id.clone(),
        class: plan.class.clone(),
        description: plan.description.clone(),
        format: plan.format.clone(),
        required: plan.required,
        prompt: plan.prompt.clone(),
        generator: plan.generator.clone(),
        target: SecretTarget {
            target_type: plan.target.target_type.clone(),
            name: plan.target.name.clone(),
        },
    }
}
