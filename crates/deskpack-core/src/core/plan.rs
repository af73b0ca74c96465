// deskpack-core/src/core/plan.rs
// ============================================================================
// Module: Bundle Secret Plans
// Description: External secret plan shape returned by the secrets manager.
// Purpose: Define the wire contract consumed by the secret merger.
// Dependencies: crate::core::manifest, serde, serde_json
// ============================================================================

//! ## Overview
//! A plan describes one secret the bundle needs, as reported by the external
//! secrets manager for a (scenario, tier) pair. Plans are translated into
//! manifest secrets by the merger; an unsupported delivery target in any plan
//! fails the whole merge.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::manifest::SECRET_CLASS_INFRASTRUCTURE;
use crate::core::manifest::SecretPrompt;
use crate::core::manifest::SecretTarget;

// ============================================================================
// SECTION: Plan Shape
// ============================================================================

/// One secret the bundle needs, as planned by the secrets manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleSecretPlan {
    /// Secret identifier.
    pub id: String,
    /// Secret class reported by the secrets manager.
    #[serde(default)]
    pub class: String,
    /// Whether the secret is required. Absent on the wire means unspecified,
    /// and that distinction is preserved through the merger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Value format hint.
    #[serde(default)]
    pub format: String,
    /// Delivery target inside the bundle.
    pub target: SecretTarget,
    /// Optional interactive prompt metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<SecretPrompt>,
    /// Optional generator parameters (open map).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<Map<String, Value>>,
}

impl BundleSecretPlan {
    /// Returns true when the planned secret may be shipped inside a bundle.
    ///
    /// Infrastructure-class secrets stay on the host platform.
    #[must_use]
    pub fn bundle_safe(&self) -> bool {
        self.class != SECRET_CLASS_INFRASTRUCTURE
    }
}
