// deskpack-scaffold/src/template.rs
// ============================================================================
// Module: Template Records
// Description: Template payload resolution and factory-only entry sets.
// Purpose: Locate template payload trees and describe them to the pipeline.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A template is a scenario directory used as a payload source. Resolution
//! precedence: `TEMPLATE_PAYLOAD_DIR` override, then
//! `VROOLI_ROOT/scenarios/<id>`, then `HOME/Vrooli/scenarios/<id>`. The
//! template version is recovered from the payload's own service descriptor.
//! Factory-only entries are machinery of the factory scenario itself and
//! are never copied into generated scenarios.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;

use crate::generate::ScaffoldError;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Output root for generated scenarios.
pub const GEN_OUTPUT_DIR: &str = "GEN_OUTPUT_DIR";
/// Template payload source override.
pub const TEMPLATE_PAYLOAD_DIR: &str = "TEMPLATE_PAYLOAD_DIR";
/// Platform checkout root holding `scenarios/`.
pub const VROOLI_ROOT: &str = "VROOLI_ROOT";
/// Home directory fallback for the platform checkout.
pub const HOME: &str = "HOME";

// ============================================================================
// SECTION: Factory-Only Entries
// ============================================================================

/// Payload paths that belong to the factory scenario, never to its copies.
/// Matching is prefix-wise over relative paths.
pub const FACTORY_ONLY_PATHS: &[&str] = &[
    ".git",
    ".vrooli/template.json",
    "node_modules",
    "ui/src/pages/FactoryLanding.tsx",
];

/// `lifecycle.setup` step names dropped from rewritten descriptors.
pub const FACTORY_ONLY_SETUP_STEPS: &[&str] = &["install-cli"];

/// Returns true when a payload-relative path is factory-only machinery.
#[must_use]
pub fn is_factory_only(relative: &str) -> bool {
    FACTORY_ONLY_PATHS.iter().any(|prefix| {
        relative == *prefix || relative.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
    })
}

// ============================================================================
// SECTION: Template Record
// ============================================================================

/// A resolved template: identifier, version, and payload location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    /// Template identifier, matching a scenario directory name.
    pub id: String,
    /// Template version recovered from the payload's service descriptor.
    pub version: String,
    /// Root of the payload tree to copy.
    pub payload_root: PathBuf,
}

impl TemplateRecord {
    /// Resolves and loads the template for the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateMissing`] when no payload directory
    /// exists at any resolution candidate.
    pub fn load(template_id: &str) -> Result<Self, ScaffoldError> {
        let payload_root = payload_root(template_id)?;
        let version = descriptor_version(&payload_root);
        Ok(Self {
            id: template_id.to_string(),
            version,
            payload_root,
        })
    }
}

/// Resolves the payload root for a template identifier.
fn payload_root(template_id: &str) -> Result<PathBuf, ScaffoldError> {
    let candidates = payload_candidates(template_id);
    for candidate in &candidates {
        if candidate.is_dir() {
            return Ok(candidate.clone());
        }
    }
    Err(ScaffoldError::TemplateMissing(template_id.to_string()))
}

/// Lists payload-root candidates in precedence order.
fn payload_candidates(template_id: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = env_value(TEMPLATE_PAYLOAD_DIR) {
        candidates.push(PathBuf::from(dir));
    }
    if let Some(root) = env_value(VROOLI_ROOT) {
        candidates.push(Path::new(&root).join("scenarios").join(template_id));
    }
    if let Some(home) = env_value(HOME) {
        candidates.push(Path::new(&home).join("Vrooli").join("scenarios").join(template_id));
    }
    candidates
}

/// Recovers the template version from the payload's service descriptor.
/// Unreadable or unversioned descriptors fall back to `0.0.0`.
fn descriptor_version(payload_root: &Path) -> String {
    let descriptor = payload_root.join(".vrooli").join("service.json");
    let Ok(raw) = fs::read(&descriptor) else {
        return "0.0.0".to_string();
    };
    let Ok(value) = serde_json::from_slice::<Value>(&raw) else {
        return "0.0.0".to_string();
    };
    value
        .pointer("/service/version")
        .and_then(Value::as_str)
        .filter(|version| !version.trim().is_empty())
        .unwrap_or("0.0.0")
        .to_string()
}

/// Reads an environment variable, treating blank values as absent.
pub(crate) fn env_value(key: &str) -> Option<String> {
    let raw = env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
