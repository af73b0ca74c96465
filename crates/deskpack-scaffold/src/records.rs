// deskpack-scaffold/src/records.rs
// ============================================================================
// Module: Generated Scenario Records
// Description: Recovery of generated scenarios from the output root.
// Purpose: List what the scaffolder has produced, tolerating damage.
// Dependencies: crate::generate, crate::template, serde, serde_json
// ============================================================================

//! ## Overview
//! Generated scenarios are recovered by scanning `GEN_OUTPUT_DIR`. Recovery
//! is tolerant: a missing descriptor falls back to the slug for the display
//! name, provenance fields appear only when readable, and completeness is
//! re-derived from the required-entry validation rather than trusted from
//! any stored flag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::generate::ScaffoldError;
use crate::generate::missing_entries;
use crate::template::GEN_OUTPUT_DIR;
use crate::template::env_value;

// ============================================================================
// SECTION: Record Shape
// ============================================================================

/// One generated scenario recovered from the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedScenarioRecord {
    /// Directory name under the output root.
    pub slug: String,
    /// Display name from the rewritten descriptor, or the slug.
    pub display_name: String,
    /// Template identifier from provenance, when readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Template version from provenance, when readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,
    /// Generation timestamp from provenance, when readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Whether the tree still carries every required entry.
    pub complete: bool,
}

// ============================================================================
// SECTION: Recovery
// ============================================================================

/// Lists generated scenarios under `GEN_OUTPUT_DIR`, sorted by slug.
///
/// A missing output root yields an empty list; an unconfigured one is an
/// error.
///
/// # Errors
///
/// Returns [`ScaffoldError::Input`] when `GEN_OUTPUT_DIR` is not set and
/// [`ScaffoldError::Io`] when the root exists but cannot be scanned.
pub fn list_generated() -> Result<Vec<GeneratedScenarioRecord>, ScaffoldError> {
    let root = env_value(GEN_OUTPUT_DIR)
        .ok_or_else(|| ScaffoldError::Input("GEN_OUTPUT_DIR is not configured".to_string()))?;
    let root = Path::new(&root);
    if !root.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(root).map_err(|err| ScaffoldError::io(root, &err))?;
    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ScaffoldError::io(root, &err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let slug = entry.file_name().to_string_lossy().to_string();
        records.push(recover_record(&path, slug));
    }
    records.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(records)
}

/// Recovers one record from a generated directory.
fn recover_record(dir: &Path, slug: String) -> GeneratedScenarioRecord {
    let display_name = read_json(&dir.join(".vrooli").join("service.json"))
        .as_ref()
        .and_then(|descriptor| descriptor.pointer("/service/displayName"))
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .map_or_else(|| slug.clone(), ToString::to_string);

    let provenance = read_json(&dir.join(".vrooli").join("template.json"));
    let field = |key: &str| {
        provenance
            .as_ref()
            .and_then(|stamp| stamp.get(key))
            .and_then(Value::as_str)
            .map(ToString::to_string)
    };

    let complete = missing_entries(dir).is_empty();
    GeneratedScenarioRecord {
        slug,
        display_name,
        template_id: field("template_id"),
        template_version: field("template_version"),
        generated_at: field("generated_at"),
        complete,
    }
}

/// Reads a JSON document, tolerating absence and damage.
fn read_json(path: &Path) -> Option<Value> {
    let raw = fs::read(path).ok()?;
    serde_json::from_slice(&raw).ok()
}
