// deskpack-scaffold/src/generate.rs
// ============================================================================
// Module: Scaffold Generation
// Description: Scenario generation pipeline over template payloads.
// Purpose: Plan, copy, rewrite, stamp, and validate generated scenarios.
// Dependencies: crate::descriptor, crate::template, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! Generation runs a fixed pipeline: plan the payload tree (minus
//! factory-only entries), refuse non-empty targets, copy recursively with
//! source modes, rewrite the service descriptor and workspace package
//! specifiers, stamp provenance, and validate the required entry set.
//! A dry run stops after planning and touches nothing. Failures abort
//! without rollback.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::descriptor::rewrite_package_specifiers;
use crate::descriptor::rewrite_service_descriptor;
use crate::template::GEN_OUTPUT_DIR;
use crate::template::TemplateRecord;
use crate::template::env_value;
use crate::template::is_factory_only;

// ============================================================================
// SECTION: Required Entries
// ============================================================================

/// Directory entries every generated scenario must carry.
const REQUIRED_DIRS: &[&str] = &["api", "ui", ".vrooli", "requirements"];

/// File entries every generated scenario must carry.
const REQUIRED_FILES: &[&str] = &["PRD.md", "Makefile"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Scaffolding errors.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The request or environment configuration is unusable.
    #[error("{0}")]
    Input(String),
    /// No payload directory exists for the requested template.
    #[error("template payload not found for {0}")]
    TemplateMissing(String),
    /// The target directory already exists and is not empty.
    #[error("target directory {0} already exists and is not empty")]
    Conflict(String),
    /// The generated tree is missing required entries.
    #[error("generated scenario is missing required entries: {}", .0.join(", "))]
    Incomplete(Vec<String>),
    /// A filesystem operation failed.
    #[error("scaffold io failure at {path}: {message}")]
    Io {
        /// Path the operation touched.
        path: String,
        /// Underlying failure text.
        message: String,
    },
    /// A descriptor or package rewrite failed.
    #[error("descriptor rewrite failed: {0}")]
    Descriptor(String),
}

impl ScaffoldError {
    /// Wraps an io error with the path it touched.
    pub(crate) fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Request and Outcome
// ============================================================================

/// A scaffolding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    /// Template identifier to copy from.
    pub template_id: String,
    /// Human-readable name for the new scenario.
    pub display_name: String,
    /// Directory-safe identifier for the new scenario.
    pub slug: String,
    /// Plan only; touch nothing on disk.
    pub dry_run: bool,
}

/// The result of a scaffolding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    /// Target directory (created unless this was a dry run).
    pub output_dir: PathBuf,
    /// Payload-relative paths planned for the copy, sorted. Directories
    /// carry a trailing slash.
    pub planned_paths: Vec<String>,
    /// Whether the run stopped after planning.
    pub dry_run: bool,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Generates a scenario directory from a template payload.
///
/// # Errors
///
/// Returns [`ScaffoldError`] when the request is unusable, the template is
/// missing, the target is occupied, the copy fails, a rewrite fails, or the
/// generated tree misses required entries. Partial writes are not rolled
/// back.
pub fn generate_scenario(request: &ScaffoldRequest) -> Result<ScaffoldOutcome, ScaffoldError> {
    check_request(request)?;
    let template = TemplateRecord::load(&request.template_id)?;
    let output_root = env_value(GEN_OUTPUT_DIR)
        .ok_or_else(|| ScaffoldError::Input("GEN_OUTPUT_DIR is not configured".to_string()))?;
    let output_dir = Path::new(&output_root).join(&request.slug);

    let mut planned_paths = Vec::new();
    plan_tree(&template.payload_root, Path::new(""), &mut planned_paths)?;
    planned_paths.sort();

    if request.dry_run {
        return Ok(ScaffoldOutcome {
            output_dir,
            planned_paths,
            dry_run: true,
        });
    }

    refuse_occupied_target(&output_dir)?;
    copy_tree(&template.payload_root, &output_dir, Path::new(""))?;
    rewrite_service_descriptor(&output_dir, &request.slug, &request.display_name)?;
    rewrite_package_specifiers(&output_dir)?;
    write_provenance(&output_dir, &template)?;

    let missing = missing_entries(&output_dir);
    if !missing.is_empty() {
        return Err(ScaffoldError::Incomplete(missing));
    }

    Ok(ScaffoldOutcome {
        output_dir,
        planned_paths,
        dry_run: false,
    })
}

/// Rejects empty names and slugs that cannot name a directory.
fn check_request(request: &ScaffoldRequest) -> Result<(), ScaffoldError> {
    if request.display_name.trim().is_empty() {
        return Err(ScaffoldError::Input("displayName must not be empty".to_string()));
    }
    let slug = request.slug.trim();
    if slug.is_empty() {
        return Err(ScaffoldError::Input("slug must not be empty".to_string()));
    }
    if slug.contains('/') || slug.contains('\\') || slug == "." || slug == ".." {
        return Err(ScaffoldError::Input(format!("slug {slug:?} cannot name a directory")));
    }
    Ok(())
}

/// Fails when the target directory exists and holds any entry.
fn refuse_occupied_target(output_dir: &Path) -> Result<(), ScaffoldError> {
    if !output_dir.exists() {
        return Ok(());
    }
    let mut entries = fs::read_dir(output_dir).map_err(|err| ScaffoldError::io(output_dir, &err))?;
    if entries.next().is_some() {
        return Err(ScaffoldError::Conflict(output_dir.display().to_string()));
    }
    Ok(())
}

/// Collects payload-relative paths, skipping factory-only entries.
fn plan_tree(
    payload_root: &Path,
    relative: &Path,
    planned: &mut Vec<String>,
) -> Result<(), ScaffoldError> {
    let source = payload_root.join(relative);
    let entries = fs::read_dir(&source).map_err(|err| ScaffoldError::io(&source, &err))?;
    for entry in entries {
        let entry = entry.map_err(|err| ScaffoldError::io(&source, &err))?;
        let child = relative.join(entry.file_name());
        let child_text = relative_text(&child);
        if is_factory_only(&child_text) {
            continue;
        }
        let file_type =
            entry.file_type().map_err(|err| ScaffoldError::io(&entry.path(), &err))?;
        if file_type.is_dir() {
            planned.push(format!("{child_text}/"));
            plan_tree(payload_root, &child, planned)?;
        } else {
            planned.push(child_text);
        }
    }
    Ok(())
}

/// Recursively copies the payload, mirroring source modes.
fn copy_tree(
    payload_root: &Path,
    output_dir: &Path,
    relative: &Path,
) -> Result<(), ScaffoldError> {
    let source = payload_root.join(relative);
    let dest = output_dir.join(relative);
    fs::create_dir_all(&dest).map_err(|err| ScaffoldError::io(&dest, &err))?;
    let metadata = fs::metadata(&source).map_err(|err| ScaffoldError::io(&source, &err))?;
    fs::set_permissions(&dest, metadata.permissions())
        .map_err(|err| ScaffoldError::io(&dest, &err))?;

    let entries = fs::read_dir(&source).map_err(|err| ScaffoldError::io(&source, &err))?;
    for entry in entries {
        let entry = entry.map_err(|err| ScaffoldError::io(&source, &err))?;
        let child = relative.join(entry.file_name());
        if is_factory_only(&relative_text(&child)) {
            continue;
        }
        let file_type =
            entry.file_type().map_err(|err| ScaffoldError::io(&entry.path(), &err))?;
        if file_type.is_dir() {
            copy_tree(payload_root, output_dir, &child)?;
        } else {
            let child_source = payload_root.join(&child);
            let child_dest = output_dir.join(&child);
            // fs::copy mirrors the source file mode.
            fs::copy(&child_source, &child_dest)
                .map_err(|err| ScaffoldError::io(&child_dest, &err))?;
        }
    }
    Ok(())
}

/// Writes the provenance stamp under `.vrooli/template.json`.
fn write_provenance(output_dir: &Path, template: &TemplateRecord) -> Result<(), ScaffoldError> {
    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| ScaffoldError::Descriptor(format!("provenance timestamp failed: {err}")))?;
    let stamp = json!({
        "template_id": template.id,
        "template_version": template.version,
        "generated_at": generated_at,
    });
    let dir = output_dir.join(".vrooli");
    fs::create_dir_all(&dir).map_err(|err| ScaffoldError::io(&dir, &err))?;
    let path = dir.join("template.json");
    let mut body = serde_json::to_vec_pretty(&stamp)
        .map_err(|err| ScaffoldError::Descriptor(format!("provenance did not serialize: {err}")))?;
    body.push(b'\n');
    fs::write(&path, body).map_err(|err| ScaffoldError::io(&path, &err))
}

/// Returns the required entries missing from a generated tree.
#[must_use]
pub fn missing_entries(output_dir: &Path) -> Vec<String> {
    let mut missing = Vec::new();
    for dir in REQUIRED_DIRS {
        if !output_dir.join(dir).is_dir() {
            missing.push(format!("{dir}/"));
        }
    }
    for file in REQUIRED_FILES {
        if !output_dir.join(file).is_file() {
            missing.push((*file).to_string());
        }
    }
    missing
}

/// Renders a relative path with forward slashes.
fn relative_text(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
