// deskpack-scaffold/src/descriptor.rs
// ============================================================================
// Module: Descriptor Rewrites
// Description: Service descriptor and package specifier rewrites.
// Purpose: Rebrand copied payloads as the generated scenario.
// Dependencies: crate::generate, crate::template, serde_json
// ============================================================================

//! ## Overview
//! A copied payload still names the factory scenario. Two rewrites fix
//! that: `.vrooli/service.json` gets the new slug, display name, and
//! repository directory, loses factory-only setup steps, and has develop
//! commands re-pointed at the new scenario's binary; every `package.json`
//! has workspace-relative dependency specifiers that escape the scenario
//! root re-pointed at the scenario's vendored copy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde_json::Value;
use serde_json::json;

use crate::generate::ScaffoldError;
use crate::template::FACTORY_ONLY_SETUP_STEPS;

// ============================================================================
// SECTION: Service Descriptor
// ============================================================================

/// Rewrites `<out>/.vrooli/service.json` for the generated scenario.
///
/// # Errors
///
/// Returns [`ScaffoldError`] when the descriptor is absent, unreadable, or
/// not a JSON object.
pub fn rewrite_service_descriptor(
    output_dir: &Path,
    slug: &str,
    display_name: &str,
) -> Result<(), ScaffoldError> {
    let path = output_dir.join(".vrooli").join("service.json");
    let raw = fs::read(&path).map_err(|err| ScaffoldError::io(&path, &err))?;
    let mut descriptor: Value = serde_json::from_slice(&raw).map_err(|err| {
        ScaffoldError::Descriptor(format!("service.json did not decode: {err}"))
    })?;
    if !descriptor.is_object() {
        return Err(ScaffoldError::Descriptor("service.json is not an object".to_string()));
    }

    let factory_name = descriptor
        .pointer("/service/name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let service = descriptor
        .as_object_mut()
        .and_then(|map| map.entry("service").or_insert_with(|| json!({})).as_object_mut())
        .ok_or_else(|| ScaffoldError::Descriptor("service section is not an object".to_string()))?;
    service.insert("name".to_string(), json!(slug));
    service.insert("displayName".to_string(), json!(display_name));

    if let Some(repository) =
        descriptor.pointer_mut("/repository").and_then(Value::as_object_mut)
    {
        repository.insert("directory".to_string(), json!(format!("scenarios/{slug}")));
    }

    drop_factory_setup_steps(&mut descriptor);
    repoint_develop_commands(&mut descriptor, &factory_name, slug);

    write_pretty(&path, &descriptor)
}

/// Removes `lifecycle.setup` steps named in the factory-only set.
fn drop_factory_setup_steps(descriptor: &mut Value) {
    let Some(steps) = descriptor.pointer_mut("/lifecycle/setup").and_then(Value::as_array_mut)
    else {
        return;
    };
    steps.retain(|step| {
        let name = step.get("name").and_then(Value::as_str).unwrap_or_default();
        !FACTORY_ONLY_SETUP_STEPS.contains(&name)
    });
}

/// Rewrites develop commands that reference the factory binary.
fn repoint_develop_commands(descriptor: &mut Value, factory_name: &str, slug: &str) {
    if factory_name.is_empty() || factory_name == slug {
        return;
    }
    let Some(steps) = descriptor.pointer_mut("/lifecycle/develop").and_then(Value::as_array_mut)
    else {
        return;
    };
    for step in steps {
        let Some(command) = step.get("command").and_then(Value::as_str) else {
            continue;
        };
        if command.contains(factory_name) {
            let rewritten = command.replace(factory_name, slug);
            if let Some(map) = step.as_object_mut() {
                map.insert("command".to_string(), json!(rewritten));
            }
        }
    }
}

// ============================================================================
// SECTION: Package Specifiers
// ============================================================================

/// Dependency tables inspected for workspace-relative specifiers.
const DEPENDENCY_TABLES: &[&str] = &["dependencies", "devDependencies", "optionalDependencies"];

/// Rewrites workspace-relative specifiers in every `package.json` under the
/// generated tree to point at the scenario's vendored copy.
///
/// # Errors
///
/// Returns [`ScaffoldError`] when the tree cannot be walked or a rewritten
/// file cannot be written back.
pub fn rewrite_package_specifiers(output_dir: &Path) -> Result<(), ScaffoldError> {
    let mut manifests = Vec::new();
    collect_package_manifests(output_dir, &mut manifests)?;
    for path in manifests {
        rewrite_one_package(&path)?;
    }
    Ok(())
}

/// Walks the tree collecting `package.json` paths.
fn collect_package_manifests(
    dir: &Path,
    manifests: &mut Vec<std::path::PathBuf>,
) -> Result<(), ScaffoldError> {
    let entries = fs::read_dir(dir).map_err(|err| ScaffoldError::io(dir, &err))?;
    for entry in entries {
        let entry = entry.map_err(|err| ScaffoldError::io(dir, &err))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|err| ScaffoldError::io(&path, &err))?;
        if file_type.is_dir() {
            collect_package_manifests(&path, manifests)?;
        } else if entry.file_name() == "package.json" {
            manifests.push(path);
        }
    }
    Ok(())
}

/// Rewrites one `package.json` in place when any specifier changes.
fn rewrite_one_package(path: &Path) -> Result<(), ScaffoldError> {
    let raw = fs::read(path).map_err(|err| ScaffoldError::io(path, &err))?;
    let Ok(mut manifest) = serde_json::from_slice::<Value>(&raw) else {
        // Malformed package manifests are copied as-is; they are not ours
        // to repair.
        return Ok(());
    };
    let mut changed = false;
    for table in DEPENDENCY_TABLES {
        let Some(deps) = manifest.get_mut(*table).and_then(Value::as_object_mut) else {
            continue;
        };
        for (name, specifier) in deps.iter_mut() {
            let Some(text) = specifier.as_str() else {
                continue;
            };
            if let Some(vendored) = vendored_specifier(name, text) {
                *specifier = json!(vendored);
                changed = true;
            }
        }
    }
    if changed {
        write_pretty(path, &manifest)?;
    }
    Ok(())
}

/// Maps a workspace-relative specifier to a vendored one. Specifiers that
/// stay inside the scenario root pass through unchanged.
fn vendored_specifier(name: &str, specifier: &str) -> Option<String> {
    if let Some(rest) = specifier.strip_prefix("file:") {
        if !rest.starts_with("..") {
            return None;
        }
        let basename = Path::new(rest)
            .file_name()
            .map(|component| component.to_string_lossy().to_string())
            .filter(|text| !text.is_empty() && text != "..")
            .unwrap_or_else(|| package_basename(name));
        return Some(format!("file:./vendor/{basename}"));
    }
    if specifier.starts_with("workspace:") {
        return Some(format!("file:./vendor/{}", package_basename(name)));
    }
    None
}

/// Returns the unscoped basename of a package name.
fn package_basename(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes a JSON document with a trailing newline.
fn write_pretty(path: &Path, value: &Value) -> Result<(), ScaffoldError> {
    let mut body = serde_json::to_vec_pretty(value)
        .map_err(|err| ScaffoldError::Descriptor(format!("{} did not serialize: {err}", path.display())))?;
    body.push(b'\n');
    fs::write(path, body).map_err(|err| ScaffoldError::io(path, &err))
}
