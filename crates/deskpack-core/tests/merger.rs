// deskpack-core/tests/merger.rs
// ============================================================================
// Module: Secret Merger Tests
// Description: Plan translation, replacement semantics, and failure modes.
// Purpose: Ensure merged manifests preserve plan order and tri-state flags.
// Dependencies: deskpack-core, serde_json
// ============================================================================

//! ## Overview
//! The merger replaces the manifest's secrets wholesale, preserves plan
//! order, keeps the unset/true/false distinction on `required`, filters
//! infrastructure-class plans, and fails the whole operation on an
//! unsupported delivery target without touching the manifest.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use deskpack_core::BundleManifest;
use deskpack_core::MergeError;
use deskpack_core::SecretMerger;
use serde_json::json;

use crate::common::env_plan;
use crate::common::open_validator;
use crate::common::prompt_plan;
use crate::common::sample_manifest_value;

/// Decodes the sample manifest with one pre-existing secret named `old`.
fn manifest_with_old_secret() -> BundleManifest {
    let mut value = sample_manifest_value();
    value["secrets"] = json!([{
        "id": "old",
        "class": "per_install_generated",
        "target": { "type": "env", "name": "OLD" }
    }]);
    serde_json::from_value(value).expect("sample manifest decodes")
}

#[test]
fn merge_replaces_existing_secrets() {
    let merger = SecretMerger::new(open_validator());
    let mut manifest = manifest_with_old_secret();
    merger.merge(&mut manifest, &[env_plan("API_KEY")]).expect("merge succeeds");
    assert_eq!(manifest.secrets.len(), 1);
    assert_eq!(manifest.secrets[0].id, "API_KEY");
}

#[test]
fn merge_preserves_plan_order_without_dedup() {
    let merger = SecretMerger::new(open_validator());
    let mut manifest = manifest_with_old_secret();
    let plans = [env_plan("B"), env_plan("A"), env_plan("B")];
    merger.merge(&mut manifest, &plans).expect("merge succeeds");
    let ids: Vec<&str> = manifest.secrets.iter().map(|secret| secret.id.as_str()).collect();
    assert_eq!(ids, ["B", "A", "B"]);
}

#[test]
fn unsupported_target_fails_and_leaves_manifest_unchanged() {
    let merger = SecretMerger::new(open_validator());
    let mut manifest = manifest_with_old_secret();
    let mut plan = env_plan("VAULT_KEY");
    plan.target.target_type = "kms".to_string();
    let err = merger.merge(&mut manifest, &[env_plan("A"), plan]).expect_err("merge fails");
    match err {
        MergeError::UnsupportedTarget {
            id,
            target_type,
        } => {
            assert_eq!(id, "VAULT_KEY");
            assert_eq!(target_type, "kms");
            assert_eq!(
                err_message(&id, &target_type),
                "secret VAULT_KEY has unsupported target type kms"
            );
        }
        MergeError::Revalidation(other) => panic!("unexpected revalidation error: {other}"),
    }
    assert_eq!(manifest.secrets.len(), 1);
    assert_eq!(manifest.secrets[0].id, "old");
}

/// Renders the stable unsupported-target message for assertion purposes.
fn err_message(id: &str, target_type: &str) -> String {
    MergeError::UnsupportedTarget {
        id: id.to_string(),
        target_type: target_type.to_string(),
    }
    .to_string()
}

#[test]
fn merge_is_idempotent() {
    let merger = SecretMerger::new(open_validator());
    let plans = [env_plan("API_KEY"), prompt_plan("USER_TOKEN")];
    let mut manifest = manifest_with_old_secret();
    merger.merge(&mut manifest, &plans).expect("first merge");
    let first = serde_json::to_vec(&manifest.secrets).expect("serialize secrets");
    merger.merge(&mut manifest, &plans).expect("second merge");
    let second = serde_json::to_vec(&manifest.secrets).expect("serialize secrets");
    assert_eq!(first, second);
}

#[test]
fn required_tri_state_survives_the_merge() {
    let merger = SecretMerger::new(open_validator());
    let mut unset = env_plan("UNSET");
    unset.required = None;
    let mut off = env_plan("OFF");
    off.required = Some(false);
    let on = env_plan("ON");

    let mut manifest = manifest_with_old_secret();
    merger.merge(&mut manifest, &[unset, off, on]).expect("merge succeeds");

    assert_eq!(manifest.secrets[0].required, None);
    assert_eq!(manifest.secrets[1].required, Some(false));
    assert_eq!(manifest.secrets[2].required, Some(true));

    // The unset flag must stay absent on the wire, not coerce to false.
    let wire = serde_json::to_value(&manifest.secrets[0]).expect("serialize secret");
    assert!(wire.get("required").is_none());
}

#[test]
fn prompt_is_included_only_when_the_plan_has_one() {
    let merger = SecretMerger::new(open_validator());
    let mut manifest = manifest_with_old_secret();
    merger
        .merge(&mut manifest, &[env_plan("PLAIN"), prompt_plan("ASKED")])
        .expect("merge succeeds");
    assert!(manifest.secrets[0].prompt.is_none());
    assert_eq!(
        manifest.secrets[1].prompt.as_ref().map(|prompt| prompt.label.as_str()),
        Some("Enter ASKED")
    );
}

#[test]
fn infrastructure_plans_are_filtered_out() {
    let merger = SecretMerger::new(open_validator());
    let mut infra = env_plan("DB_ROOT_PASSWORD");
    infra.class = "infrastructure".to_string();
    let mut manifest = manifest_with_old_secret();
    merger.merge(&mut manifest, &[infra, env_plan("API_KEY")]).expect("merge succeeds");
    let ids: Vec<&str> = manifest.secrets.iter().map(|secret| secret.id.as_str()).collect();
    assert_eq!(ids, ["API_KEY"]);
}
