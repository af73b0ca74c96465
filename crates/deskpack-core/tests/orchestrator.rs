// deskpack-core/tests/orchestrator.rs
// ============================================================================
// Module: Bundle Orchestrator Tests
// Description: validate / merge-secrets / assemble over fake adapters.
// Purpose: Ensure operation ordering, defaults, and error categories hold.
// Dependencies: deskpack-core, serde_json
// ============================================================================

//! ## Overview
//! Fake adapters stand in for the scenario analyzer and the secrets manager.
//! Covers the assemble happy path, the assemble/merge equivalence, the
//! default tier selector, the include_secrets switch, and adapter error
//! propagation.

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

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use deskpack_core::AdapterError;
use deskpack_core::BundleManifest;
use deskpack_core::BundleOpError;
use deskpack_core::BundleOrchestrator;
use deskpack_core::BundleSecretPlan;
use deskpack_core::OrchestratorConfig;
use deskpack_core::SecretPlanSource;
use deskpack_core::SkeletonSource;

use crate::common::env_plan;
use crate::common::open_validator;
use crate::common::sample_manifest_value;

// ============================================================================
// SECTION: Fake Adapters
// ============================================================================

/// Analyzer fake returning a fixed skeleton.
struct FakeAnalyzer {
    /// Skeleton returned for every scenario.
    skeleton: BundleManifest,
}

impl SkeletonSource for FakeAnalyzer {
    fn fetch_skeleton(
        &self,
        _scenario: &str,
        _deadline: Duration,
    ) -> Result<BundleManifest, AdapterError> {
        Ok(self.skeleton.clone())
    }
}

/// Analyzer fake that is always unreachable.
struct DownAnalyzer;

impl SkeletonSource for DownAnalyzer {
    fn fetch_skeleton(
        &self,
        _scenario: &str,
        _deadline: Duration,
    ) -> Result<BundleManifest, AdapterError> {
        Err(AdapterError::Unavailable("analyzer is down".to_string()))
    }
}

/// Secrets-manager fake returning fixed plans and recording the tier asked.
struct FakeSecrets {
    /// Plans returned for every request.
    plans: Vec<BundleSecretPlan>,
    /// Tier selector observed on the last request, shared with the test.
    seen_tier: Rc<RefCell<Option<String>>>,
}

impl FakeSecrets {
    /// Creates a fake returning the given plans.
    fn with_plans(plans: Vec<BundleSecretPlan>) -> Self {
        Self {
            plans,
            seen_tier: Rc::new(RefCell::new(None)),
        }
    }
}

impl SecretPlanSource for FakeSecrets {
    fn fetch_plans(
        &self,
        _scenario: &str,
        tier: &str,
        _deadline: Duration,
    ) -> Result<Vec<BundleSecretPlan>, AdapterError> {
        *self.seen_tier.borrow_mut() = Some(tier.to_string());
        Ok(self.plans.clone())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes the sample manifest fixture.
fn skeleton() -> BundleManifest {
    serde_json::from_value(sample_manifest_value()).expect("sample manifest decodes")
}

/// Builds an orchestrator over the given fakes.
fn orchestrator(
    analyzer: FakeAnalyzer,
    secrets: FakeSecrets,
) -> BundleOrchestrator<FakeAnalyzer, FakeSecrets> {
    BundleOrchestrator::new(analyzer, secrets, open_validator(), OrchestratorConfig::default())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn assemble_merges_planned_secrets_into_the_skeleton() {
    let engine = orchestrator(
        FakeAnalyzer {
            skeleton: skeleton(),
        },
        FakeSecrets::with_plans(vec![env_plan("API_KEY")]),
    );
    let manifest = engine.assemble("picker-wheel", None, true).expect("assemble succeeds");
    assert_eq!(manifest.secrets.len(), 1);
    assert_eq!(manifest.secrets[0].id, "API_KEY");
    // The assembled manifest itself validates.
    let raw = serde_json::to_vec(&manifest).expect("serialize manifest");
    engine.validate(&raw).expect("assembled manifest validates");
}

#[test]
fn assemble_without_secrets_skips_the_plan_fetch() {
    let secrets = FakeSecrets::with_plans(vec![env_plan("API_KEY")]);
    let engine = orchestrator(
        FakeAnalyzer {
            skeleton: skeleton(),
        },
        secrets,
    );
    let manifest = engine.assemble("picker-wheel", None, false).expect("assemble succeeds");
    assert!(manifest.secrets.is_empty());
}

#[test]
fn assemble_equals_merging_secrets_into_the_skeleton() {
    let plans = vec![env_plan("API_KEY"), env_plan("UPLOAD_TOKEN")];
    let assembled = orchestrator(
        FakeAnalyzer {
            skeleton: skeleton(),
        },
        FakeSecrets::with_plans(plans.clone()),
    )
    .assemble("picker-wheel", Some("tier-2-desktop"), true)
    .expect("assemble succeeds");

    let skeleton_raw = serde_json::to_vec(&skeleton()).expect("serialize skeleton");
    let merged = orchestrator(
        FakeAnalyzer {
            skeleton: skeleton(),
        },
        FakeSecrets::with_plans(plans),
    )
    .merge_secrets(
        "picker-wheel",
        Some("tier-2-desktop"),
        &skeleton_raw,
        Duration::from_secs(5),
    )
    .expect("merge succeeds");

    assert_eq!(
        serde_json::to_vec(&assembled).expect("serialize"),
        serde_json::to_vec(&merged).expect("serialize")
    );
}

#[test]
fn merge_secrets_defaults_the_tier_selector() {
    let raw = serde_json::to_vec(&skeleton()).expect("serialize skeleton");
    for omitted in [None, Some("")] {
        let secrets = FakeSecrets::with_plans(vec![]);
        let seen = Rc::clone(&secrets.seen_tier);
        let engine = orchestrator(
            FakeAnalyzer {
                skeleton: skeleton(),
            },
            secrets,
        );
        engine
            .merge_secrets("picker-wheel", omitted, &raw, Duration::from_secs(5))
            .expect("merge succeeds");
        assert_eq!(seen.borrow().as_deref(), Some("tier-2-desktop"));
    }

    let secrets = FakeSecrets::with_plans(vec![]);
    let seen = Rc::clone(&secrets.seen_tier);
    let engine = orchestrator(
        FakeAnalyzer {
            skeleton: skeleton(),
        },
        secrets,
    );
    engine
        .merge_secrets("picker-wheel", Some("tier-4-saas"), &raw, Duration::from_secs(5))
        .expect("merge succeeds");
    assert_eq!(seen.borrow().as_deref(), Some("tier-4-saas"));
}

#[test]
fn merge_secrets_rejects_malformed_input_before_network_io() {
    let engine = orchestrator(
        FakeAnalyzer {
            skeleton: skeleton(),
        },
        FakeSecrets::with_plans(vec![env_plan("API_KEY")]),
    );
    let err = engine
        .merge_secrets("picker-wheel", None, b"{\"schema_version\":\"v9\"}", Duration::from_secs(5))
        .expect_err("malformed manifest rejected");
    assert!(matches!(err, BundleOpError::InputInvalid(_)), "got {err:?}");
}

#[test]
fn adapter_failures_surface_as_adapter_errors() {
    let engine = BundleOrchestrator::new(
        DownAnalyzer,
        FakeSecrets::with_plans(vec![]),
        open_validator(),
        OrchestratorConfig::default(),
    );
    let err = engine.assemble("picker-wheel", None, true).expect_err("analyzer down");
    assert!(
        matches!(err, BundleOpError::Adapter(AdapterError::Unavailable(_))),
        "got {err:?}"
    );
}

#[test]
fn repeated_assembly_is_byte_identical() {
    let engine = orchestrator(
        FakeAnalyzer {
            skeleton: skeleton(),
        },
        FakeSecrets::with_plans(vec![env_plan("API_KEY")]),
    );
    let first = engine.assemble("picker-wheel", None, true).expect("assemble");
    let second = engine.assemble("picker-wheel", None, true).expect("assemble");
    assert_eq!(
        serde_json::to_vec(&first).expect("serialize"),
        serde_json::to_vec(&second).expect("serialize")
    );
}
