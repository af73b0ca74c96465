// deskpack-core/tests/graph.rs
// ============================================================================
// Module: Dependency Graph Tests
// Description: Cycle detection over opaque dependency maps.
// Purpose: Ensure cycles are reported fully and leaves are tolerated.
// Dependencies: deskpack-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises the three-color DFS: acyclic graphs yield no cycles, two-node
//! cycles render as `A → B → A`, multiple independent cycles are all
//! reported, and malformed entries degrade to leaves.

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

use deskpack_core::AnalysisError;
use deskpack_core::analyze_scenario;
use deskpack_core::detect_cycles;
use serde_json::json;

#[test]
fn acyclic_graph_yields_no_cycles() {
    let graph = json!({
        "A": { "dependencies": { "B": {} } },
        "B": {}
    });
    assert!(detect_cycles(&graph).is_empty());
}

#[test]
fn two_node_cycle_is_reported_once() {
    let graph = json!({
        "A": { "dependencies": { "B": {} } },
        "B": { "dependencies": { "A": {} } }
    });
    let cycles = detect_cycles(&graph);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0], "A → B → A");
}

#[test]
fn self_loop_is_a_cycle() {
    let graph = json!({ "A": { "dependencies": { "A": {} } } });
    assert_eq!(detect_cycles(&graph), ["A → A"]);
}

#[test]
fn independent_cycles_are_all_reported() {
    let graph = json!({
        "A": { "dependencies": { "B": {} } },
        "B": { "dependencies": { "A": {} } },
        "C": { "dependencies": { "D": {} } },
        "D": { "dependencies": { "C": {} } }
    });
    let cycles = detect_cycles(&graph);
    assert_eq!(cycles.len(), 2);
    assert!(cycles.contains(&"A → B → A".to_string()));
    assert!(cycles.contains(&"C → D → C".to_string()));
}

#[test]
fn longer_cycle_reports_the_closing_suffix() {
    let graph = json!({
        "A": { "dependencies": { "B": {} } },
        "B": { "dependencies": { "C": {} } },
        "C": { "dependencies": { "B": {} } }
    });
    // A reaches the cycle but is not part of it.
    assert_eq!(detect_cycles(&graph), ["B → C → B"]);
}

#[test]
fn malformed_entries_are_treated_as_leaves() {
    let graph = json!({
        "A": { "dependencies": "not-a-map" },
        "B": 42,
        "C": { "dependencies": { "missing": {} } }
    });
    assert!(detect_cycles(&graph).is_empty());
    assert!(detect_cycles(&json!("not-an-object")).is_empty());
}

#[test]
fn diamond_sharing_is_not_a_cycle() {
    let graph = json!({
        "A": { "dependencies": { "B": {}, "C": {} } },
        "B": { "dependencies": { "D": {} } },
        "C": { "dependencies": { "D": {} } },
        "D": {}
    });
    assert!(detect_cycles(&graph).is_empty());
}

#[test]
fn analysis_rejects_cyclic_scenarios() {
    let graph = json!({
        "A": { "dependencies": { "B": {} } },
        "B": { "dependencies": { "A": {} } }
    });
    let err = analyze_scenario("picker-wheel", 2, &graph).expect_err("cyclic graph rejected");
    let AnalysisError::CycleDetected {
        cycles,
    } = err;
    assert_eq!(cycles, ["A → B → A"]);
}

#[test]
fn analysis_annotates_acyclic_scenarios() {
    let graph = json!({ "A": {} });
    let analysis = analyze_scenario("picker-wheel", 2, &graph).expect("acyclic graph accepted");
    assert_eq!(analysis.scenario, "picker-wheel");
    assert_eq!(analysis.tier_name, "desktop");
    assert!(!analysis.blocked);
    assert!(!analysis.warning);
}
