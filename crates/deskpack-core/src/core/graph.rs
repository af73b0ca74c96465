// deskpack-core/src/core/graph.rs
// ============================================================================
// Module: Dependency Graph Analyzer
// Description: DFS cycle detection over an opaque dependency map.
// Purpose: Reject scenario dependency graphs that contain cycles.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The analyzer walks the dependency map supplied by the external scenario
//! analyzer. The map is opaque JSON of the shape
//! `{node: {dependencies: {child: …}}}`; missing or malformed entries are
//! treated as leaves. Every independent cycle is reported, not just the
//! first, and consumers treat any non-empty result as a rejection condition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Traversal State
// ============================================================================

/// Visit state for the three-color DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// Node is on the current DFS stack.
    OnStack,
    /// Node and its descendants are fully explored.
    Finished,
}

/// Separator used when rendering cycle paths.
const CYCLE_SEPARATOR: &str = " → ";

// ============================================================================
// SECTION: Cycle Detection
// ============================================================================

/// Detects cycles in a scenario dependency map.
///
/// Each cycle descriptor joins the node names with an arrow and repeats the
/// closing node, e.g. `A → B → A`. Output order is DFS discovery order.
#[must_use]
pub fn detect_cycles(dependencies: &Value) -> Vec<String> {
    let Some(nodes) = dependencies.as_object() else {
        return Vec::new();
    };
    let mut states: HashMap<String, VisitState> = HashMap::new();
    let mut path: Vec<String> = Vec::new();
    let mut cycles: Vec<String> = Vec::new();
    for node in nodes.keys() {
        visit(nodes, node, &mut states, &mut path, &mut cycles);
    }
    cycles
}

/// Visits one node, recording any cycle that closes through the current path.
fn visit(
    nodes: &Map<String, Value>,
    node: &str,
    states: &mut HashMap<String, VisitState>,
    path: &mut Vec<String>,
    cycles: &mut Vec<String>,
) {
    match states.get(node) {
        Some(VisitState::Finished) => return,
        Some(VisitState::OnStack) => {
            cycles.push(render_cycle(path, node));
            return;
        }
        None => {}
    }
    states.insert(node.to_string(), VisitState::OnStack);
    path.push(node.to_string());
    for child in children_of(nodes, node) {
        visit(nodes, child, states, path, cycles);
    }
    path.pop();
    states.insert(node.to_string(), VisitState::Finished);
}

/// Returns the child names of a node, treating malformed entries as leaves.
fn children_of<'a>(nodes: &'a Map<String, Value>, node: &str) -> Vec<&'a str> {
    nodes
        .get(node)
        .and_then(|entry| entry.get("dependencies"))
        .and_then(Value::as_object)
        .map(|deps| deps.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Renders the suffix of the current path that closes a cycle at `node`.
fn render_cycle(path: &[String], node: &str) -> String {
    let start = path.iter().position(|entry| entry == node).unwrap_or(0);
    let mut parts: Vec<&str> = path[start..].iter().map(String::as_str).collect();
    parts.push(node);
    parts.join(CYCLE_SEPARATOR)
}
