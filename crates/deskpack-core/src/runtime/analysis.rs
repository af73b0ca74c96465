// deskpack-core/src/runtime/analysis.rs
// ============================================================================
// Module: Scenario Analysis
// Description: Cycle rejection plus tier fitness annotation.
// Purpose: Annotate scenarios with bundling fitness before composition.
// Dependencies: crate::core::{graph, tier}, serde_json
// ============================================================================

//! ## Overview
//! Scenario analysis is invoked independently of bundle composition: it
//! rejects scenarios whose dependency graph contains cycles and annotates the
//! rest with the tier fitness policy. The dependency map stays opaque; no
//! entity-reference graph is materialized inside the engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::graph::detect_cycles;
use crate::core::tier::TierFitness;
use crate::core::tier::tier_display_name;
use crate::core::tier::tier_fitness;

// ============================================================================
// SECTION: Results
// ============================================================================

/// Fitness annotation for an acyclic scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    /// Scenario identifier.
    pub scenario: String,
    /// Tier the scenario was analyzed against.
    pub tier: i64,
    /// Display name for the tier.
    pub tier_name: String,
    /// Fitness record from the tier policy.
    pub fitness: TierFitness,
    /// True when the tier blocks desktop bundling outright.
    pub blocked: bool,
    /// True when the tier fits with a warning-level score.
    pub warning: bool,
}

/// Scenario analysis errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The dependency graph contains at least one cycle.
    #[error("dependency graph contains cycles: {}", cycles.join("; "))]
    CycleDetected {
        /// Rendered cycle paths in discovery order.
        cycles: Vec<String>,
    },
}

// ============================================================================
// SECTION: Analysis
// ============================================================================

/// Analyzes a scenario's dependency map against a tier.
///
/// # Errors
///
/// Returns [`AnalysisError::CycleDetected`] listing every cycle path when
/// the dependency graph is cyclic.
pub fn analyze_scenario(
    scenario: &str,
    tier: i64,
    dependencies: &Value,
) -> Result<ScenarioAnalysis, AnalysisError> {
    let cycles = detect_cycles(dependencies);
    if !cycles.is_empty() {
        return Err(AnalysisError::CycleDetected {
            cycles,
        });
    }
    let fitness = tier_fitness(tier);
    Ok(ScenarioAnalysis {
        scenario: scenario.to_string(),
        tier,
        tier_name: tier_display_name(tier),
        blocked: fitness.is_blocked(),
        warning: fitness.is_warning(),
        fitness,
    })
}
