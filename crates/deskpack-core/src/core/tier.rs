// deskpack-core/src/core/tier.rs
// ============================================================================
// Module: Tier Fitness Policy
// Description: Table-driven fitness lookup for deployment tiers.
// Purpose: Annotate scenarios with desktop-bundling fitness per tier.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The tier fitness policy is a pure, total function over integer tiers. Known
//! tiers (1..=5) map to fixed records; every other input yields a zero-score
//! record naming the invalid tier. The table is immutable for the process
//! lifetime. A tier is blocked iff its overall score is zero, and a non-zero
//! overall score below 50 is a warning.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Fitness Records
// ============================================================================

/// Warning threshold for overall fitness scores.
const WARNING_THRESHOLD: u8 = 50;

/// Fitness record for a deployment tier. All scores are in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierFitness {
    /// Overall fitness for desktop bundling.
    pub overall: u8,
    /// How portable the tier's workloads are across machines.
    pub portability: u8,
    /// How well the tier fits workstation resource envelopes.
    pub resources: u8,
    /// Licensing compatibility with redistribution.
    pub licensing: u8,
    /// Breadth of supported desktop platforms.
    pub platform_support: u8,
    /// Reason the tier is blocked, empty when it is not.
    pub blocker_reason: String,
}

impl TierFitness {
    /// Returns true when the tier is blocked for desktop bundling.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.overall == 0
    }

    /// Returns true when the tier fits but with a warning-level score.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        self.overall > 0 && self.overall < WARNING_THRESHOLD
    }
}

/// Builds a fitness record with an empty blocker reason.
const fn scored(
    overall: u8,
    portability: u8,
    resources: u8,
    licensing: u8,
    platform_support: u8,
) -> TierFitness {
    TierFitness {
        overall,
        portability,
        resources,
        licensing,
        platform_support,
        blocker_reason: String::new(),
    }
}

// ============================================================================
// SECTION: Policy Lookup
// ============================================================================

/// Returns the fitness record for a deployment tier.
///
/// Total over all integers: unknown tiers yield a zero-score record whose
/// blocker reason names the invalid tier.
#[must_use]
pub fn tier_fitness(tier: i64) -> TierFitness {
    match tier {
        1 => scored(100, 100, 100, 100, 100),
        2 => scored(92, 85, 90, 100, 95),
        3 => scored(35, 40, 30, 60, 25),
        4 => scored(70, 60, 75, 80, 70),
        5 => TierFitness {
            overall: 0,
            portability: 20,
            resources: 10,
            licensing: 30,
            platform_support: 15,
            blocker_reason: "enterprise tier requires managed infrastructure unavailable in \
                             desktop bundles"
                .to_string(),
        },
        _ => TierFitness {
            overall: 0,
            portability: 0,
            resources: 0,
            licensing: 0,
            platform_support: 0,
            blocker_reason: format!("tier {tier} is not a recognized deployment tier"),
        },
    }
}

/// Returns the display name for a deployment tier.
#[must_use]
pub fn tier_display_name(tier: i64) -> String {
    match tier {
        1 => "local".to_string(),
        2 => "desktop".to_string(),
        3 => "mobile".to_string(),
        4 => "saas".to_string(),
        5 => "enterprise".to_string(),
        _ => format!("tier-{tier}"),
    }
}
