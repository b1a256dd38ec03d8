//! Eligibility policies restricting candidate communities during local moving.

use serde::{Deserialize, Serialize};

/// Rule deciding whether a neighbor may pull a node into its community.
///
/// Exactly one policy is active per level. Mutually exclusive options are
/// resolved by whoever builds the configuration; the engine never checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityPolicy {
    /// Every neighbor is eligible.
    #[default]
    Baseline,
    /// Neighbor eligible iff its raw degree is below `max_degree`.
    DegreeLimit {
        /// Exclusive upper bound on neighbor degree.
        max_degree: usize,
    },
    /// Like `DegreeLimit`, with the bound picked by level index. Levels past
    /// the end of `limits` behave as `Baseline`.
    TieredDegreeLimit {
        /// Per-level exclusive degree bounds.
        limits: Vec<usize>,
    },
    /// Neighbor eligible iff its current community has fewer than `max_size`
    /// members.
    CommunitySizeLimit {
        /// Exclusive upper bound on community size.
        max_size: usize,
    },
}

/// What the engine knows about one neighbor when consulting a policy.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    /// Hierarchy level being optimized.
    pub level: usize,
    /// Raw degree (distinct non-loop neighbors) of the neighbor.
    pub degree: usize,
    /// Member count of the neighbor's current community.
    pub community_size: usize,
}

impl EligibilityPolicy {
    /// Whether `neighbor` may offer its community as a move candidate.
    #[inline]
    pub fn is_eligible(&self, neighbor: &Neighbor) -> bool {
        match self {
            EligibilityPolicy::Baseline => true,
            EligibilityPolicy::DegreeLimit { max_degree } => neighbor.degree < *max_degree,
            EligibilityPolicy::TieredDegreeLimit { limits } => limits
                .get(neighbor.level)
                .map_or(true, |limit| neighbor.degree < *limit),
            EligibilityPolicy::CommunitySizeLimit { max_size } => {
                neighbor.community_size < *max_size
            }
        }
    }

    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            EligibilityPolicy::Baseline => "baseline",
            EligibilityPolicy::DegreeLimit { .. } => "degree_limit",
            EligibilityPolicy::TieredDegreeLimit { .. } => "tiered_degree_limit",
            EligibilityPolicy::CommunitySizeLimit { .. } => "community_size_limit",
        }
    }
}

/// How the configured policy changes from one level to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyProgression {
    /// Same policy at every level.
    #[default]
    Fixed,
    /// `DegreeLimit(d)` becomes `DegreeLimit(d^(level + 1))`, saturating.
    /// Other policies are unaffected.
    DegreePower,
}

impl PolicyProgression {
    /// Policy in force at `level`, derived from the level-0 `policy`.
    pub fn policy_for_level(&self, policy: &EligibilityPolicy, level: usize) -> EligibilityPolicy {
        match (self, policy) {
            (PolicyProgression::DegreePower, EligibilityPolicy::DegreeLimit { max_degree }) => {
                let exp = u32::try_from(level + 1).unwrap_or(u32::MAX);
                EligibilityPolicy::DegreeLimit {
                    max_degree: max_degree.saturating_pow(exp),
                }
            }
            _ => policy.clone(),
        }
    }
}
