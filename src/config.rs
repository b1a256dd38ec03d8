//! Clustering configuration.
//!
//! Built in code with the `with_*` setters, or loaded from TOML:
//!
//! ```toml
//! min_modularity_gain = 0.000001
//! max_passes = 100
//! force_second_iteration = false
//! progression = "degree_power"
//!
//! [order]
//! kind = "shuffled"
//! seed = 7
//!
//! [policy]
//! kind = "degree_limit"
//! max_degree = 5
//! ```

use crate::community::{EligibilityPolicy, PolicyProgression};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Order in which a pass visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassOrder {
    /// Node index order. Deterministic.
    #[default]
    Sequential,
    /// Shuffled once per level from `seed`, offset by the level index.
    Shuffled {
        /// Base seed.
        seed: u64,
    },
}

/// Parameters for the multi-level Louvain run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LouvainConfig {
    /// A level keeps making passes only while a pass improves modularity by
    /// more than this.
    pub min_modularity_gain: f64,
    /// Cap on passes per level.
    pub max_passes: usize,
    /// Cap on hierarchy levels.
    pub max_levels: usize,
    /// Node visiting order.
    pub order: PassOrder,
    /// Policy at level 0.
    pub policy: EligibilityPolicy,
    /// How `policy` evolves with level.
    pub progression: PolicyProgression,
    /// Run a second level even when the first made no move. Set when a
    /// partition seed is supplied.
    pub force_second_iteration: bool,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            min_modularity_gain: 1e-6,
            max_passes: 100,
            max_levels: 32,
            order: PassOrder::Sequential,
            policy: EligibilityPolicy::Baseline,
            progression: PolicyProgression::Fixed,
            force_second_iteration: false,
        }
    }
}

impl LouvainConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum per-pass modularity gain.
    pub fn with_min_modularity_gain(mut self, gain: f64) -> Self {
        self.min_modularity_gain = gain;
        self
    }

    /// Set maximum passes per level.
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes;
        self
    }

    /// Set maximum hierarchy levels.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels;
        self
    }

    /// Set node visiting order.
    pub fn with_order(mut self, order: PassOrder) -> Self {
        self.order = order;
        self
    }

    /// Set level-0 eligibility policy.
    pub fn with_policy(mut self, policy: EligibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set policy progression.
    pub fn with_progression(mut self, progression: PolicyProgression) -> Self {
        self.progression = progression;
        self
    }

    /// Force a second level after the first.
    pub fn with_force_second_iteration(mut self, force: bool) -> Self {
        self.force_second_iteration = force;
        self
    }

    /// Parse from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded clustering config from {}", path.display());
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.min_modularity_gain.is_nan() {
            return Err(Error::InvalidParameter {
                name: "min_modularity_gain",
                message: "must not be NaN".into(),
            });
        }
        if self.max_passes == 0 {
            return Err(Error::InvalidParameter {
                name: "max_passes",
                message: "must be at least 1".into(),
            });
        }
        if self.max_levels == 0 {
            return Err(Error::InvalidParameter {
                name: "max_levels",
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = LouvainConfig::from_toml_str("").unwrap();
        assert_eq!(config, LouvainConfig::default());
    }

    #[test]
    fn test_toml_round_trip_of_policy_and_order() {
        let config = LouvainConfig::from_toml_str(
            r#"
            min_modularity_gain = 0.0
            force_second_iteration = true
            progression = "degree_power"

            [order]
            kind = "shuffled"
            seed = 7

            [policy]
            kind = "tiered_degree_limit"
            limits = [4, 16]
            "#,
        )
        .unwrap();

        assert_eq!(config.min_modularity_gain, 0.0);
        assert!(config.force_second_iteration);
        assert_eq!(config.order, PassOrder::Shuffled { seed: 7 });
        assert_eq!(config.progression, PolicyProgression::DegreePower);
        assert_eq!(
            config.policy,
            EligibilityPolicy::TieredDegreeLimit { limits: vec![4, 16] }
        );
        assert_eq!(config.max_passes, 100);
    }

    #[test]
    fn test_zero_passes_rejected() {
        let result = LouvainConfig::from_toml_str("max_passes = 0");
        assert!(matches!(
            result,
            Err(Error::InvalidParameter {
                name: "max_passes",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let result = LouvainConfig::from_toml_str("[policy]\nkind = \"nope\"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("louvain.toml");
        std::fs::write(&path, "max_levels = 3\n[policy]\nkind = \"degree_limit\"\nmax_degree = 5\n")
            .unwrap();

        let config = LouvainConfig::load(&path).unwrap();
        assert_eq!(config.max_levels, 3);
        assert_eq!(config.policy, EligibilityPolicy::DegreeLimit { max_degree: 5 });
    }
}
