//! Hyper-parameters for the tabular Q-learning agent.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How the temporal-difference correction is written back to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UpdateRule {
    /// `q(s, a) += current + α (target - current)`.
    ///
    /// The stored value keeps what it already held and accumulates the
    /// corrected estimate on top of it.
    #[default]
    Accumulating,
    /// `q(s, a) = current + α (target - current)`, the textbook rule.
    Replacing,
}

/// Which actions the bootstrap maximum ranges over in the next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BootstrapScope {
    /// Every cell index, occupied or not.
    #[default]
    AllActions,
    /// Only cells that are empty in the next state.
    EmptyCells,
}

/// Configuration for [`QLearningAgent`](super::QLearningAgent).
///
/// Fixed at construction; the agent never changes it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QLearningConfig {
    /// Learning rate α.
    pub learning_rate: f64,
    /// Discount factor γ.
    pub discount_factor: f64,
    /// Exploration probability ε.
    pub epsilon: f64,
    pub update_rule: UpdateRule,
    pub bootstrap: BootstrapScope,
}

impl QLearningConfig {
    /// Checks that every rate is finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("learning_rate", self.learning_rate),
            ("discount_factor", self.discount_factor),
            ("epsilon", self.epsilon),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Textbook Q-learning: replacing updates, bootstrapping over empty cells.
    pub fn standard() -> Self {
        Self {
            update_rule: UpdateRule::Replacing,
            bootstrap: BootstrapScope::EmptyCells,
            ..Self::default()
        }
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.95,
            epsilon: 0.1,
            update_rule: UpdateRule::default(),
            bootstrap: BootstrapScope::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = QLearningConfig::default();
        assert_eq!(cfg.learning_rate, 0.1);
        assert_eq!(cfg.discount_factor, 0.95);
        assert_eq!(cfg.epsilon, 0.1);
        assert_eq!(cfg.update_rule, UpdateRule::Accumulating);
        assert_eq!(cfg.bootstrap, BootstrapScope::AllActions);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn standard_config_is_valid() {
        let cfg = QLearningConfig::standard();
        assert_eq!(cfg.update_rule, UpdateRule::Replacing);
        assert_eq!(cfg.bootstrap, BootstrapScope::EmptyCells);
        assert_eq!(cfg.learning_rate, 0.1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_epsilon() {
        let cfg = QLearningConfig {
            epsilon: 1.5,
            ..QLearningConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::OutOfRange {
                name: "epsilon",
                value: 1.5
            })
        );
    }

    #[test]
    fn rejects_negative_learning_rate() {
        let cfg = QLearningConfig {
            learning_rate: -0.1,
            ..QLearningConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfRange {
                name: "learning_rate",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_discount() {
        let cfg = QLearningConfig {
            discount_factor: f64::NAN,
            ..QLearningConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotFinite {
                name: "discount_factor",
                ..
            })
        ));
    }

    #[test]
    fn boundaries_are_accepted() {
        let cfg = QLearningConfig {
            learning_rate: 1.0,
            discount_factor: 0.0,
            epsilon: 0.0,
            ..QLearningConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"epsilon": 0.2, "update_rule": "replacing"}"#;
        let cfg: QLearningConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.epsilon, 0.2);
        assert_eq!(cfg.update_rule, UpdateRule::Replacing);
        assert_eq!(cfg.learning_rate, 0.1);
        assert_eq!(cfg.bootstrap, BootstrapScope::AllActions);
    }
}
