use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{adversarial::tree_search::SearchMode, learning::params::LearningParams};

const DEFAULT_AGENT_CONFIG_YAML: &str = include_str!("../config/agents.default.yaml");

/// Settings for batch value iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueIterationParams {
    pub discount: f64,
    pub iterations: usize,
}

impl Default for ValueIterationParams {
    fn default() -> Self {
        ValueIterationParams {
            discount: 0.9,
            iterations: 100,
        }
    }
}

/// Settings for depth-limited game-tree search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSearchParams {
    pub mode: SearchMode,
    /// Plies to search; one ply is one move by every agent.
    pub depth: usize,
    /// Node cap used by the iterative-deepening contest agent.
    pub node_budget: usize,
}

impl Default for GameSearchParams {
    fn default() -> Self {
        GameSearchParams {
            mode: SearchMode::AlphaBeta,
            depth: 2,
            node_budget: 50_000,
        }
    }
}

/// Combined agent configuration, loadable from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seed for every agent RNG built from this config.
    pub seed: u64,
    pub learning: LearningParams,
    pub value_iteration: ValueIterationParams,
    pub game: GameSearchParams,
}

impl AgentConfig {
    /// Parse an agent config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an agent config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config bundled with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_AGENT_CONFIG_YAML
    }

    /// Parse the bundled default YAML config.
    pub fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Serialize this config back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.learning.validate()?;

        let vi = &self.value_iteration;
        if !vi.discount.is_finite() || !(0.0..=1.0).contains(&vi.discount) {
            return Err(ConfigError::Invalid(
                "value_iteration.discount must be within [0, 1]".to_string(),
            ));
        }

        if self.game.depth == 0 {
            return Err(ConfigError::Invalid(
                "game.depth must be greater than 0".to_string(),
            ));
        }
        if self.game.node_budget == 0 {
            return Err(ConfigError::Invalid(
                "game.node_budget must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating agent configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid agent config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::{AgentConfig, ConfigError};
    use crate::adversarial::tree_search::SearchMode;

    #[test]
    fn default_yaml_parses_and_validates() {
        let config = AgentConfig::from_default_yaml().expect("default yaml should parse");
        assert_eq!(config.game.mode, SearchMode::AlphaBeta);
        assert_eq!(config.value_iteration.iterations, 100);
        assert!(config.learning.num_training > 0);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = AgentConfig::from_yaml_str("seed: 9\n").expect("partial yaml should parse");
        assert_eq!(config.seed, 9);
        assert_eq!(config.value_iteration, Default::default());
    }

    #[test]
    fn out_of_range_epsilon_is_rejected() {
        let err = AgentConfig::from_yaml_str("learning:\n  epsilon: 1.5\n")
            .expect_err("epsilon above one is invalid");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn yaml_round_trip_preserves_values() {
        let mut config = AgentConfig::default();
        config.game.depth = 4;
        let yaml = config.to_yaml().expect("serialize");
        let parsed = AgentConfig::from_yaml_str(&yaml).expect("parse");
        assert_eq!(parsed, config);
    }
}
