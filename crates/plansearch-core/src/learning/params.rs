use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::ConfigError, learning::agent::EpisodeSummary};

/// Rates shared by every learning agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningParams {
    /// Learning rate.
    pub alpha: f64,
    /// Probability of taking a random legal action.
    pub epsilon: f64,
    pub discount: f64,
    /// Episodes to learn for before switching learning and exploration off.
    pub num_training: usize,
}

impl Default for LearningParams {
    fn default() -> Self {
        LearningParams {
            alpha: 0.5,
            epsilon: 0.05,
            discount: 0.9,
            num_training: 100,
        }
    }
}

impl LearningParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("learning.alpha", self.alpha)?;
        check_unit("learning.epsilon", self.epsilon)?;
        check_unit("learning.discount", self.discount)
    }
}

fn check_unit(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid(format!("{name} must be within [0, 1]")));
    }
    Ok(())
}

/// Episode bookkeeping and the live rates of one agent.
///
/// Once `num_training` episodes have completed the live `alpha` and `epsilon`
/// drop to 0, so the agent keeps acting greedily on what it has learned.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeTracker {
    configured: LearningParams,
    alpha: f64,
    epsilon: f64,
    episodes_so_far: usize,
    training_rewards: f64,
    testing_rewards: f64,
    episode_rewards: f64,
}

impl EpisodeTracker {
    pub fn new(params: LearningParams) -> Self {
        EpisodeTracker {
            configured: params,
            alpha: params.alpha,
            epsilon: params.epsilon,
            episodes_so_far: 0,
            training_rewards: 0.0,
            testing_rewards: 0.0,
            episode_rewards: 0.0,
        }
    }

    /// Parameters the tracker was created with.
    pub fn params(&self) -> &LearningParams {
        &self.configured
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn discount(&self) -> f64 {
        self.configured.discount
    }

    pub fn episodes_so_far(&self) -> usize {
        self.episodes_so_far
    }

    pub fn is_in_training(&self) -> bool {
        self.episodes_so_far < self.configured.num_training
    }

    pub fn is_in_testing(&self) -> bool {
        !self.is_in_training()
    }

    /// Reward summed over all completed training episodes.
    pub fn training_rewards(&self) -> f64 {
        self.training_rewards
    }

    /// Reward summed over all completed episodes after training.
    pub fn testing_rewards(&self) -> f64 {
        self.testing_rewards
    }

    /// Reward collected so far in the running episode.
    pub fn episode_rewards(&self) -> f64 {
        self.episode_rewards
    }

    pub fn start_episode(&mut self) {
        self.episode_rewards = 0.0;
    }

    pub fn record_reward(&mut self, reward: f64) {
        self.episode_rewards += reward;
    }

    /// Close the running episode and switch learning off once training is done.
    pub fn stop_episode(&mut self) -> EpisodeSummary {
        let training = self.is_in_training();
        if training {
            self.training_rewards += self.episode_rewards;
        } else {
            self.testing_rewards += self.episode_rewards;
        }
        self.episodes_so_far += 1;

        if self.episodes_so_far >= self.configured.num_training {
            self.alpha = 0.0;
            self.epsilon = 0.0;
        }

        let summary = EpisodeSummary {
            episode: self.episodes_so_far,
            reward: self.episode_rewards,
            training,
        };
        debug!(
            episode = summary.episode,
            reward = summary.reward,
            training,
            "episode finished"
        );
        self.episode_rewards = 0.0;
        summary
    }
}
