use std::marker::PhantomData;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

use crate::{
    config::{AgentConfig, ConfigError},
    learning::{
        agent::{EpisodeSummary, ReinforcementAgent, epsilon_greedy, greedy},
        features::FeatureExtractor,
        params::{EpisodeTracker, LearningParams},
    },
};

/// Learned weights of an [`ApproximateQAgent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    /// Completed episodes when the snapshot was taken.
    pub episodes: usize,
    pub weights: Vec<f64>,
}

impl WeightSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Q-learning with a linear model: `Q(s, a) = w . f(s, a)`.
///
/// The weight vector is the only learned state. It has the extractor's
/// dimension and starts at 0.
pub struct ApproximateQAgent<S, A, X, F> {
    extractor: X,
    weights: Vec<f64>,
    legal_actions: F,
    tracker: EpisodeTracker,
    rng: ChaCha8Rng,
    _pair: PhantomData<fn(&S, &A)>,
}

impl<S, A, X, F> ApproximateQAgent<S, A, X, F>
where
    A: Clone,
    X: FeatureExtractor<S, A>,
    F: Fn(&S) -> Vec<A>,
{
    pub fn new(
        params: LearningParams,
        extractor: X,
        legal_actions: F,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        let dimension = extractor.dimension();
        if dimension == 0 {
            return Err(ConfigError::Invalid(
                "feature extractor must produce at least one feature".to_string(),
            ));
        }

        Ok(ApproximateQAgent {
            extractor,
            weights: vec![0.0; dimension],
            legal_actions,
            tracker: EpisodeTracker::new(params),
            rng: ChaCha8Rng::seed_from_u64(seed),
            _pair: PhantomData,
        })
    }

    pub fn from_config(
        config: &AgentConfig,
        extractor: X,
        legal_actions: F,
    ) -> Result<Self, ConfigError> {
        Self::new(config.learning, extractor, legal_actions, config.seed)
    }

    pub fn tracker(&self) -> &EpisodeTracker {
        &self.tracker
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn snapshot(&self) -> WeightSnapshot {
        WeightSnapshot {
            episodes: self.tracker.episodes_so_far(),
            weights: self.weights.clone(),
        }
    }

    /// Replace the weights with previously saved ones.
    pub fn restore(&mut self, snapshot: &WeightSnapshot) -> Result<(), ConfigError> {
        if snapshot.weights.len() != self.weights.len() {
            return Err(ConfigError::Invalid(format!(
                "snapshot has {} weights, extractor has {} features",
                snapshot.weights.len(),
                self.weights.len()
            )));
        }
        self.weights.clone_from(&snapshot.weights);
        Ok(())
    }

    /// Move every weight along its feature by `alpha * correction`, where
    /// `correction = r + discount V(s') - Q(s, a)`.
    ///
    /// Fails without touching the weights when any feature vector involved
    /// does not have the extractor's dimension.
    pub fn update(
        &mut self,
        state: &S,
        action: &A,
        next_state: &S,
        reward: f64,
    ) -> Result<(), ConfigError> {
        let features = self.checked_features(state, action)?;
        let estimate = dot(&self.weights, &features);

        let mut next_value: Option<f64> = None;
        for next_action in (self.legal_actions)(next_state) {
            let q = dot(&self.weights, &self.checked_features(next_state, &next_action)?);
            next_value = Some(next_value.map_or(q, |best| best.max(q)));
        }

        let correction =
            reward + self.tracker.discount() * next_value.unwrap_or(0.0) - estimate;
        let step = self.tracker.alpha() * correction;

        for (weight, feature) in self.weights.iter_mut().zip(&features) {
            *weight += step * feature;
        }
        trace!(reward, estimate, correction, "weight update");
        Ok(())
    }

    fn checked_features(&self, state: &S, action: &A) -> Result<Vec<f64>, ConfigError> {
        let features = self.extractor.features(state, action);
        if features.len() != self.weights.len() {
            return Err(ConfigError::Invalid(format!(
                "extractor returned {} features, declared dimension is {}",
                features.len(),
                self.weights.len()
            )));
        }
        Ok(features)
    }
}

impl<S, A, X, F> ReinforcementAgent for ApproximateQAgent<S, A, X, F>
where
    A: Clone,
    X: FeatureExtractor<S, A>,
    F: Fn(&S) -> Vec<A>,
{
    type State = S;
    type Action = A;

    fn choose_action(&mut self, state: &S) -> Option<A> {
        let actions = (self.legal_actions)(state);
        let epsilon = self.tracker.epsilon();
        let ApproximateQAgent {
            extractor,
            weights,
            rng,
            ..
        } = self;
        epsilon_greedy(rng, epsilon, actions, |action| {
            dot(&*weights, &extractor.features(state, action))
        })
    }

    fn observe_transition(&mut self, state: &S, action: &A, next_state: &S, reward: f64) {
        self.tracker.record_reward(reward);
        if let Err(err) = self.update(state, action, next_state, reward) {
            warn!(%err, "skipping weight update");
        }
    }

    fn q_value(&self, state: &S, action: &A) -> f64 {
        dot(&self.weights, &self.extractor.features(state, action))
    }

    fn value(&self, state: &S) -> f64 {
        greedy((self.legal_actions)(state), |action| self.q_value(state, action))
            .map_or(0.0, |(_, value)| value)
    }

    fn policy(&self, state: &S) -> Option<A> {
        greedy((self.legal_actions)(state), |action| self.q_value(state, action))
            .map(|(action, _)| action)
    }

    fn start_episode(&mut self) {
        self.tracker.start_episode();
    }

    fn stop_episode(&mut self) -> EpisodeSummary {
        let summary = self.tracker.stop_episode();
        if summary.episode == self.tracker.params().num_training {
            info!(
                episodes = summary.episode,
                weights = ?self.weights,
                "approximate q-learning finished training"
            );
        }
        summary
    }
}

/// A feature vector of the wrong length has no estimate and scores NaN.
fn dot(weights: &[f64], features: &[f64]) -> f64 {
    if weights.len() != features.len() {
        return f64::NAN;
    }
    weights.iter().zip(features).map(|(w, f)| w * f).sum()
}
