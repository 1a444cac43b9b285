use std::{collections::HashMap, hash::Hash};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::{
    config::{AgentConfig, ConfigError},
    learning::{
        agent::{EpisodeSummary, ReinforcementAgent, epsilon_greedy, greedy},
        params::{EpisodeTracker, LearningParams},
    },
};

/// Tabular Q-learning with epsilon-greedy exploration.
///
/// Legal actions come from the environment through `legal_actions`. Pairs
/// never updated have a Q-value of 0.
pub struct QLearningAgent<S, A, F> {
    q_values: HashMap<(S, A), f64>,
    legal_actions: F,
    tracker: EpisodeTracker,
    rng: ChaCha8Rng,
}

impl<S, A, F> QLearningAgent<S, A, F>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    F: Fn(&S) -> Vec<A>,
{
    pub fn new(params: LearningParams, legal_actions: F, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(QLearningAgent {
            q_values: HashMap::new(),
            legal_actions,
            tracker: EpisodeTracker::new(params),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Build from the `learning` section and seed of an agent config.
    pub fn from_config(config: &AgentConfig, legal_actions: F) -> Result<Self, ConfigError> {
        Self::new(config.learning, legal_actions, config.seed)
    }

    pub fn tracker(&self) -> &EpisodeTracker {
        &self.tracker
    }

    pub fn legal_actions(&self, state: &S) -> Vec<A> {
        (self.legal_actions)(state)
    }

    /// Number of `(state, action)` pairs with a stored estimate.
    pub fn table_len(&self) -> usize {
        self.q_values.len()
    }

    /// Blend the sampled return into the stored estimate:
    /// `Q(s, a) = (1 - alpha) Q(s, a) + alpha (r + discount V(s'))`.
    pub fn update(&mut self, state: &S, action: &A, next_state: &S, reward: f64) {
        let alpha = self.tracker.alpha();
        let sample = reward + self.tracker.discount() * self.value(next_state);
        let updated = (1.0 - alpha) * self.q_value(state, action) + alpha * sample;
        trace!(reward, sample, updated, "q-value update");
        self.q_values.insert((state.clone(), action.clone()), updated);
    }
}

impl<S, A, F> ReinforcementAgent for QLearningAgent<S, A, F>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    F: Fn(&S) -> Vec<A>,
{
    type State = S;
    type Action = A;

    fn choose_action(&mut self, state: &S) -> Option<A> {
        let actions = self.legal_actions(state);
        let epsilon = self.tracker.epsilon();
        let QLearningAgent { q_values, rng, .. } = self;
        epsilon_greedy(rng, epsilon, actions, |action| {
            lookup(&*q_values, state, action)
        })
    }

    fn observe_transition(&mut self, state: &S, action: &A, next_state: &S, reward: f64) {
        self.tracker.record_reward(reward);
        self.update(state, action, next_state, reward);
    }

    fn q_value(&self, state: &S, action: &A) -> f64 {
        lookup(&self.q_values, state, action)
    }

    fn value(&self, state: &S) -> f64 {
        greedy(self.legal_actions(state), |action| self.q_value(state, action))
            .map_or(0.0, |(_, value)| value)
    }

    fn policy(&self, state: &S) -> Option<A> {
        greedy(self.legal_actions(state), |action| self.q_value(state, action))
            .map(|(action, _)| action)
    }

    fn start_episode(&mut self) {
        self.tracker.start_episode();
    }

    fn stop_episode(&mut self) -> EpisodeSummary {
        self.tracker.stop_episode()
    }
}

fn lookup<S, A>(q_values: &HashMap<(S, A), f64>, state: &S, action: &A) -> f64
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    q_values
        .get(&(state.clone(), action.clone()))
        .copied()
        .unwrap_or(0.0)
}
