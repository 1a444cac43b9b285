use rand::{Rng, seq::SliceRandom};

use crate::select::first_max_by;

/// What an agent reports when an episode ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// 1-based index of the episode that just finished.
    pub episode: usize,
    /// Reward collected during the episode.
    pub reward: f64,
    /// Whether the episode counted as training.
    pub training: bool,
}

/// An agent that learns from transitions handed to it by its environment.
///
/// The environment drives learning: it asks for an action, applies it, and
/// reports the outcome through [`ReinforcementAgent::observe_transition`].
/// An agent never calls that on itself.
pub trait ReinforcementAgent {
    type State;
    type Action;

    /// Next action in `state`, `None` when no action is legal.
    fn choose_action(&mut self, state: &Self::State) -> Option<Self::Action>;

    /// Learn from one step and add `reward` to the running episode.
    fn observe_transition(
        &mut self,
        state: &Self::State,
        action: &Self::Action,
        next_state: &Self::State,
        reward: f64,
    );

    fn q_value(&self, state: &Self::State, action: &Self::Action) -> f64;

    /// Best Q-value over legal actions, 0 without any.
    fn value(&self, state: &Self::State) -> f64;

    /// Greedy action, first one on ties. `None` without legal actions.
    fn policy(&self, state: &Self::State) -> Option<Self::Action>;

    fn start_episode(&mut self);

    fn stop_episode(&mut self) -> EpisodeSummary;
}

/// Greedy action and its value, first one on ties.
pub(crate) fn greedy<A, F>(actions: Vec<A>, q_value: F) -> Option<(A, f64)>
where
    F: FnMut(&A) -> f64,
{
    first_max_by(actions, q_value)
}

/// With probability `epsilon` a uniformly random action, otherwise the greedy one.
pub(crate) fn epsilon_greedy<A, R, F>(
    rng: &mut R,
    epsilon: f64,
    actions: Vec<A>,
    q_value: F,
) -> Option<A>
where
    A: Clone,
    R: Rng,
    F: FnMut(&A) -> f64,
{
    if actions.is_empty() {
        return None;
    }
    if rng.gen_bool(epsilon) {
        return actions.choose(rng).cloned();
    }
    greedy(actions, q_value).map(|(action, _)| action)
}
