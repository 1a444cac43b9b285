use std::collections::HashMap;

use plansearch_core::Mdp;
use serde::Serialize;

use crate::{MdpError, MdpSpec, spec::PROB_TOLERANCE};

/// Dense index of a state in a [`CompiledMdp`], in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateKey(usize);

impl StateKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Index of an action among the actions of its state, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActionKey(usize);

impl ActionKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ActionKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// One sampled step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub next: StateKey,
    pub reward: f64,
    /// Whether `next` is terminal.
    pub terminal: bool,
}

/// Validated MDP with resolved references, ready for solving and sampling.
#[derive(Debug, Clone)]
pub struct CompiledMdp {
    start: StateKey,
    states: Vec<StateRec>,
    state_ids: Vec<String>,
    state_id_to_key: HashMap<String, StateKey>,
}

#[derive(Debug, Clone)]
struct StateRec {
    terminal: bool,
    actions: Vec<ActionRec>,
}

#[derive(Debug, Clone)]
struct ActionRec {
    id: String,
    outcomes: Vec<OutcomeRec>,
    /// Running sum of outcome probabilities, for sampling.
    cdf: Vec<f64>,
}

#[derive(Debug, Clone)]
struct OutcomeRec {
    next: StateKey,
    prob: f64,
    reward: f64,
}

impl CompiledMdp {
    pub(crate) fn from_spec(spec: &MdpSpec) -> Result<Self, MdpError> {
        spec.validate_with_tolerance(PROB_TOLERANCE)?;

        let state_ids: Vec<String> = spec.states.iter().map(|state| state.id.clone()).collect();
        let state_id_to_key: HashMap<String, StateKey> = state_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), StateKey(idx)))
            .collect();
        let resolve = |id: &str| state_id_to_key.get(id).copied();

        let start = resolve(&spec.start).ok_or_else(|| MdpError::UnknownStartState {
            start: spec.start.clone(),
        })?;
        let mut states = Vec::with_capacity(spec.states.len());
        for state in &spec.states {
            let mut actions = Vec::with_capacity(state.actions.len());
            for action in &state.actions {
                let mut outcomes = Vec::with_capacity(action.outcomes.len());
                let mut cdf = Vec::with_capacity(action.outcomes.len());
                let mut cumulative = 0.0_f64;

                for outcome in &action.outcomes {
                    cumulative += outcome.prob;
                    cdf.push(cumulative);
                    let next =
                        resolve(&outcome.next).ok_or_else(|| MdpError::UnknownNextState {
                            state: state.id.clone(),
                            action: action.id.clone(),
                            next: outcome.next.clone(),
                        })?;
                    outcomes.push(OutcomeRec {
                        next,
                        prob: outcome.prob,
                        reward: outcome.reward,
                    });
                }

                actions.push(ActionRec {
                    id: action.id.clone(),
                    outcomes,
                    cdf,
                });
            }

            states.push(StateRec {
                terminal: state.terminal,
                actions,
            });
        }

        Ok(Self {
            start,
            states,
            state_ids,
            state_id_to_key,
        })
    }

    pub fn start(&self) -> StateKey {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of actions of `key`, 0 for terminal or unknown states.
    pub fn num_actions(&self, key: StateKey) -> usize {
        self.states
            .get(key.index())
            .map_or(0, |state| state.actions.len())
    }

    pub fn state_id(&self, key: StateKey) -> Option<&str> {
        self.state_ids.get(key.index()).map(String::as_str)
    }

    pub fn state_key(&self, id: &str) -> Option<StateKey> {
        self.state_id_to_key.get(id).copied()
    }

    /// Name of `action` as declared on `state`.
    pub fn action_id(&self, state: StateKey, action: ActionKey) -> Option<&str> {
        self.action(state, action).map(|rec| rec.id.as_str())
    }

    pub fn action_key(&self, state: StateKey, id: &str) -> Option<ActionKey> {
        self.states
            .get(state.index())?
            .actions
            .iter()
            .position(|action| action.id == id)
            .map(ActionKey)
    }

    /// Legal actions as a closure, for agents that take an action function.
    pub fn action_fn(&self) -> impl Fn(&StateKey) -> Vec<ActionKey> + '_ {
        move |state: &StateKey| self.possible_actions(state)
    }

    fn action(&self, state: StateKey, action: ActionKey) -> Option<&ActionRec> {
        self.states.get(state.index())?.actions.get(action.index())
    }

    /// Pick an outcome of `(state, action)` with a uniform `sample` in `[0, 1)`.
    /// A terminal state stays where it is with reward 0.
    pub(crate) fn sample_transition(
        &self,
        state: StateKey,
        action: ActionKey,
        sample: f64,
    ) -> Option<Transition> {
        let rec = self.states.get(state.index())?;
        if rec.terminal {
            return Some(Transition {
                next: state,
                reward: 0.0,
                terminal: true,
            });
        }

        let action = rec.actions.get(action.index())?;
        let last = action.outcomes.len().checked_sub(1)?;
        let chosen = action.cdf.partition_point(|p| *p <= sample).min(last);
        let outcome = &action.outcomes[chosen];

        Some(Transition {
            next: outcome.next,
            reward: outcome.reward,
            terminal: self.states.get(outcome.next.index())?.terminal,
        })
    }
}

impl Mdp for CompiledMdp {
    type State = StateKey;
    type Action = ActionKey;

    fn states(&self) -> Vec<StateKey> {
        (0..self.states.len()).map(StateKey).collect()
    }

    fn possible_actions(&self, state: &StateKey) -> Vec<ActionKey> {
        (0..self.num_actions(*state)).map(ActionKey).collect()
    }

    fn transitions(&self, state: &StateKey, action: &ActionKey) -> Vec<(StateKey, f64)> {
        self.action(*state, *action)
            .map(|rec| rec.outcomes.iter().map(|o| (o.next, o.prob)).collect())
            .unwrap_or_default()
    }

    fn reward(&self, state: &StateKey, action: &ActionKey, next: &StateKey) -> f64 {
        self.action(*state, *action)
            .and_then(|rec| rec.outcomes.iter().find(|o| o.next == *next))
            .map_or(0.0, |o| o.reward)
    }

    fn is_terminal(&self, state: &StateKey) -> bool {
        self.states.get(state.index()).is_some_and(|rec| rec.terminal)
    }
}
