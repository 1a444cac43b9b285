use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::{config::ValueIterationParams, mdp::model::Mdp, select::first_max_by};

/// Batch value iteration over an [`Mdp`], run to a fixed number of passes.
///
/// Each pass builds a fresh table from the previous one, so every state in a
/// pass sees the same snapshot. Terminal states stay at 0.
pub struct ValueIterationAgent<M: Mdp> {
    mdp: M,
    discount: f64,
    values: HashMap<M::State, f64>,
    residuals: Vec<f64>,
}

impl<M: Mdp> ValueIterationAgent<M> {
    /// Run `iterations` synchronous passes with the given discount rate.
    pub fn solve(mdp: M, discount: f64, iterations: usize) -> Self {
        let states = mdp.states();
        let mut values: HashMap<M::State, f64> = HashMap::with_capacity(states.len());
        let mut residuals = Vec::with_capacity(iterations);

        for pass in 0..iterations {
            let next: HashMap<M::State, f64> = states
                .iter()
                .map(|state| (state.clone(), bellman_backup(&mdp, discount, &values, state)))
                .collect();

            let residual = states
                .iter()
                .map(|state| (lookup(&next, state) - lookup(&values, state)).abs())
                .fold(0.0, f64::max);
            trace!(pass, residual, "value iteration pass");

            residuals.push(residual);
            values = next;
        }

        debug!(
            states = states.len(),
            iterations,
            discount,
            final_residual = residuals.last().copied().unwrap_or(0.0),
            "value iteration finished"
        );

        ValueIterationAgent {
            mdp,
            discount,
            values,
            residuals,
        }
    }

    /// Solve with discount and pass count taken from `params`.
    pub fn solve_with(mdp: M, params: &ValueIterationParams) -> Self {
        Self::solve(mdp, params.discount, params.iterations)
    }

    pub fn mdp(&self) -> &M {
        &self.mdp
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Value of `state` after the final pass; 0 for states never valued.
    pub fn value(&self, state: &M::State) -> f64 {
        lookup(&self.values, state)
    }

    /// Expected return of taking `action` in `state`, then following the values.
    /// Computed on demand from the final table.
    pub fn q_value(&self, state: &M::State, action: &M::Action) -> f64 {
        q_from_values(&self.mdp, self.discount, &self.values, state, action)
    }

    /// Action with the highest Q-value, first one on ties. `None` without legal actions.
    pub fn policy(&self, state: &M::State) -> Option<M::Action> {
        first_max_by(self.mdp.possible_actions(state), |action| {
            self.q_value(state, action)
        })
        .map(|(action, _)| action)
    }

    /// The policy action; value iteration never explores.
    pub fn action(&self, state: &M::State) -> Option<M::Action> {
        self.policy(state)
    }

    /// Largest absolute value change of each pass, in pass order.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    pub fn iterations(&self) -> usize {
        self.residuals.len()
    }

    /// Values in the state order reported by the MDP.
    pub fn snapshot(&self) -> ValueTableSnapshot<M::State> {
        let entries = self
            .mdp
            .states()
            .into_iter()
            .map(|state| ValueEntry {
                value: self.value(&state),
                terminal: self.mdp.possible_actions(&state).is_empty(),
                state,
            })
            .collect();

        ValueTableSnapshot {
            discount: self.discount,
            iterations: self.iterations(),
            entries,
        }
    }
}

fn lookup<S: Eq + std::hash::Hash>(values: &HashMap<S, f64>, state: &S) -> f64 {
    values.get(state).copied().unwrap_or(0.0)
}

fn q_from_values<M: Mdp>(
    mdp: &M,
    discount: f64,
    values: &HashMap<M::State, f64>,
    state: &M::State,
    action: &M::Action,
) -> f64 {
    mdp.transitions(state, action)
        .iter()
        .map(|(next, prob)| prob * (mdp.reward(state, action, next) + discount * lookup(values, next)))
        .sum()
}

fn bellman_backup<M: Mdp>(
    mdp: &M,
    discount: f64,
    values: &HashMap<M::State, f64>,
    state: &M::State,
) -> f64 {
    if mdp.is_terminal(state) {
        return 0.0;
    }

    mdp.possible_actions(state)
        .iter()
        .map(|action| q_from_values(mdp, discount, values, state, action))
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Serializable view of a value table.
#[derive(Debug, Clone, Serialize)]
pub struct ValueTableSnapshot<S> {
    pub discount: f64,
    pub iterations: usize,
    pub entries: Vec<ValueEntry<S>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueEntry<S> {
    pub state: S,
    pub value: f64,
    /// Whether the state has no legal action.
    pub terminal: bool,
}

impl<S: Serialize> ValueTableSnapshot<S> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
