use std::hash::Hash;

/// One edge out of a state: where it leads, which action takes it, and what it costs.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    pub state: S,
    pub action: A,
    pub cost: f64,
}

impl<S, A> Successor<S, A> {
    pub fn new(state: S, action: A, cost: f64) -> Self {
        Successor {
            state,
            action,
            cost,
        }
    }
}

/// A state graph explored implicitly from a start state.
///
/// States are compared and hashed to detect repeated visits, so two values
/// describing the same situation must be equal. Step costs must be
/// non-negative for uniform-cost and A* search to return optimal plans.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    /// Return the state the search starts from.
    fn start_state(&self) -> Self::State;

    /// Return whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Enumerate every `(next_state, action, step_cost)` edge leaving `state`.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;
}

/// Heuristic that estimates zero remaining cost everywhere.
/// A* with this heuristic expands states in uniform-cost order.
pub fn null_heuristic<P: SearchProblem>(_state: &P::State, _problem: &P) -> f64 {
    0.0
}
