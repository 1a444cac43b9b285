use std::hash::Hash;

/// A Markov decision process with an explicitly enumerable state space.
///
/// For every `(state, action)` the probabilities returned by `transitions`
/// are expected to sum to 1; this is not checked.
pub trait Mdp {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    /// Every state of the process.
    fn states(&self) -> Vec<Self::State>;

    /// Actions available in `state`. Empty for terminal states.
    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// `(next_state, probability)` pairs for taking `action` in `state`.
    fn transitions(&self, state: &Self::State, action: &Self::Action) -> Vec<(Self::State, f64)>;

    /// Reward received for the transition `state --action--> next_state`.
    fn reward(&self, state: &Self::State, action: &Self::Action, next_state: &Self::State) -> f64;

    fn is_terminal(&self, state: &Self::State) -> bool;
}

impl<M: Mdp + ?Sized> Mdp for &M {
    type State = M::State;
    type Action = M::Action;

    fn states(&self) -> Vec<Self::State> {
        (**self).states()
    }

    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        (**self).possible_actions(state)
    }

    fn transitions(&self, state: &Self::State, action: &Self::Action) -> Vec<(Self::State, f64)> {
        (**self).transitions(state, action)
    }

    fn reward(&self, state: &Self::State, action: &Self::Action, next_state: &Self::State) -> f64 {
        (**self).reward(state, action, next_state)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        (**self).is_terminal(state)
    }
}
