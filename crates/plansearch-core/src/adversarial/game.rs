/// Turn-based game seen from the search's side.
///
/// Agent 0 maximizes; every other agent either minimizes or, under
/// expectimax, picks uniformly at random. Agents move in index order and
/// one ply ends once the last agent has moved.
pub trait AdversarialGame {
    type State: Clone;
    type Action: Clone;

    /// Number of agents taking turns in `state`, including agent 0.
    fn num_agents(&self, state: &Self::State) -> usize;

    /// Actions available to `agent` in `state`. Empty when the agent cannot move.
    fn legal_actions(&self, state: &Self::State, agent: usize) -> Vec<Self::Action>;

    /// State reached after `agent` plays `action` in `state`.
    fn successor(&self, state: &Self::State, agent: usize, action: &Self::Action) -> Self::State;

    fn is_win(&self, state: &Self::State) -> bool;

    fn is_lose(&self, state: &Self::State) -> bool;
}
