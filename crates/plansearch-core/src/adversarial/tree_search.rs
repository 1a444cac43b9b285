use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{adversarial::game::AdversarialGame, config::GameSearchParams};

/// How non-maximizing agents are modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Every other agent picks its minimizing move.
    #[default]
    Minimax,
    /// Minimax with alpha-beta pruning. Same value and action, fewer nodes.
    AlphaBeta,
    /// Every other agent moves uniformly at random.
    Expectimax,
}

/// Outcome of a game-tree search from one root state.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    /// Best action for agent 0, `None` when the root is a leaf.
    pub action: Option<A>,
    /// Backed-up value of the root.
    pub value: f64,
    /// Tree nodes visited, root included.
    pub nodes: usize,
}

/// Marker returned up the recursion once a node budget is spent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BudgetExhausted;

/// One recursive evaluation over `(state, depth, agent)`.
pub(crate) struct TreeEvaluator<'a, G, E> {
    game: &'a G,
    evaluate: &'a E,
    mode: SearchMode,
    budget: Option<usize>,
    nodes: usize,
}

impl<'a, G, E> TreeEvaluator<'a, G, E>
where
    G: AdversarialGame,
    E: Fn(&G::State) -> f64,
{
    pub fn new(game: &'a G, evaluate: &'a E, mode: SearchMode, budget: Option<usize>) -> Self {
        TreeEvaluator {
            game,
            evaluate,
            mode,
            budget,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Evaluate `state` with agent 0 to move and `depth` plies remaining.
    pub fn root(
        &mut self,
        state: &G::State,
        depth: usize,
    ) -> Result<(f64, Option<G::Action>), BudgetExhausted> {
        self.value(state, depth, 0, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn value(
        &mut self,
        state: &G::State,
        depth: usize,
        agent: usize,
        alpha: f64,
        beta: f64,
    ) -> Result<(f64, Option<G::Action>), BudgetExhausted> {
        if self.budget.is_some_and(|budget| self.nodes >= budget) {
            return Err(BudgetExhausted);
        }
        self.nodes += 1;

        if depth == 0 || self.game.is_win(state) || self.game.is_lose(state) {
            return Ok(((self.evaluate)(state), None));
        }

        let actions = self.game.legal_actions(state, agent);
        if actions.is_empty() {
            return Ok(((self.evaluate)(state), None));
        }

        let num_agents = self.game.num_agents(state).max(1);
        let next = if agent + 1 >= num_agents {
            (0, depth - 1)
        } else {
            (agent + 1, depth)
        };

        match (agent, self.mode) {
            (0, _) => self.max_value(state, actions, agent, next, alpha, beta),
            (_, SearchMode::Expectimax) => self.chance_value(state, actions, agent, next),
            _ => self.min_value(state, actions, agent, next, alpha, beta),
        }
    }

    fn max_value(
        &mut self,
        state: &G::State,
        actions: Vec<G::Action>,
        agent: usize,
        (next_agent, next_depth): (usize, usize),
        mut alpha: f64,
        beta: f64,
    ) -> Result<(f64, Option<G::Action>), BudgetExhausted> {
        let mut best = f64::NEG_INFINITY;
        let mut best_action = None;

        for action in actions {
            let child = self.game.successor(state, agent, &action);
            let (value, _) = self.value(&child, next_depth, next_agent, alpha, beta)?;

            if best_action.is_none() || value > best {
                best = value;
                best_action = Some(action);
            }

            if self.mode == SearchMode::AlphaBeta {
                // Strict: an equal value may still be the minimizer's choice above.
                if best > beta {
                    break;
                }
                alpha = alpha.max(best);
            }
        }

        Ok((best, best_action))
    }

    fn min_value(
        &mut self,
        state: &G::State,
        actions: Vec<G::Action>,
        agent: usize,
        (next_agent, next_depth): (usize, usize),
        alpha: f64,
        mut beta: f64,
    ) -> Result<(f64, Option<G::Action>), BudgetExhausted> {
        let mut best = f64::INFINITY;
        let mut best_action = None;

        for action in actions {
            let child = self.game.successor(state, agent, &action);
            let (value, _) = self.value(&child, next_depth, next_agent, alpha, beta)?;

            if best_action.is_none() || value < best {
                best = value;
                best_action = Some(action);
            }

            if self.mode == SearchMode::AlphaBeta {
                if best < alpha {
                    break;
                }
                beta = beta.min(best);
            }
        }

        Ok((best, best_action))
    }

    fn chance_value(
        &mut self,
        state: &G::State,
        actions: Vec<G::Action>,
        agent: usize,
        (next_agent, next_depth): (usize, usize),
    ) -> Result<(f64, Option<G::Action>), BudgetExhausted> {
        let weight = 1.0 / actions.len() as f64;
        let mut expected = 0.0;

        for action in &actions {
            let child = self.game.successor(state, agent, action);
            let (value, _) = self.value(
                &child,
                next_depth,
                next_agent,
                f64::NEG_INFINITY,
                f64::INFINITY,
            )?;
            expected += weight * value;
        }

        Ok((expected, None))
    }
}

/// Depth-limited game-tree search for agent 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdversarialSearch {
    mode: SearchMode,
}

impl AdversarialSearch {
    pub fn new(mode: SearchMode) -> Self {
        AdversarialSearch { mode }
    }

    pub fn minimax() -> Self {
        Self::new(SearchMode::Minimax)
    }

    pub fn alpha_beta() -> Self {
        Self::new(SearchMode::AlphaBeta)
    }

    pub fn expectimax() -> Self {
        Self::new(SearchMode::Expectimax)
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Pick agent 0's action by searching `depth` plies below `state`.
    ///
    /// Leaves (depth exhausted, won, lost, or no legal move) are scored with
    /// `evaluate`. Among equally valued actions the first one enumerated wins.
    pub fn decide<G, E>(
        &self,
        game: &G,
        state: &G::State,
        depth: usize,
        evaluate: E,
    ) -> Decision<G::Action>
    where
        G: AdversarialGame,
        E: Fn(&G::State) -> f64,
    {
        let mut evaluator = TreeEvaluator::new(game, &evaluate, self.mode, None);
        let (value, action) = match evaluator.root(state, depth) {
            Ok(result) => result,
            // Only a node budget can stop the recursion, and none is set here.
            Err(BudgetExhausted) => (evaluate(state), None),
        };

        debug!(mode = ?self.mode, depth, value, nodes = evaluator.nodes(), "game tree searched");

        Decision {
            action,
            value,
            nodes: evaluator.nodes(),
        }
    }

    /// Same as [`AdversarialSearch::decide`] with mode and depth taken from `params`.
    pub fn decide_with<G, E>(
        params: &GameSearchParams,
        game: &G,
        state: &G::State,
        evaluate: E,
    ) -> Decision<G::Action>
    where
        G: AdversarialGame,
        E: Fn(&G::State) -> f64,
    {
        Self::new(params.mode).decide(game, state, params.depth, evaluate)
    }
}
