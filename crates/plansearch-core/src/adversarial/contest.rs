use tracing::{debug, trace};

use crate::{
    adversarial::{
        game::AdversarialGame,
        tree_search::{BudgetExhausted, Decision, SearchMode, TreeEvaluator},
    },
    config::GameSearchParams,
};

/// Iterative-deepening alpha-beta player with a hard node budget.
///
/// Searches depth 1, 2, ... up to `max_depth`. When a depth runs out of
/// budget its partial result is thrown away and the decision from the last
/// fully searched depth is kept, so the answer is always a complete search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContestAgent {
    max_depth: usize,
    node_budget: usize,
}

impl ContestAgent {
    pub fn new(max_depth: usize, node_budget: usize) -> Self {
        ContestAgent {
            max_depth,
            node_budget,
        }
    }

    pub fn from_params(params: &GameSearchParams) -> Self {
        Self::new(params.depth, params.node_budget)
    }

    pub fn decide<G, E>(&self, game: &G, state: &G::State, evaluate: E) -> Decision<G::Action>
    where
        G: AdversarialGame,
        E: Fn(&G::State) -> f64,
    {
        let mut decision = Decision {
            action: None,
            value: evaluate(state),
            nodes: 0,
        };
        let mut spent = 0;

        for depth in 1..=self.max_depth {
            let remaining = self.node_budget.saturating_sub(spent);
            if remaining == 0 {
                break;
            }

            let mut evaluator =
                TreeEvaluator::new(game, &evaluate, SearchMode::AlphaBeta, Some(remaining));
            let result = evaluator.root(state, depth);
            spent += evaluator.nodes();

            match result {
                Ok((value, action)) => {
                    trace!(depth, value, spent, "completed depth");
                    let leaf = action.is_none();
                    decision.value = value;
                    decision.action = action;
                    if leaf {
                        break;
                    }
                }
                Err(BudgetExhausted) => {
                    debug!(depth, budget = self.node_budget, "node budget exhausted");
                    break;
                }
            }
        }

        decision.nodes = spent;
        decision
    }
}
