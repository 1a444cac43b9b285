use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::search::{
    arena::{NodeId, SearchArena, SearchNode},
    error::SearchError,
    frontier::PriorityFrontier,
    problem::{SearchProblem, null_heuristic},
};

/// Frontier discipline used by [`GraphSearch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// LIFO frontier, states marked visited when pushed. Terminates but is not optimal.
    DepthFirst,
    /// FIFO frontier with the goal test applied when a successor is generated.
    #[default]
    BreadthFirst,
    /// Lowest accumulated path cost first.
    UniformCost,
    /// Lowest path cost plus heuristic estimate first.
    AStar,
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<A> {
    /// Actions leading from the start state to a goal state.
    pub actions: Vec<A>,
    /// Sum of the step costs along `actions`.
    pub cost: f64,
    /// How many states had their successors generated.
    pub expanded: usize,
}

impl<A> Plan<A> {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Counts expansions and enforces the optional cap.
struct Expansions {
    count: usize,
    limit: Option<usize>,
}

impl Expansions {
    fn new(limit: Option<usize>) -> Self {
        Expansions { count: 0, limit }
    }

    fn charge(&mut self) -> Result<(), SearchError> {
        if let Some(limit) = self.limit {
            if self.count >= limit {
                return Err(SearchError::ExpansionLimit { limit });
            }
        }
        self.count += 1;
        Ok(())
    }

    fn exhausted(&self) -> SearchError {
        SearchError::NoPathFound {
            expanded: self.count,
        }
    }
}

/// Graph search over a [`SearchProblem`] with a fixed strategy.
#[derive(Debug, Clone, Copy)]
pub struct GraphSearch {
    strategy: Strategy,
    expansion_limit: Option<usize>,
}

impl GraphSearch {
    pub fn new(strategy: Strategy) -> Self {
        GraphSearch {
            strategy,
            expansion_limit: None,
        }
    }

    /// Give up with [`SearchError::ExpansionLimit`] after `limit` expansions.
    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = Some(limit);
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Search for a plan from the problem's start state to a goal state.
    ///
    /// `heuristic` is only consulted by [`Strategy::AStar`]. It must never
    /// overestimate the remaining cost for the returned plan to be optimal.
    pub fn run<P, H>(&self, problem: &P, heuristic: H) -> Result<Plan<P::Action>, SearchError>
    where
        P: SearchProblem,
        H: Fn(&P::State, &P) -> f64,
    {
        let result = match self.strategy {
            Strategy::DepthFirst => self.depth_first(problem),
            Strategy::BreadthFirst => self.breadth_first(problem),
            Strategy::UniformCost => self.best_first(problem, null_heuristic::<P>),
            Strategy::AStar => self.best_first(problem, heuristic),
        };

        match &result {
            Ok(plan) => debug!(
                strategy = ?self.strategy,
                expanded = plan.expanded,
                steps = plan.len(),
                cost = plan.cost,
                "search reached goal"
            ),
            Err(err) => debug!(strategy = ?self.strategy, %err, "search failed"),
        }

        result
    }

    fn depth_first<P: SearchProblem>(&self, problem: &P) -> Result<Plan<P::Action>, SearchError> {
        let start = problem.start_state();
        let mut arena = SearchArena::new();
        let mut expansions = Expansions::new(self.expansion_limit);

        // Marked on push: a state never enters the stack twice.
        let mut visited = HashSet::new();
        visited.insert(start.clone());
        let mut stack = vec![arena.allocate(SearchNode::root(start))];

        while let Some(id) = stack.pop() {
            let node = arena.node(id);
            if problem.is_goal(&node.state) {
                return Ok(plan_to(&arena, id, expansions.count));
            }

            expansions.charge()?;
            let path_cost = node.path_cost;
            for successor in problem.successors(&node.state) {
                if visited.insert(successor.state.clone()) {
                    let child = arena.allocate(SearchNode::child(
                        successor.state,
                        id,
                        successor.action,
                        path_cost + successor.cost,
                    ));
                    stack.push(child);
                }
            }
            trace!(frontier = stack.len(), generated = arena.len(), "dfs expansion");
        }

        Err(expansions.exhausted())
    }

    fn breadth_first<P: SearchProblem>(
        &self,
        problem: &P,
    ) -> Result<Plan<P::Action>, SearchError> {
        let start = problem.start_state();
        let mut arena = SearchArena::new();
        let mut expansions = Expansions::new(self.expansion_limit);

        if problem.is_goal(&start) {
            return Ok(Plan {
                actions: Vec::new(),
                cost: 0.0,
                expanded: 0,
            });
        }

        let mut explored = HashSet::new();
        explored.insert(start.clone());
        let mut queue = VecDeque::new();
        queue.push_back(arena.allocate(SearchNode::root(start)));

        while let Some(id) = queue.pop_front() {
            expansions.charge()?;
            let node = arena.node(id);
            let path_cost = node.path_cost;

            for successor in problem.successors(&node.state) {
                if !explored.insert(successor.state.clone()) {
                    continue;
                }

                let reached_goal = problem.is_goal(&successor.state);
                let child = arena.allocate(SearchNode::child(
                    successor.state,
                    id,
                    successor.action,
                    path_cost + successor.cost,
                ));

                if reached_goal {
                    return Ok(plan_to(&arena, child, expansions.count));
                }
                queue.push_back(child);
            }
            trace!(frontier = queue.len(), generated = arena.len(), "bfs expansion");
        }

        Err(expansions.exhausted())
    }

    /// Shared loop for uniform-cost and A*; they differ only in `heuristic`.
    fn best_first<P, H>(&self, problem: &P, heuristic: H) -> Result<Plan<P::Action>, SearchError>
    where
        P: SearchProblem,
        H: Fn(&P::State, &P) -> f64,
    {
        let start = problem.start_state();
        let mut arena = SearchArena::new();
        let mut expansions = Expansions::new(self.expansion_limit);
        let mut frontier = PriorityFrontier::new();

        // Cheapest known path cost of every state still waiting on the frontier.
        let mut best_cost: HashMap<P::State, f64> = HashMap::new();
        // States already popped and expanded. Their cost is final.
        let mut explored: HashSet<P::State> = HashSet::new();

        let start_priority = heuristic(&start, problem);
        best_cost.insert(start.clone(), 0.0);
        frontier.push(arena.allocate(SearchNode::root(start)), start_priority);

        while let Some(id) = frontier.pop() {
            let (state, path_cost) = {
                let node = arena.node(id);
                (node.state.clone(), node.path_cost)
            };

            if explored.contains(&state) {
                continue;
            }
            if best_cost
                .get(&state)
                .is_some_and(|best| path_cost > *best)
            {
                // Superseded by a cheaper entry that is still queued.
                continue;
            }

            if problem.is_goal(&state) {
                return Ok(plan_to(&arena, id, expansions.count));
            }

            expansions.charge()?;
            best_cost.remove(&state);

            for successor in problem.successors(&state) {
                if explored.contains(&successor.state) {
                    continue;
                }

                let total = path_cost + successor.cost;
                let improves = best_cost
                    .get(&successor.state)
                    .is_none_or(|best| total < *best);
                if !improves {
                    continue;
                }

                let priority = total + heuristic(&successor.state, problem);
                best_cost.insert(successor.state.clone(), total);
                let child = arena.allocate(SearchNode::child(
                    successor.state,
                    id,
                    successor.action,
                    total,
                ));
                frontier.push(child, priority);
            }

            explored.insert(state);
        }

        Err(expansions.exhausted())
    }
}

fn plan_to<S, A: Clone>(arena: &SearchArena<S, A>, id: NodeId, expanded: usize) -> Plan<A> {
    Plan {
        actions: arena.actions_to(id),
        cost: arena.node(id).path_cost,
        expanded,
    }
}

/// Depth-first graph search. Returns some plan, not necessarily the shortest.
pub fn depth_first_search<P: SearchProblem>(problem: &P) -> Result<Plan<P::Action>, SearchError> {
    GraphSearch::new(Strategy::DepthFirst).run(problem, null_heuristic::<P>)
}

/// Breadth-first graph search. Returns a plan with the fewest actions.
pub fn breadth_first_search<P: SearchProblem>(
    problem: &P,
) -> Result<Plan<P::Action>, SearchError> {
    GraphSearch::new(Strategy::BreadthFirst).run(problem, null_heuristic::<P>)
}

/// Uniform-cost search. Returns a plan with the lowest total step cost.
pub fn uniform_cost_search<P: SearchProblem>(
    problem: &P,
) -> Result<Plan<P::Action>, SearchError> {
    GraphSearch::new(Strategy::UniformCost).run(problem, null_heuristic::<P>)
}

/// A* search guided by `heuristic`.
pub fn astar_search<P, H>(problem: &P, heuristic: H) -> Result<Plan<P::Action>, SearchError>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    GraphSearch::new(Strategy::AStar).run(problem, heuristic)
}
