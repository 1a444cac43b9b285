use proptest::prelude::*;

use crate::search::{
    error::SearchError,
    graph::{GraphSearch, Strategy as SearchStrategy},
    problem::null_heuristic,
    tests::fixtures::EdgeListGraph,
};

const NODES: u32 = 7;

/// Bellman-Ford over the edge list: cheapest cost to every node from `start`.
fn cheapest_costs(graph: &EdgeListGraph) -> Vec<Option<f64>> {
    let mut dist = vec![None; NODES as usize];
    dist[graph.start as usize] = Some(0.0);
    for _ in 0..NODES {
        for &(from, to, cost) in &graph.edges {
            if let Some(base) = dist[from as usize] {
                let candidate = base + cost;
                if dist[to as usize].is_none_or(|d: f64| candidate < d) {
                    dist[to as usize] = Some(candidate);
                }
            }
        }
    }
    dist
}

fn best_goal_value(graph: &EdgeListGraph, per_node: &[Option<f64>]) -> Option<f64> {
    graph
        .goals
        .iter()
        .filter_map(|g| per_node[*g as usize])
        .reduce(f64::min)
}

fn unit_cost_copy(graph: &EdgeListGraph) -> EdgeListGraph {
    let edges: Vec<_> = graph.edges.iter().map(|(f, t, _)| (*f, *t, 1.0)).collect();
    EdgeListGraph::new(graph.start, &graph.goals, &edges)
}

fn arb_graph() -> impl Strategy<Value = EdgeListGraph> {
    (
        0..NODES,
        proptest::collection::vec(0..NODES, 1..3),
        proptest::collection::vec((0..NODES, 0..NODES, 0u8..10), 0..20),
    )
        .prop_map(|(start, goals, edges)| {
            let edges: Vec<_> = edges
                .into_iter()
                .map(|(f, t, c)| (f, t, f64::from(c)))
                .collect();
            EdgeListGraph::new(start, &goals, &edges)
        })
}

proptest! {
    #[test]
    fn strategies_agree_with_brute_force(graph in arb_graph()) {
        let cheapest = best_goal_value(&graph, &cheapest_costs(&graph));
        let fewest_steps = best_goal_value(&graph, &cheapest_costs(&unit_cost_copy(&graph)));

        for strategy in [
            SearchStrategy::DepthFirst,
            SearchStrategy::BreadthFirst,
            SearchStrategy::UniformCost,
            SearchStrategy::AStar,
        ] {
            let result = GraphSearch::new(strategy).run(&graph, null_heuristic::<EdgeListGraph>);

            match (cheapest, result) {
                (Some(best), Ok(plan)) => {
                    let replayed = graph.replay(&plan.actions);
                    prop_assert!(replayed.is_some(), "{:?} returned an invalid plan", strategy);
                    let (end, cost) = replayed.unwrap_or_default();
                    prop_assert!(graph.goals.contains(&end));
                    prop_assert!((cost - plan.cost).abs() < 1e-9);

                    match strategy {
                        SearchStrategy::UniformCost | SearchStrategy::AStar => {
                            prop_assert!((plan.cost - best).abs() < 1e-9);
                        }
                        SearchStrategy::BreadthFirst => {
                            prop_assert_eq!(Some(plan.len() as f64), fewest_steps);
                        }
                        SearchStrategy::DepthFirst => {}
                    }
                }
                (None, Err(err)) => {
                    prop_assert!(
                        matches!(err, SearchError::NoPathFound { .. }),
                        "{:?}: expected NoPathFound, got {:?}",
                        strategy,
                        err
                    );
                }
                (expected, outcome) => {
                    prop_assert!(false, "{:?}: reference {:?}, search {:?}", strategy, expected, outcome);
                }
            }
        }
    }
}
