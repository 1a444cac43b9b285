use proptest::prelude::*;

use crate::adversarial::{
    tests::fixtures::{GameTree, Shape, brute_force, leaves},
    tree_search::{AdversarialSearch, SearchMode},
};

fn textbook_tree() -> Shape {
    Shape::Node(vec![
        leaves(&[3.0, 12.0, 8.0]),
        leaves(&[2.0, 4.0, 6.0]),
        leaves(&[14.0, 5.0, 2.0]),
    ])
}

#[test]
fn minimax_backs_up_min_of_max() {
    let game = GameTree::new(&textbook_tree(), 2);
    let decision = AdversarialSearch::minimax().decide(&game, &0, 1, |s| game.evaluate(s));

    assert_eq!(decision.action, Some(0));
    assert_eq!(decision.value, 3.0);
    assert_eq!(decision.nodes, 13);
}

#[test]
fn alpha_beta_matches_minimax_with_fewer_nodes() {
    let game = GameTree::new(&textbook_tree(), 2);
    let plain = AdversarialSearch::minimax().decide(&game, &0, 1, |s| game.evaluate(s));
    let pruned = AdversarialSearch::alpha_beta().decide(&game, &0, 1, |s| game.evaluate(s));

    assert_eq!(pruned.action, plain.action);
    assert_eq!(pruned.value, plain.value);
    // Leaves 4 and 6 under the second branch are never visited.
    assert_eq!(pruned.nodes, 11);
}

#[test]
fn expectimax_averages_over_opponent_moves() {
    let game = GameTree::new(&textbook_tree(), 2);
    let decision = AdversarialSearch::expectimax().decide(&game, &0, 1, |s| game.evaluate(s));

    assert_eq!(decision.action, Some(0));
    assert!((decision.value - 23.0 / 3.0).abs() < 1e-12);
}

#[test]
fn expectimax_can_prefer_a_risky_branch() {
    let shape = Shape::Node(vec![leaves(&[4.0, 4.0]), leaves(&[-10.0, 30.0])]);
    let game = GameTree::new(&shape, 2);

    let cautious = AdversarialSearch::minimax().decide(&game, &0, 1, |s| game.evaluate(s));
    let hopeful = AdversarialSearch::expectimax().decide(&game, &0, 1, |s| game.evaluate(s));

    assert_eq!(cautious.action, Some(0));
    assert_eq!(hopeful.action, Some(1));
    assert_eq!(hopeful.value, 10.0);
}

#[test]
fn ties_keep_first_action() {
    let shape = Shape::Node(vec![leaves(&[5.0]), leaves(&[5.0]), leaves(&[1.0])]);
    let game = GameTree::new(&shape, 2);

    for mode in [SearchMode::Minimax, SearchMode::AlphaBeta, SearchMode::Expectimax] {
        let decision = AdversarialSearch::new(mode).decide(&game, &0, 1, |s| game.evaluate(s));
        assert_eq!(decision.action, Some(0), "{mode:?}");
    }
}

#[test]
fn zero_depth_evaluates_root_only() {
    let game = GameTree::new(&textbook_tree(), 2);
    let decision = AdversarialSearch::minimax().decide(&game, &0, 0, |_| 42.0);

    assert_eq!(decision.action, None);
    assert_eq!(decision.value, 42.0);
    assert_eq!(decision.nodes, 1);
}

#[test]
fn won_state_is_not_expanded() {
    let mut game = GameTree::new(&textbook_tree(), 2);
    // Node 1 is the first min branch; treat it as already won.
    game.mark_terminal(1, 100.0);
    let decision = AdversarialSearch::minimax().decide(&game, &0, 1, |s| game.evaluate(s));

    assert_eq!(decision.action, Some(0));
    assert_eq!(decision.value, 100.0);
    assert_eq!(decision.nodes, 1 + 1 + 4 + 4);
}

#[test]
fn single_agent_wraps_and_consumes_depth() {
    let shape = Shape::Node(vec![leaves(&[1.0, 9.0]), leaves(&[4.0, 3.0])]);
    let game = GameTree::new(&shape, 1);

    let shallow = AdversarialSearch::minimax().decide(&game, &0, 1, |s| game.evaluate(s));
    assert_eq!(shallow.value, 0.0);

    let deep = AdversarialSearch::minimax().decide(&game, &0, 2, |s| game.evaluate(s));
    assert_eq!(deep.action, Some(0));
    assert_eq!(deep.value, 9.0);
}

#[test]
fn three_agents_share_one_ply() {
    // Max, then two minimizers, all inside depth 1.
    let shape = Shape::Node(vec![
        Shape::Node(vec![leaves(&[7.0, 2.0]), leaves(&[6.0, 8.0])]),
        Shape::Node(vec![leaves(&[5.0, 9.0]), leaves(&[4.0, 3.0])]),
    ]);
    let game = GameTree::new(&shape, 3);
    let decision = AdversarialSearch::minimax().decide(&game, &0, 1, |s| game.evaluate(s));

    assert_eq!(decision.value, brute_force(&shape, 0, 3));
    assert_eq!(decision.value, 3.0);
    assert_eq!(decision.action, Some(1));
}

fn arb_two_ply_tree() -> impl Strategy<Value = Shape> {
    proptest::collection::vec(
        proptest::collection::vec(
            proptest::collection::vec(-20i8..20, 1..4),
            1..4,
        ),
        1..4,
    )
    .prop_map(|root| {
        Shape::Node(
            root.into_iter()
                .map(|mins| {
                    Shape::Node(
                        mins.into_iter()
                            .map(|maxes| {
                                let values: Vec<f64> = maxes.into_iter().map(f64::from).collect();
                                leaves(&values)
                            })
                            .collect(),
                    )
                })
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn alpha_beta_agrees_with_brute_force(shape in arb_two_ply_tree()) {
        // Three levels of moves under two agents: max, min, max. Depth 2 reaches the leaves.
        let game = GameTree::new(&shape, 2);
        let plain = AdversarialSearch::minimax().decide(&game, &0, 2, |s| game.evaluate(s));
        let pruned = AdversarialSearch::alpha_beta().decide(&game, &0, 2, |s| game.evaluate(s));

        prop_assert_eq!(plain.value, brute_force(&shape, 0, 2));
        prop_assert_eq!(pruned.value, plain.value);
        prop_assert_eq!(pruned.action, plain.action);
        prop_assert!(pruned.nodes <= plain.nodes);
    }
}
