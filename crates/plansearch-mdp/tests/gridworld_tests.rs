use plansearch_core::{Mdp, ValueIterationAgent};
use plansearch_mdp::{Cell, GridWorld, MdpError, StateKey, TERMINAL_STATE};

fn key(mdp: &plansearch_mdp::CompiledMdp, row: usize, col: usize) -> StateKey {
    mdp.state_key(&GridWorld::state_id(row, col))
        .expect("cell is a state")
}

fn policy_name(grid: &GridWorld, discount: f64, row: usize, col: usize) -> String {
    let mdp = grid.compile().expect("grid compiles");
    let state = key(&mdp, row, col);
    let agent = ValueIterationAgent::solve(&mdp, discount, 100);
    let action = agent.policy(&state).expect("cell has actions");
    mdp.action_id(state, action)
        .expect("action is declared")
        .to_string()
}

#[test]
fn layout_parses_cells() {
    let grid = GridWorld::book().expect("book layout parses");
    assert_eq!((grid.rows(), grid.cols()), (3, 4));
    assert_eq!(grid.start(), (2, 0));
    assert_eq!(grid.cell(1, 1), Some(Cell::Wall));
    assert_eq!(grid.cell(0, 3), Some(Cell::Exit(1.0)));
    assert_eq!(grid.cell(1, 3), Some(Cell::Exit(-1.0)));
    assert_eq!(grid.cell(3, 0), None);
}

#[test]
fn malformed_layouts_are_rejected() {
    assert!(matches!(GridWorld::from_layout("\n  \n"), Err(MdpError::EmptyLayout)));
    assert!(matches!(
        GridWorld::from_layout("S _\n_"),
        Err(MdpError::RaggedLayout { row: 1, .. })
    ));
    assert!(matches!(
        GridWorld::from_layout("S x"),
        Err(MdpError::UnknownCell { col: 1, .. })
    ));
    assert!(matches!(
        GridWorld::from_layout("_ 1"),
        Err(MdpError::GridStart { found: 0 })
    ));
    assert!(matches!(
        GridWorld::book().expect("parses").with_noise(1.5),
        Err(MdpError::InvalidGridParameter { name: "noise", .. })
    ));
}

#[test]
fn noisy_moves_split_between_perpendiculars() {
    let grid = GridWorld::from_layout("S _ 1").expect("parses");
    let mdp = grid.compile().expect("compiles");
    let start = key(&mdp, 0, 0);
    let east = mdp.action_key(start, "east").expect("open cells can move");

    let mut transitions = mdp.transitions(&start, &east);
    transitions.sort_by_key(|(next, _)| *next);
    // North and south both bounce back to the start cell.
    let expected = vec![(start, 0.2), (key(&mdp, 0, 1), 0.8)];
    assert_eq!(transitions.len(), 2);
    for ((next, prob), (want_next, want_prob)) in transitions.into_iter().zip(expected) {
        assert_eq!(next, want_next);
        assert!((prob - want_prob).abs() < 1e-12);
    }
}

#[test]
fn exits_lead_to_one_terminal_state() {
    let grid = GridWorld::book().expect("parses");
    let mdp = grid.compile().expect("compiles");
    let terminal = mdp.state_key(TERMINAL_STATE).expect("terminal exists");
    assert!(mdp.is_terminal(&terminal));

    let exit = key(&mdp, 0, 3);
    let actions = mdp.possible_actions(&exit);
    assert_eq!(actions.len(), 1);
    assert_eq!(mdp.action_id(exit, actions[0]), Some("exit"));
    assert_eq!(mdp.transitions(&exit, &actions[0]), vec![(terminal, 1.0)]);
    assert_eq!(mdp.reward(&exit, &actions[0], &terminal), 1.0);
}

#[test]
fn book_grid_values() {
    let grid = GridWorld::book().expect("parses");
    let mdp = grid.compile().expect("compiles");
    let agent = ValueIterationAgent::solve(&mdp, 0.9, 100);

    assert_eq!(agent.value(&key(&mdp, 0, 3)), 1.0);
    assert_eq!(agent.value(&key(&mdp, 1, 3)), -1.0);
    let start = agent.value(&key(&mdp, 2, 0));
    assert!(start > 0.4 && start < 0.6, "start value {start}");
    assert_eq!(policy_name(&grid, 0.9, 2, 0), "north");
    assert_eq!(policy_name(&grid, 0.9, 0, 2), "east");
}

#[test]
fn bridge_is_crossed_only_without_noise() {
    let noisy = GridWorld::bridge().expect("parses");
    assert_eq!(policy_name(&noisy, 0.9, 1, 1), "west");

    let calm = GridWorld::bridge()
        .and_then(|grid| grid.with_noise(0.0))
        .expect("valid noise");
    assert_eq!(policy_name(&calm, 0.9, 1, 1), "east");
}

#[test]
fn living_penalty_is_paid_per_move() {
    let grid = GridWorld::from_layout("S 1")
        .and_then(|grid| grid.with_noise(0.0))
        .and_then(|grid| grid.with_living_reward(-0.5))
        .expect("valid grid");
    let mdp = grid.compile().expect("compiles");
    let agent = ValueIterationAgent::solve(&mdp, 1.0, 10);
    assert_eq!(agent.value(&key(&mdp, 0, 0)), 0.5);
}
