use plansearch_core::{AgentConfig, QLearningAgent, ReinforcementAgent, ValueIterationAgent};
use plansearch_mdp::{Cell, GridWorld, MdpSimulator};
use tracing_subscriber::EnvFilter;

fn print_policy(grid: &GridWorld, name: &str, policy: impl Fn(usize, usize) -> Option<String>) {
    println!("{name}:");
    for row in 0..grid.rows() {
        let line: Vec<String> = (0..grid.cols())
            .map(|col| match grid.cell(row, col) {
                Some(Cell::Wall) => "#####".to_string(),
                _ => format!("{:<5}", policy(row, col).unwrap_or_default()),
            })
            .collect();
        println!("  {}", line.join(" "));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AgentConfig::from_default_yaml().expect("bundled config is valid");
    let grid = GridWorld::book().expect("book layout parses");
    let mdp = grid.compile().expect("book grid compiles");

    let planner = ValueIterationAgent::solve_with(&mdp, &config.value_iteration);
    print_policy(&grid, "value iteration", |row, col| {
        let state = mdp.state_key(&GridWorld::state_id(row, col))?;
        let action = planner.policy(&state)?;
        mdp.action_id(state, action).map(str::to_string)
    });

    let mut learner =
        QLearningAgent::from_config(&config, mdp.action_fn()).expect("bundled config is valid");
    let mut simulator = MdpSimulator::new(mdp.clone(), config.seed);
    let reports = simulator.train(&mut learner, 2 * config.learning.num_training, 200);
    let tested = &reports[config.learning.num_training..];
    let mean = tested.iter().map(|r| r.total_reward).sum::<f64>() / tested.len().max(1) as f64;

    print_policy(&grid, "q-learning", |row, col| {
        let state = mdp.state_key(&GridWorld::state_id(row, col))?;
        let action = learner.policy(&state)?;
        mdp.action_id(state, action).map(str::to_string)
    });
    println!("mean reward after training: {mean:.3}");
}
