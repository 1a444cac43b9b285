use std::path::PathBuf;

use plansearch_core::{AgentConfig, ValueIterationAgent};
use plansearch_mdp::compile_yaml;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/sample.mdp.yaml")
        });

    let mdp = compile_yaml(&path).expect("failed to compile MDP YAML");
    let config = AgentConfig::from_default_yaml().expect("bundled config is valid");
    let agent = ValueIterationAgent::solve_with(&mdp, &config.value_iteration);

    for key in (0..mdp.state_count()).map(Into::into) {
        let action = agent
            .policy(&key)
            .and_then(|action| mdp.action_id(key, action))
            .unwrap_or("-");
        println!(
            "{:<12} value={:>8.4} policy={action}",
            mdp.state_id(key).unwrap_or("?"),
            agent.value(&key)
        );
    }
    println!(
        "final residual after {} passes: {:.2e}",
        agent.iterations(),
        agent.residuals().last().copied().unwrap_or(0.0)
    );
}
