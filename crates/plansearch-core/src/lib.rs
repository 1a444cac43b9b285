mod adversarial;
mod config;
mod learning;
mod mdp;
mod search;
mod select;

pub use adversarial::contest::ContestAgent;
pub use adversarial::game::AdversarialGame;
pub use adversarial::reflex::ReflexAgent;
pub use adversarial::tree_search::{AdversarialSearch, Decision, SearchMode};
pub use config::{AgentConfig, ConfigError, GameSearchParams, ValueIterationParams};
pub use learning::agent::{EpisodeSummary, ReinforcementAgent};
pub use learning::approximate::{ApproximateQAgent, WeightSnapshot};
pub use learning::features::{BiasExtractor, FeatureExtractor, FnExtractor};
pub use learning::params::{EpisodeTracker, LearningParams};
pub use learning::qlearning::QLearningAgent;
pub use mdp::model::Mdp;
pub use mdp::value_iteration::{ValueEntry, ValueIterationAgent, ValueTableSnapshot};
pub use search::error::SearchError;
pub use search::graph::{
    GraphSearch, Plan, Strategy, astar_search, breadth_first_search, depth_first_search,
    uniform_cost_search,
};
pub use search::problem::{SearchProblem, Successor, null_heuristic};
