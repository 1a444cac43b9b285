use thiserror::Error;

/// Ways a graph search can end without a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The frontier emptied before any goal state was reached.
    #[error("no path to a goal state after expanding {expanded} states")]
    NoPathFound { expanded: usize },
    /// The configured expansion cap was hit before a goal state was reached.
    #[error("expansion limit of {limit} states reached before finding a goal")]
    ExpansionLimit { limit: usize },
}
