use thiserror::Error;

/// Everything that can go wrong while loading, validating or compiling a model.
#[derive(Debug, Error)]
pub enum MdpError {
    #[error("failed to read or write model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("model has no start state")]
    MissingStart,

    #[error("start state '{start}' is not declared")]
    UnknownStartState { start: String },

    #[error("state '{id}' is declared twice")]
    DuplicateStateId { id: String },

    #[error("state '{state}' declares action '{action}' twice")]
    DuplicateActionId { state: String, action: String },

    #[error("terminal state '{state}' declares actions")]
    TerminalStateHasActions { state: String },

    #[error("'{state}' / '{action}' has no outcomes")]
    EmptyOutcomes { state: String, action: String },

    #[error("'{state}' / '{action}' leads to undeclared state '{next}'")]
    UnknownNextState {
        state: String,
        action: String,
        next: String,
    },

    #[error("'{state}' / '{action}' lists next state '{next}' more than once")]
    DuplicateOutcome {
        state: String,
        action: String,
        next: String,
    },

    #[error("'{state}' / '{action}' outcome {index} has {field} {value}")]
    InvalidOutcome {
        state: String,
        action: String,
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("probabilities of '{state}' / '{action}' sum to {sum}, not 1 (tolerance {tolerance})")]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("builder has no state '{state}'")]
    BuilderUnknownState { state: String },

    #[error("builder state '{state}' has no action '{action}'")]
    BuilderUnknownAction { state: String, action: String },

    #[error("grid layout is empty")]
    EmptyLayout,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid cell ({row}, {col}) has unknown token '{token}'")]
    UnknownCell {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("grid layout must contain exactly one start cell 'S', found {found}")]
    GridStart { found: usize },

    #[error("grid {name} must be finite and within its range, got {value}")]
    InvalidGridParameter { name: &'static str, value: f64 },
}
