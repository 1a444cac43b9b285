use crate::learning::params::LearningParams;

/// `A` offers `left` and `right`, `C` offers three actions, everything else is terminal.
pub fn corridor_actions(state: &&'static str) -> Vec<&'static str> {
    match *state {
        "A" => vec!["left", "right"],
        "C" => vec!["a", "b", "c"],
        _ => Vec::new(),
    }
}

pub fn params(alpha: f64, epsilon: f64, discount: f64) -> LearningParams {
    LearningParams {
        alpha,
        epsilon,
        discount,
        num_training: 10,
    }
}
