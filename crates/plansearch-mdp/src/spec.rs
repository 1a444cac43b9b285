use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CompiledMdp, MdpError};

/// Probabilities of one action may be off from 1 by at most this much.
pub(crate) const PROB_TOLERANCE: f64 = 1e-9;

/// A finite MDP as written in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdpSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Id of the state episodes start from.
    pub start: String,
    pub states: Vec<StateSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpec {
    pub id: String,
    #[serde(default)]
    pub terminal: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub id: String,
    pub outcomes: Vec<OutcomeSpec>,
}

/// One possible result of an action. Each next state appears once per action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSpec {
    pub next: String,
    pub prob: f64,
    pub reward: f64,
}

impl MdpSpec {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MdpError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, MdpError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), MdpError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Check ids, references, and that every action is a probability distribution.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), MdpError> {
        if self.start.trim().is_empty() {
            return Err(MdpError::MissingStart);
        }

        let mut ids = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !ids.insert(state.id.as_str()) {
                return Err(MdpError::DuplicateStateId {
                    id: state.id.clone(),
                });
            }
        }
        if !ids.contains(self.start.as_str()) {
            return Err(MdpError::UnknownStartState {
                start: self.start.clone(),
            });
        }

        for state in &self.states {
            if state.terminal && !state.actions.is_empty() {
                return Err(MdpError::TerminalStateHasActions {
                    state: state.id.clone(),
                });
            }

            let mut action_ids = HashSet::with_capacity(state.actions.len());
            for action in &state.actions {
                if !action_ids.insert(action.id.as_str()) {
                    return Err(MdpError::DuplicateActionId {
                        state: state.id.clone(),
                        action: action.id.clone(),
                    });
                }
                validate_action(&state.id, action, &ids, tolerance)?;
            }
        }

        Ok(())
    }

    pub fn compile(&self) -> Result<CompiledMdp, MdpError> {
        CompiledMdp::from_spec(self)
    }
}

fn validate_action(
    state: &str,
    action: &ActionSpec,
    known: &HashSet<&str>,
    tolerance: f64,
) -> Result<(), MdpError> {
    let invalid = |index, field, value| MdpError::InvalidOutcome {
        state: state.to_string(),
        action: action.id.clone(),
        index,
        field,
        value,
    };

    if action.outcomes.is_empty() {
        return Err(MdpError::EmptyOutcomes {
            state: state.to_string(),
            action: action.id.clone(),
        });
    }

    let mut targets = HashSet::with_capacity(action.outcomes.len());
    let mut sum = 0.0_f64;
    for (index, outcome) in action.outcomes.iter().enumerate() {
        if !outcome.prob.is_finite() || outcome.prob < 0.0 {
            return Err(invalid(index, "probability", outcome.prob));
        }
        if !outcome.reward.is_finite() {
            return Err(invalid(index, "reward", outcome.reward));
        }
        if !known.contains(outcome.next.as_str()) {
            return Err(MdpError::UnknownNextState {
                state: state.to_string(),
                action: action.id.clone(),
                next: outcome.next.clone(),
            });
        }
        if !targets.insert(outcome.next.as_str()) {
            return Err(MdpError::DuplicateOutcome {
                state: state.to_string(),
                action: action.id.clone(),
                next: outcome.next.clone(),
            });
        }
        sum += outcome.prob;
    }

    if (sum - 1.0).abs() > tolerance {
        return Err(MdpError::ProbabilitySum {
            state: state.to_string(),
            action: action.id.clone(),
            sum,
            tolerance,
        });
    }
    Ok(())
}
