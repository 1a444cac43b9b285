use crate::{ActionSpec, CompiledMdp, MdpError, MdpSpec, OutcomeSpec, StateSpec};

/// Assembles an [`MdpSpec`] in code instead of YAML.
#[derive(Debug, Clone, Default)]
pub struct MdpBuilder {
    start: Option<String>,
    states: Vec<StateSpec>,
}

impl MdpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, state: impl Into<String>) -> &mut Self {
        self.start = Some(state.into());
        self
    }

    pub fn add_state(&mut self, id: impl Into<String>, terminal: bool) -> &mut Self {
        self.states.push(StateSpec {
            id: id.into(),
            terminal,
            actions: Vec::new(),
        });
        self
    }

    pub fn add_action(
        &mut self,
        state: impl AsRef<str>,
        action: impl Into<String>,
    ) -> Result<&mut Self, MdpError> {
        self.state_mut(state.as_ref())?.actions.push(ActionSpec {
            id: action.into(),
            outcomes: Vec::new(),
        });
        Ok(self)
    }

    /// Add one possible result of `action` taken in `state`.
    pub fn add_outcome(
        &mut self,
        state: impl AsRef<str>,
        action: impl AsRef<str>,
        next: impl Into<String>,
        prob: f64,
        reward: f64,
    ) -> Result<&mut Self, MdpError> {
        let (state, action) = (state.as_ref(), action.as_ref());
        let spec = self
            .state_mut(state)?
            .actions
            .iter_mut()
            .find(|candidate| candidate.id == action)
            .ok_or_else(|| MdpError::BuilderUnknownAction {
                state: state.to_string(),
                action: action.to_string(),
            })?;

        spec.outcomes.push(OutcomeSpec {
            next: next.into(),
            prob,
            reward,
        });
        Ok(self)
    }

    fn state_mut(&mut self, id: &str) -> Result<&mut StateSpec, MdpError> {
        self.states
            .iter_mut()
            .find(|state| state.id == id)
            .ok_or_else(|| MdpError::BuilderUnknownState {
                state: id.to_string(),
            })
    }

    /// Finish and validate the spec.
    pub fn build_spec(self) -> Result<MdpSpec, MdpError> {
        let spec = MdpSpec {
            version: Some(1),
            start: self.start.ok_or(MdpError::MissingStart)?,
            states: self.states,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<CompiledMdp, MdpError> {
        self.build_spec()?.compile()
    }
}
