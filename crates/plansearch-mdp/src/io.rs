use std::{fs, path::Path};

use tracing::debug;

use crate::{CompiledMdp, MdpError, MdpSpec};

/// Read an MDP spec from a YAML file. The spec is not validated yet.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<MdpSpec, MdpError> {
    let path = path.as_ref();
    let spec = MdpSpec::from_yaml_str(&fs::read_to_string(path)?)?;
    debug!(path = %path.display(), states = spec.states.len(), "loaded mdp spec");
    Ok(spec)
}

/// Read, validate and compile an MDP from a YAML file.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<CompiledMdp, MdpError> {
    load_yaml(path)?.compile()
}

pub fn save_yaml(path: impl AsRef<Path>, spec: &MdpSpec) -> Result<(), MdpError> {
    fs::write(path, spec.to_yaml_string()?)?;
    Ok(())
}
