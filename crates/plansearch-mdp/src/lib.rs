mod builder;
mod compiled;
mod error;
mod gridworld;
mod io;
mod simulator;
mod spec;

pub use builder::MdpBuilder;
pub use compiled::{ActionKey, CompiledMdp, StateKey, Transition};
pub use error::MdpError;
pub use gridworld::{BOOK_LAYOUT, BRIDGE_LAYOUT, Cell, GridWorld, Move, TERMINAL_STATE};
pub use io::{compile_yaml, load_yaml, save_yaml};
pub use simulator::{EpisodeReport, MdpSimulator};
pub use spec::{ActionSpec, MdpSpec, OutcomeSpec, StateSpec};
