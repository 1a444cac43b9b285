mod arena;
pub mod error;
mod frontier;
pub mod graph;
pub mod problem;

#[cfg(test)]
mod tests;
