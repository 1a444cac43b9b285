pub mod contest;
pub mod game;
pub mod reflex;
pub mod tree_search;

#[cfg(test)]
mod tests;
