pub mod agent;
pub mod approximate;
pub mod features;
pub mod params;
pub mod qlearning;

#[cfg(test)]
mod tests;
