pub mod model;
pub mod value_iteration;

#[cfg(test)]
mod tests;
