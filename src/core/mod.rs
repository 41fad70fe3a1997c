pub mod graph;
pub mod ids;
pub mod model;

#[cfg(test)]
pub(crate) mod testing;
