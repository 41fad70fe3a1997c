pub mod components;
pub mod social;
pub mod stats;
