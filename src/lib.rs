pub mod analysis;
pub mod core;
pub mod error;
pub mod export;
pub mod generate;

pub use crate::core::graph::{Network, NetworkBuilder};
pub use crate::error::ConfigError;
pub use crate::generate::network::{NetworkConfig, NetworkGenerator};
