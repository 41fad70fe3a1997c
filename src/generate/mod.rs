pub mod network;
pub mod pools;
pub mod sampler;
