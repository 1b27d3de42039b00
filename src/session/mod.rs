pub mod drill;
pub mod input;
pub mod queue;
pub mod sampler;
