pub mod frame;
pub mod sampler;

pub use frame::*;
pub use sampler::*;
