//! Domain models for sugarcane sample evaluation

mod batch;
mod hint;
mod prediction;
mod sample;

pub use batch::*;
pub use hint::*;
pub use prediction::*;
pub use sample::*;
