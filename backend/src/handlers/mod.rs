//! HTTP request handlers

mod health;
mod prediction;

pub use health::*;
pub use prediction::*;
