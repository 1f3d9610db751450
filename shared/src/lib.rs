//! Shared types and models for the Sugarcane Quality Analysis system
//!
//! This crate contains the pure parts of sample evaluation shared between the
//! evaluation engine, the reference prediction service and the browser (via
//! WASM): the sample record, purity derivation, advisory hints, batch
//! ingestion and the prediction wire schema.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
