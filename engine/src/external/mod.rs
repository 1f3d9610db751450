//! External API integrations

use std::future::Future;

use shared::{BatchResultEntry, BatchSample, PredictRequest, PredictionResult};

use crate::error::EngineResult;

pub mod prediction;

pub use prediction::HttpPredictionClient;

/// Contract of the prediction service.
///
/// Any transport or non-2xx failure surfaces as
/// [`EngineError::ConnectionFailure`](crate::error::EngineError::ConnectionFailure).
pub trait PredictionService: Clone + Send + Sync + 'static {
    /// Classify a single sample
    fn predict(
        &self,
        request: PredictRequest,
    ) -> impl Future<Output = EngineResult<PredictionResult>> + Send;

    /// Classify parsed batch rows; results come back in row order
    fn predict_batch(
        &self,
        samples: Vec<BatchSample>,
    ) -> impl Future<Output = EngineResult<Vec<BatchResultEntry>>> + Send;
}
