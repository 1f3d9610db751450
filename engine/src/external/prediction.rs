//! Prediction Service Client
//!
//! Client for the sugarcane quality prediction service.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response};
use shared::{
    BatchPredictRequest, BatchPredictResponse, BatchResultEntry, BatchSample, PredictRequest,
    PredictionResult, WirePrediction,
};

use super::PredictionService;
use crate::config::PredictionConfig;
use crate::error::{EngineError, EngineResult};

/// HTTP client for the prediction service
#[derive(Clone)]
pub struct HttpPredictionClient {
    base_url: String,
    http_client: Client,
}

impl HttpPredictionClient {
    /// Create a new prediction client with no request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: Client::new(),
        }
    }

    /// Create a client from engine configuration
    pub fn from_config(config: &PredictionConfig) -> EngineResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| EngineError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> EngineResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "calling prediction service");
        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| EngineError::ConnectionFailure(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EngineError::ConnectionFailure(format!(
                "Service returned {}: {}",
                status, body
            )));
        }

        Ok(response)
    }

    /// Send one sample for classification
    pub async fn predict_sample(&self, request: &PredictRequest) -> EngineResult<PredictionResult> {
        let wire: WirePrediction = self
            .post("/predict", request)
            .await?
            .json()
            .await
            .map_err(|e| EngineError::ConnectionFailure(format!("Failed to parse response: {}", e)))?;

        wire.canonicalize()
            .map_err(|e| EngineError::ConnectionFailure(e.to_string()))
    }

    /// Send parsed batch rows for classification
    pub async fn predict_samples(&self, samples: Vec<BatchSample>) -> EngineResult<Vec<BatchResultEntry>> {
        let body = BatchPredictRequest { samples };
        let response: BatchPredictResponse = self
            .post("/predict-batch", &body)
            .await?
            .json()
            .await
            .map_err(|e| EngineError::ConnectionFailure(format!("Failed to parse response: {}", e)))?;

        Ok(response.results)
    }
}

impl PredictionService for HttpPredictionClient {
    fn predict(
        &self,
        request: PredictRequest,
    ) -> impl Future<Output = EngineResult<PredictionResult>> + Send {
        async move { self.predict_sample(&request).await }
    }

    fn predict_batch(
        &self,
        samples: Vec<BatchSample>,
    ) -> impl Future<Output = EngineResult<Vec<BatchResultEntry>>> + Send {
        async move { self.predict_samples(samples).await }
    }
}
