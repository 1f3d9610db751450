//! Test doubles shared by the engine integration tests

#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cane_quality_engine::{EngineError, EngineResult, PredictionService};
use rust_decimal::Decimal;
use shared::{
    BatchResultEntry, BatchSample, MeasurementField, PredictRequest, PredictionResult,
    QualityClass, SampleEdit,
};

#[derive(Default)]
struct Recorded {
    requests: Vec<PredictRequest>,
    batches: Vec<Vec<BatchSample>>,
}

/// In-memory prediction service.
///
/// Labels a sample Good when brix >= 18 and Poor otherwise, and echoes the
/// brix value in the explanation so tests can tell which request a result
/// came from.
#[derive(Clone, Default)]
pub struct FakeService {
    recorded: Arc<Mutex<Recorded>>,
    latency: Duration,
    fail: bool,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<PredictRequest> {
        self.recorded.lock().unwrap().requests.clone()
    }

    pub fn batches(&self) -> Vec<Vec<BatchSample>> {
        self.recorded.lock().unwrap().batches.clone()
    }

    fn result_for(request: &PredictRequest) -> PredictionResult {
        let quality = if request.brix >= Decimal::from(18) { "Good" } else { "Poor" };
        PredictionResult {
            quality: quality.to_string(),
            quality_class: QualityClass::from_label(quality),
            explanation: format!("brix {}", request.brix),
            suggestion: None,
            detected_issues: Vec::new(),
        }
    }
}

impl PredictionService for FakeService {
    fn predict(
        &self,
        request: PredictRequest,
    ) -> impl Future<Output = EngineResult<PredictionResult>> + Send {
        async move {
            self.recorded.lock().unwrap().requests.push(request.clone());
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            if self.fail {
                return Err(EngineError::ConnectionFailure("connection refused".to_string()));
            }
            Ok(Self::result_for(&request))
        }
    }

    fn predict_batch(
        &self,
        samples: Vec<BatchSample>,
    ) -> impl Future<Output = EngineResult<Vec<BatchResultEntry>>> + Send {
        async move {
            self.recorded.lock().unwrap().batches.push(samples.clone());
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            if self.fail {
                return Err(EngineError::ConnectionFailure("connection refused".to_string()));
            }
            Ok(samples
                .iter()
                .map(|s| BatchResultEntry {
                    sample_id: s.id().unwrap_or("N/A").to_string(),
                    quality: "Average".to_string(),
                })
                .collect())
        }
    }
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn brix(value: &str) -> SampleEdit {
    SampleEdit::Measurement(MeasurementField::Brix, dec(value))
}

pub fn sucrose(value: &str) -> SampleEdit {
    SampleEdit::Measurement(MeasurementField::Sucrose, dec(value))
}

pub fn fiber(value: &str) -> SampleEdit {
    SampleEdit::Measurement(MeasurementField::Fiber, dec(value))
}

pub fn age(value: &str) -> SampleEdit {
    SampleEdit::Measurement(MeasurementField::AgeMonths, dec(value))
}
