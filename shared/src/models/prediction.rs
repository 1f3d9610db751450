//! Prediction service wire models
//!
//! The service has shipped both capitalized (`Predicted_Quality`) and
//! lowercase (`quality`) response schemas. [`WirePrediction::canonicalize`]
//! is the single place where either shape becomes a [`PredictionResult`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BatchSample, SampleRecord};

/// Quality tier of a classification label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QualityClass {
    Good,
    Average,
    Poor,
}

impl QualityClass {
    /// Tier for a free-text label, matched case-insensitively.
    /// Anything that is neither poor nor average reads as good.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("poor") {
            QualityClass::Poor
        } else if label.contains("average") {
            QualityClass::Average
        } else {
            QualityClass::Good
        }
    }

    /// Cosmetic gauge band for the tier, in percent.
    /// Not a confidence value from the service.
    pub fn score_band(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            QualityClass::Good => 85..=95,
            QualityClass::Average => 50..=70,
            QualityClass::Poor => 20..=40,
        }
    }
}

impl std::fmt::Display for QualityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityClass::Good => write!(f, "Good"),
            QualityClass::Average => write!(f, "Average"),
            QualityClass::Poor => write!(f, "Poor"),
        }
    }
}

/// Canonical prediction for one sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// Label exactly as returned by the service
    pub quality: String,
    pub quality_class: QualityClass,
    pub explanation: String,
    pub suggestion: Option<String>,
    pub detected_issues: Vec<String>,
}

/// Body of `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub sucrose: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub brix: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub purity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fiber: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub moisture: Decimal,
    pub variety: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub age: Decimal,
}

impl From<&SampleRecord> for PredictRequest {
    fn from(sample: &SampleRecord) -> Self {
        Self {
            sucrose: sample.sucrose_percent,
            brix: sample.brix_percent,
            purity: sample.purity_percent,
            fiber: sample.fiber_percent,
            moisture: sample.moisture_percent,
            variety: sample.variety.code().to_string(),
            age: sample.age_months,
        }
    }
}

/// Response of `POST /predict` as it appears on the wire, either casing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WirePrediction {
    #[serde(rename = "Predicted_Quality")]
    predicted_quality_upper: Option<String>,
    #[serde(rename = "Quality")]
    quality_upper: Option<String>,
    #[serde(rename = "predicted_quality")]
    predicted_quality_lower: Option<String>,
    quality: Option<String>,
    #[serde(rename = "Explanation")]
    explanation_upper: Option<String>,
    explanation: Option<String>,
    #[serde(rename = "Suggestion")]
    suggestion_upper: Option<String>,
    suggestion: Option<String>,
    #[serde(rename = "Detected_Issues")]
    detected_issues_upper: Option<Vec<String>>,
    detected_issues: Option<Vec<String>>,
    #[serde(rename = "detectedIssues")]
    detected_issues_camel: Option<Vec<String>>,
}

/// A 2xx body that cannot be read as a prediction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseShapeError {
    #[error("prediction response carries no quality label")]
    MissingQuality,
}

impl WirePrediction {
    /// Fold either schema into a [`PredictionResult`], preferring the
    /// capitalized key when both are present.
    pub fn canonicalize(self) -> Result<PredictionResult, ResponseShapeError> {
        let quality = self
            .predicted_quality_upper
            .or(self.quality_upper)
            .or(self.predicted_quality_lower)
            .or(self.quality)
            .ok_or(ResponseShapeError::MissingQuality)?;

        Ok(PredictionResult {
            quality_class: QualityClass::from_label(&quality),
            quality,
            explanation: self
                .explanation_upper
                .or(self.explanation)
                .unwrap_or_default(),
            suggestion: self
                .suggestion_upper
                .or(self.suggestion)
                .filter(|s| !s.is_empty()),
            detected_issues: self
                .detected_issues_upper
                .or(self.detected_issues)
                .or(self.detected_issues_camel)
                .unwrap_or_default(),
        })
    }
}

/// Response body emitted by the reference prediction service
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponseBody {
    #[serde(rename = "Predicted_Quality")]
    pub predicted_quality: String,
    #[serde(rename = "Explanation")]
    pub explanation: String,
    #[serde(rename = "Suggestion")]
    pub suggestion: String,
    pub detected_issues: Vec<String>,
}

/// Body of `POST /predict-batch`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchPredictRequest {
    pub samples: Vec<BatchSample>,
}

/// Response of `POST /predict-batch`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchPredictResponse {
    pub results: Vec<BatchResultEntry>,
}

/// Classification of one batch row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchResultEntry {
    #[serde(rename = "Sample_ID", alias = "sample_id", alias = "id")]
    pub sample_id: String,
    #[serde(rename = "Quality", alias = "quality")]
    pub quality: String,
}

impl BatchResultEntry {
    pub fn quality_class(&self) -> QualityClass {
        QualityClass::from_label(&self.quality)
    }
}

/// Count batch results per quality tier
pub fn summarize_batch(results: &[BatchResultEntry]) -> BTreeMap<String, usize> {
    let mut summary = BTreeMap::new();
    for entry in results {
        *summary.entry(entry.quality_class().to_string()).or_insert(0) += 1;
    }
    summary
}
