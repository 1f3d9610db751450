//! HTTP handlers for sample quality prediction

use axum::Json;
use serde_json::Value;
use shared::{BatchPredictResponse, PredictResponseBody};

use crate::error::AppResult;
use crate::services::prediction;

/// Assess one sample
pub async fn predict(Json(body): Json<Value>) -> AppResult<Json<PredictResponseBody>> {
    let response = prediction::predict(&body)?;
    Ok(Json(response))
}

/// Assess a batch of uploaded rows
pub async fn predict_batch(Json(body): Json<Value>) -> AppResult<Json<BatchPredictResponse>> {
    let response = prediction::predict_batch(&body)?;
    Ok(Json(response))
}
