//! Route definitions for the reference prediction service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Prediction routes, mounted at the root to match existing clients
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/predict", post(handlers::predict))
        .route("/predict-batch", post(handlers::predict_batch))
}
