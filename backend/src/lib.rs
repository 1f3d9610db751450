//! Sugarcane Quality Analysis - reference prediction service
//!
//! Serves the rule-based quality assessment over HTTP so the evaluation
//! engine has a service to talk to when no trained model is deployed.

use std::sync::Arc;

use axum::{body::Body, http::Request, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Sugarcane Quality Analysis API v1.0"
}
