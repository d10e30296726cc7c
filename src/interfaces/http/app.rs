//! Axum application builder.
//!
//! Routes:
//! - `GET /health`, `GET /api/v1/health`
//! - `GET /api/v1/forecast/{address}`
//! - `POST /api/v1/investment/score`
//! - `GET /api/v1/areas/top`
//! - `POST /api/v1/rental/calculate`

use std::time::Duration;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::error::ApiError;
use super::routes::{areas, forecast, health, investment, rental};
use super::state::AppState;
use crate::config::ServerEnvConfig;

pub const API_PREFIX: &str = "/api/v1";

/// Create the Axum application with all routes.
pub fn create_app(state: AppState, server: &ServerEnvConfig) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        .route("/forecast/{address}", get(forecast::get_forecast))
        .route("/investment/score", post(investment::score_investment))
        .route("/areas/top", get(areas::get_top_areas))
        .route("/rental/calculate", post(rental::calculate_rental));

    Router::new()
        .route("/health", get(health::health))
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
        .with_state(state)
}

fn cors_layer(server: &ServerEnvConfig) -> CorsLayer {
    let origin = if server.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("No such route".to_string())
}
