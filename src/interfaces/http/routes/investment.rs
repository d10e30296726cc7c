use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use crate::domain::reports::InvestmentResult;
use crate::interfaces::http::error::ApiResult;
use crate::interfaces::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InvestmentRequest {
    pub address: String,
}

/// Score an address: `POST /api/v1/investment/score`
pub async fn score_investment(
    State(state): State<AppState>,
    payload: Result<Json<InvestmentRequest>, JsonRejection>,
) -> ApiResult<Json<InvestmentResult>> {
    let Json(request) = payload?;
    // Attribution evaluates the forest over every feature coalition
    let service = state.investments.clone();
    let result =
        tokio::task::spawn_blocking(move || service.analyze(&request.address)).await??;
    Ok(Json(result))
}
