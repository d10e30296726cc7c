use axum::Json;
use axum::extract::{Path, State};

use crate::domain::reports::ForecastResult;
use crate::interfaces::http::error::ApiResult;
use crate::interfaces::http::state::AppState;

/// 12-month forecast: `GET /api/v1/forecast/{address}`
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Json<ForecastResult>> {
    let result = state.forecasts.forecast(&address)?;
    Ok(Json(result))
}
