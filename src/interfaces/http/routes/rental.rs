use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::domain::rental::{RentalInputs, RentalResult, calculate_returns};
use crate::interfaces::http::error::ApiResult;

/// Rental property returns: `POST /api/v1/rental/calculate`
pub async fn calculate_rental(
    payload: Result<Json<RentalInputs>, JsonRejection>,
) -> ApiResult<Json<RentalResult>> {
    let Json(inputs) = payload?;
    Ok(Json(calculate_returns(&inputs)?))
}
