use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::market::top_areas::top_investment_areas;
use crate::domain::reports::TopArea;

#[derive(Debug, Serialize)]
pub struct TopAreasResponse {
    pub areas: Vec<TopArea>,
    pub last_updated: DateTime<Utc>,
}

/// Ranked counties: `GET /api/v1/areas/top`
pub async fn get_top_areas() -> Json<TopAreasResponse> {
    Json(TopAreasResponse {
        areas: top_investment_areas(),
        last_updated: Utc::now(),
    })
}
