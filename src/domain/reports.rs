//! Response payloads produced by the scoring pipeline.

use serde::{Deserialize, Serialize};

use crate::domain::market::narrative::{
    InventoryLevel, MarketType, Momentum, Recommendation, RiskLevel, SeasonalTrend, Volatility,
};

/// One point of the forecast chart.
///
/// Past points carry an observed price, future points carry a prediction and
/// its band. Serialized flat, with `null` for the fields a point does not have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ChartPointRecord", try_from = "ChartPointRecord")]
pub enum ChartPoint {
    Historical {
        date: String,
        price: f64,
    },
    Forecast {
        date: String,
        predicted: f64,
        lower: f64,
        upper: f64,
    },
}

impl ChartPoint {
    pub fn date(&self) -> &str {
        match self {
            ChartPoint::Historical { date, .. } | ChartPoint::Forecast { date, .. } => date,
        }
    }

    pub fn is_historical(&self) -> bool {
        matches!(self, ChartPoint::Historical { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChartPointRecord {
    date: String,
    historical_price: Option<f64>,
    predicted_price: Option<f64>,
    upper_bound: Option<f64>,
    lower_bound: Option<f64>,
}

impl From<ChartPoint> for ChartPointRecord {
    fn from(point: ChartPoint) -> Self {
        match point {
            ChartPoint::Historical { date, price } => Self {
                date,
                historical_price: Some(price),
                predicted_price: None,
                upper_bound: None,
                lower_bound: None,
            },
            ChartPoint::Forecast {
                date,
                predicted,
                lower,
                upper,
            } => Self {
                date,
                historical_price: None,
                predicted_price: Some(predicted),
                upper_bound: Some(upper),
                lower_bound: Some(lower),
            },
        }
    }
}

impl TryFrom<ChartPointRecord> for ChartPoint {
    type Error = String;

    fn try_from(r: ChartPointRecord) -> Result<Self, Self::Error> {
        match (r.historical_price, r.predicted_price, r.lower_bound, r.upper_bound) {
            (Some(price), None, None, None) => Ok(ChartPoint::Historical {
                date: r.date,
                price,
            }),
            (None, Some(predicted), Some(lower), Some(upper)) => Ok(ChartPoint::Forecast {
                date: r.date,
                predicted,
                lower,
                upper,
            }),
            _ => Err(format!(
                "chart point {} must carry either a historical price or a full prediction",
                r.date
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub address: String,
    pub county: String,
    pub current_value: f64,
    pub predicted_value: f64,
    pub recent_change: f64,
    /// Point estimate of the 12-month change, in percent.
    pub predicted_change: f64,
    pub market_type: MarketType,
    pub confidence: u32,
    pub volatility: Volatility,
    pub seasonal_trend: SeasonalTrend,
    pub momentum: Momentum,
    pub chart_data: Vec<ChartPoint>,
    pub risk_factors: Vec<RiskFactor>,
}

/// Contribution of one feature to a single investment score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub feature: String,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub price_to_rent_ratio: f64,
    pub price_appreciation_5yr: f64,
    pub rental_yield: f64,
    pub market_cap_rate: f64,
    pub days_on_market: u32,
    pub inventory_level: InventoryLevel,
    pub population_growth: f64,
    pub employment_growth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub address: String,
    pub investment_score: u8,
    pub risk_level: RiskLevel,
    pub expected_return: f64,
    pub liquidity_score: u8,
    pub recommendation: Recommendation,
    pub recommendation_reason: String,
    pub key_highlights: Vec<String>,
    /// Ranked attributions; the front end reads them under this name.
    #[serde(rename = "shap_explanations")]
    pub attributions: Vec<Attribution>,
    pub metrics: InvestmentMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArea {
    pub id: u32,
    pub county: String,
    pub region: String,
    pub overall_score: u8,
    pub price_growth: f64,
    pub rental_yield: f64,
    pub population_growth: f64,
    pub median_price: f64,
    pub highlights: Vec<String>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_historical_point_serializes_flat() {
        let point = ChartPoint::Historical {
            date: "2026-05-01".to_string(),
            price: 650000.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["historical_price"], 650000.0);
        assert!(json["predicted_price"].is_null());
        assert!(json["upper_bound"].is_null());
        assert!(json["lower_bound"].is_null());
    }

    #[test]
    fn test_mixed_point_is_rejected() {
        let raw = r#"{"date":"2026-05-01","historical_price":1.0,"predicted_price":2.0,"upper_bound":3.0,"lower_bound":1.0}"#;
        assert!(serde_json::from_str::<ChartPoint>(raw).is_err());

        let raw = r#"{"date":"2026-05-01","historical_price":null,"predicted_price":2.0,"upper_bound":3.0,"lower_bound":1.0}"#;
        let point: ChartPoint = serde_json::from_str(raw).unwrap();
        assert!(!point.is_historical());
        assert_eq!(point.date(), "2026-05-01");
    }

    #[test]
    fn test_attributions_use_front_end_field_name() {
        let result = InvestmentResult {
            address: "x".into(),
            investment_score: 70,
            risk_level: RiskLevel::Moderate,
            expected_return: 8.0,
            liquidity_score: 9,
            recommendation: Recommendation::Buy,
            recommendation_reason: "r".into(),
            key_highlights: vec![],
            attributions: vec![Attribution {
                feature: "Rental Yield".into(),
                impact: 1.5,
            }],
            metrics: InvestmentMetrics {
                price_to_rent_ratio: 28.0,
                price_appreciation_5yr: 20.0,
                rental_yield: 5.5,
                market_cap_rate: 4.4,
                days_on_market: 22,
                inventory_level: InventoryLevel::Balanced,
                population_growth: 1.8,
                employment_growth: 2.2,
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["shap_explanations"][0]["feature"], "Rental Yield");
        assert_eq!(json["recommendation"], "Buy");
        assert_eq!(json["metrics"]["inventory_level"], "Balanced");
    }
}
