//! 12-month price forecast for an address.

use std::sync::Arc;

use chrono::{Datelike, Duration, Local, NaiveDate};
use rand::Rng;
use statrs::statistics::{Data, OrderStatistics};
use tracing::debug;

use crate::application::ml::TrainedModelBundle;
use crate::application::ml::synthetic::normal;
use crate::domain::errors::ScoringError;
use crate::domain::market::narrative;
use crate::domain::market::{derive_forecast_features, resolve_location, validate_address};
use crate::domain::reports::{ChartPoint, ForecastResult};
use crate::domain::units::round_to;

pub const HISTORY_MONTHS: i64 = 6;
pub const FORECAST_MONTHS: i64 = 12;
const DAYS_PER_MONTH: i64 = 30;
const MONTE_CARLO_TRIALS: usize = 100;
/// Spread (percentage points) of the Monte Carlo noise around the estimate.
const FORECAST_NOISE_STD: f64 = 2.0;
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct ForecastService {
    models: Arc<TrainedModelBundle>,
}

impl ForecastService {
    pub fn new(models: Arc<TrainedModelBundle>) -> Self {
        Self { models }
    }

    pub fn forecast(&self, address: &str) -> Result<ForecastResult, ScoringError> {
        self.forecast_with(address, Local::now().date_naive(), &mut rand::rng())
    }

    pub fn forecast_with<R: Rng + ?Sized>(
        &self,
        address: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<ForecastResult, ScoringError> {
        let address = validate_address(address)?;
        let features = derive_forecast_features(address);
        let estimate = self.models.predict_price_change(&features)?;

        // 80% band from the 10th and 90th percentile of noisy draws
        let draws: Vec<f64> = (0..MONTE_CARLO_TRIALS)
            .map(|_| estimate + normal(rng, 0.0, FORECAST_NOISE_STD))
            .collect();
        let mut draws = Data::new(draws);
        let lower = draws.percentile(10);
        let upper = draws.percentile(90);

        let location = resolve_location(address);
        let current = location.current_price;
        debug!(
            "Forecast for {:?}: {:+.2}% (band {:+.2}..{:+.2}) from {}",
            address, estimate, lower, upper, current
        );

        let recent_change = round_to(normal(rng, 0.5, 2.0), 2);
        let confidence = (85.0 + normal(rng, 0.0, 5.0)).trunc().clamp(70.0, 95.0) as u32;
        let chart_data = build_chart(current, estimate, lower, upper, today, rng);

        Ok(ForecastResult {
            address: address.to_string(),
            county: location.county.to_string(),
            current_value: current,
            predicted_value: current * (1.0 + estimate / 100.0),
            recent_change,
            predicted_change: estimate,
            market_type: narrative::market_type(&features),
            confidence,
            volatility: narrative::volatility(&features),
            seasonal_trend: narrative::seasonal_trend(today.month()),
            momentum: narrative::momentum(&features),
            chart_data,
            risk_factors: narrative::risk_factors(&features),
        })
    }
}

/// Six months of jittered history followed by twelve forecast months whose
/// band widens from half to the full Monte Carlo spread.
fn build_chart<R: Rng + ?Sized>(
    current: f64,
    estimate: f64,
    lower: f64,
    upper: f64,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<ChartPoint> {
    let date_at = |months: i64| {
        (today + Duration::days(months * DAYS_PER_MONTH))
            .format(DATE_FORMAT)
            .to_string()
    };

    let mut points = Vec::with_capacity((HISTORY_MONTHS + FORECAST_MONTHS) as usize);

    for month in -HISTORY_MONTHS..0 {
        let variation = normal(rng, 0.0, 2.0);
        points.push(ChartPoint::Historical {
            date: date_at(month),
            price: (current * (1.0 + variation / 100.0)).round(),
        });
    }

    for month in 1..=FORECAST_MONTHS {
        let progress = (month - 1) as f64 / (FORECAST_MONTHS - 1) as f64;
        let predicted = current * (1.0 + estimate * progress / 100.0);
        let half_width = (upper - lower) * (0.5 + 0.5 * progress) * current / 100.0;
        points.push(ChartPoint::Forecast {
            date: date_at(month),
            predicted: predicted.round(),
            lower: (predicted - half_width).round(),
            upper: (predicted + half_width).round(),
        });
    }

    points
}
