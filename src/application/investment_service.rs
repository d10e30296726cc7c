//! Investment scoring with per-feature explanations.

use std::sync::Arc;

use tracing::debug;

use crate::application::ml::TrainedModelBundle;
use crate::domain::errors::ScoringError;
use crate::domain::market::narrative::{self, Recommendation};
use crate::domain::market::{MarketProfile, derive_investment_profile, validate_address};
use crate::domain::ml::display_name;
use crate::domain::reports::{Attribution, InvestmentMetrics, InvestmentResult};
use crate::domain::units::round_to;

/// Attributions returned per score, largest magnitude first.
pub const MAX_ATTRIBUTIONS: usize = 8;
/// Market cap rate as a share of gross rental yield.
const CAP_RATE_FACTOR: f64 = 0.8;

pub struct InvestmentService {
    models: Arc<TrainedModelBundle>,
}

impl InvestmentService {
    pub fn new(models: Arc<TrainedModelBundle>) -> Self {
        Self { models }
    }

    pub fn analyze(&self, address: &str) -> Result<InvestmentResult, ScoringError> {
        let address = validate_address(address)?;
        let profile = derive_investment_profile(address);
        let features = &profile.features;

        let raw = self.models.predict_investment_score(features)?;
        let score = raw.clamp(0.0, 100.0).trunc() as u8;

        let mut attributions: Vec<Attribution> = self
            .models
            .explain_investment(features)?
            .into_iter()
            .map(|(name, impact)| Attribution {
                feature: display_name(name),
                impact,
            })
            .collect();
        attributions.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
        attributions.truncate(MAX_ATTRIBUTIONS);

        debug!("Investment score for {:?}: {} (raw {:.3})", address, score, raw);

        let recommendation = Recommendation::from_score(score);
        Ok(InvestmentResult {
            address: address.to_string(),
            investment_score: score,
            risk_level: narrative::risk_level(score),
            expected_return: narrative::expected_return(features),
            liquidity_score: narrative::liquidity_score(profile.days_on_market),
            recommendation,
            recommendation_reason: recommendation.reason().to_string(),
            key_highlights: narrative::key_highlights(features, score),
            attributions,
            metrics: build_metrics(&profile),
        })
    }
}

fn build_metrics(profile: &MarketProfile) -> InvestmentMetrics {
    let f = &profile.features;
    InvestmentMetrics {
        price_to_rent_ratio: round_to(f.price_to_rent_ratio, 1),
        price_appreciation_5yr: round_to(f.price_growth_5yr, 1),
        rental_yield: round_to(f.rental_yield, 1),
        market_cap_rate: round_to(f.rental_yield * CAP_RATE_FACTOR, 1),
        days_on_market: profile.days_on_market.max(0.0).round() as u32,
        inventory_level: narrative::inventory_level(f.inventory_months),
        population_growth: round_to(f.population_growth, 1),
        employment_growth: round_to(f.employment_growth, 1),
    }
}
