//! Seeded synthetic market dataset used to fit both models.
//!
//! Rows are drawn per county from tier-dependent distributions. The two
//! targets are noisy linear relationships over the raw draws; the feature
//! columns apply the floors a live market would show (inventory >= 0.5
//! months, mortgage rate >= 3%).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;

use crate::domain::ml::{ForecastFeatures, InvestmentFeatures};

pub const CA_COUNTIES: [&str; 20] = [
    "Los Angeles",
    "San Diego",
    "Orange",
    "Riverside",
    "San Bernardino",
    "Santa Clara",
    "Alameda",
    "Sacramento",
    "Contra Costa",
    "Fresno",
    "Kern",
    "San Francisco",
    "Ventura",
    "San Joaquin",
    "Stanislaus",
    "Sonoma",
    "Tulare",
    "Santa Barbara",
    "Solano",
    "Monterey",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    HighCost,
    MajorMetro,
    Other,
}

impl CostTier {
    pub fn of(county: &str) -> Self {
        match county {
            "San Francisco" | "Santa Clara" | "San Mateo" => CostTier::HighCost,
            "Los Angeles" | "Orange" | "San Diego" => CostTier::MajorMetro,
            _ => CostTier::Other,
        }
    }

    /// (mean, std) of base price, base income and base rental yield.
    fn base_distributions(self) -> [(f64, f64); 3] {
        match self {
            CostTier::HighCost => [(1_200_000.0, 200_000.0), (120_000.0, 20_000.0), (3.5, 0.5)],
            CostTier::MajorMetro => [(800_000.0, 150_000.0), (80_000.0, 15_000.0), (4.5, 0.8)],
            CostTier::Other => [(500_000.0, 100_000.0), (60_000.0, 12_000.0), (6.0, 1.0)],
        }
    }
}

/// One generated row, flat so it can be exported as CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticRecord {
    pub county: &'static str,
    pub tier: CostTier,
    pub median_income: f64,
    pub population_growth: f64,
    pub employment_growth: f64,
    pub inventory_months: f64,
    pub days_on_market: f64,
    pub mortgage_rate: f64,
    pub new_construction: f64,
    pub price_per_sqft_lag: f64,
    pub seasonal_factor: f64,
    pub rental_yield: f64,
    pub price_to_rent_ratio: f64,
    pub price_growth_5yr: f64,
    pub market_volatility: f64,
    pub price_change_12m: f64,
    pub investment_score: f64,
}

impl SyntheticRecord {
    pub fn forecast_features(&self) -> ForecastFeatures {
        ForecastFeatures {
            median_income: self.median_income,
            population_growth: self.population_growth,
            employment_growth: self.employment_growth,
            inventory_months: self.inventory_months,
            days_on_market: self.days_on_market,
            mortgage_rate: self.mortgage_rate,
            new_construction: self.new_construction,
            price_per_sqft_lag: self.price_per_sqft_lag,
            seasonal_factor: self.seasonal_factor,
        }
    }

    pub fn investment_features(&self) -> InvestmentFeatures {
        InvestmentFeatures {
            price_to_rent_ratio: self.price_to_rent_ratio,
            rental_yield: self.rental_yield,
            price_growth_5yr: self.price_growth_5yr,
            population_growth: self.population_growth,
            employment_growth: self.employment_growth,
            inventory_months: self.inventory_months,
            median_income: self.median_income,
            new_construction: self.new_construction,
            market_volatility: self.market_volatility,
        }
    }
}

/// Gaussian draw with the given mean and standard deviation.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std * z
}

fn generate_record<R: Rng + ?Sized>(rng: &mut R) -> SyntheticRecord {
    let county = CA_COUNTIES[rng.random_range(0..CA_COUNTIES.len())];
    let tier = CostTier::of(county);
    let [price, income, yield_] = tier.base_distributions();

    let base_price = normal(rng, price.0, price.1);
    let base_income = normal(rng, income.0, income.1);
    let base_yield = normal(rng, yield_.0, yield_.1);

    let median_income = base_income.max(30_000.0);
    let population_growth = normal(rng, 1.2, 0.8);
    let employment_growth = normal(rng, 2.1, 1.2);
    let inventory_months = normal(rng, 3.5, 1.5);
    let days_on_market = normal(rng, 25.0, 10.0).trunc().max(5.0);
    let mortgage_rate = normal(rng, 6.8, 0.5);
    let new_construction = normal(rng, 500.0, 200.0).trunc().max(0.0);
    let price_per_sqft_lag = base_price / normal(rng, 2000.0, 300.0);
    let seasonal_factor = rng.random_range(0.0..std::f64::consts::TAU).sin();

    let rental_yield = base_yield.max(1.0);
    let price_to_rent_ratio = 100.0 / rental_yield;
    let price_growth_5yr = normal(rng, 25.0, 15.0);
    let market_volatility = normal(rng, 0.15, 0.05);

    let price_change_12m = 0.3 * employment_growth + 0.2 * population_growth
        - 0.4 * inventory_months
        - 0.2 * mortgage_rate
        + 0.1 * seasonal_factor
        + normal(rng, 0.0, 2.0);

    let investment_score = (50.0 + 5.0 * rental_yield + 3.0 * employment_growth
        + 2.0 * population_growth
        - 0.5 * (price_to_rent_ratio - 25.0).abs()
        + 0.3 * price_growth_5yr
        - 20.0 * market_volatility
        + normal(rng, 0.0, 5.0))
    .clamp(0.0, 100.0);

    SyntheticRecord {
        county,
        tier,
        median_income,
        population_growth,
        employment_growth,
        inventory_months: inventory_months.max(0.5),
        days_on_market,
        mortgage_rate: mortgage_rate.max(3.0),
        new_construction,
        price_per_sqft_lag,
        seasonal_factor,
        rental_yield,
        price_to_rent_ratio,
        price_growth_5yr,
        market_volatility,
        price_change_12m,
        investment_score,
    }
}

#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    records: Vec<SyntheticRecord>,
}

impl SyntheticDataset {
    pub fn generate(n_samples: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = (0..n_samples).map(|_| generate_record(&mut rng)).collect();
        Self { records }
    }

    pub fn records(&self) -> &[SyntheticRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forecast feature rows and the 12-month price change target.
    pub fn forecast_matrix(&self) -> (Vec<Vec<f64>>, Vec<f64>) {
        self.records
            .iter()
            .map(|r| (r.forecast_features().to_vector(), r.price_change_12m))
            .unzip()
    }

    /// Investment feature rows and the investment score target.
    pub fn investment_matrix(&self) -> (Vec<Vec<f64>>, Vec<f64>) {
        self.records
            .iter()
            .map(|r| (r.investment_features().to_vector(), r.investment_score))
            .unzip()
    }

    /// Split off the last `fraction` of rows as a held-out set.
    pub fn split(&self, fraction: f64) -> (SyntheticDataset, SyntheticDataset) {
        let n_test = ((self.records.len() as f64) * fraction.clamp(0.0, 1.0)).round() as usize;
        let cut = self.records.len() - n_test;
        (
            SyntheticDataset {
                records: self.records[..cut].to_vec(),
            },
            SyntheticDataset {
                records: self.records[cut..].to_vec(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::FEATURE_COUNT;

    #[test]
    fn test_same_seed_same_dataset() {
        let a = SyntheticDataset::generate(50, 7);
        let b = SyntheticDataset::generate(50, 7);
        assert_eq!(a.records(), b.records());

        let c = SyntheticDataset::generate(50, 8);
        assert_ne!(a.records(), c.records());
    }

    #[test]
    fn test_feature_floors_and_target_range() {
        let data = SyntheticDataset::generate(500, 42);
        for r in data.records() {
            assert!(r.median_income >= 30_000.0);
            assert!(r.inventory_months >= 0.5);
            assert!(r.mortgage_rate >= 3.0);
            assert!(r.days_on_market >= 5.0);
            assert!(r.new_construction >= 0.0);
            assert!(r.rental_yield >= 1.0);
            assert!((-1.0..=1.0).contains(&r.seasonal_factor));
            assert!((0.0..=100.0).contains(&r.investment_score));
            assert!((r.price_to_rent_ratio * r.rental_yield - 100.0).abs() < 1e-9);
            assert_eq!(r.tier, CostTier::of(r.county));
        }
    }

    #[test]
    fn test_matrices_follow_feature_layout() {
        let data = SyntheticDataset::generate(20, 1);
        let (x, y) = data.forecast_matrix();
        assert_eq!(x.len(), 20);
        assert_eq!(y.len(), 20);
        assert!(x.iter().all(|row| row.len() == FEATURE_COUNT));

        let (xi, yi) = data.investment_matrix();
        let first = &data.records()[0];
        assert_eq!(xi[0][0], first.price_to_rent_ratio);
        assert_eq!(xi[0][6], first.median_income);
        assert_eq!(yi[0], first.investment_score);
    }

    #[test]
    fn test_split_keeps_every_row() {
        let data = SyntheticDataset::generate(100, 3);
        let (train, test) = data.split(0.2);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
        assert_eq!(&test.records()[0], &data.records()[80]);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(CostTier::of("San Francisco"), CostTier::HighCost);
        assert_eq!(CostTier::of("Orange"), CostTier::MajorMetro);
        assert_eq!(CostTier::of("Kern"), CostTier::Other);
    }
}
