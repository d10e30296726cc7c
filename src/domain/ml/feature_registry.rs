use serde::{Deserialize, Serialize};

/// Number of positions in both feature layouts.
pub const FEATURE_COUNT: usize = 9;

/// Ordered forecast feature names.
/// This order MUST match `ForecastFeatures::to_vector` and the training matrix.
/// Any change here is a breaking change for persisted price models.
pub const FORECAST_FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "median_income",
    "population_growth",
    "employment_growth",
    "inventory_months",
    "days_on_market",
    "mortgage_rate",
    "new_construction",
    "price_per_sqft_lag",
    "seasonal_factor",
];

/// Ordered investment feature names.
/// This order MUST match `InvestmentFeatures::to_vector` and the training matrix.
pub const INVESTMENT_FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "price_to_rent_ratio",
    "rental_yield",
    "price_growth_5yr",
    "population_growth",
    "employment_growth",
    "inventory_months",
    "median_income",
    "new_construction",
    "market_volatility",
];

/// Inputs of the 12-month price-change model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastFeatures {
    pub median_income: f64,
    pub population_growth: f64,
    pub employment_growth: f64,
    pub inventory_months: f64,
    pub days_on_market: f64,
    pub mortgage_rate: f64,
    pub new_construction: f64,
    pub price_per_sqft_lag: f64,
    pub seasonal_factor: f64,
}

impl ForecastFeatures {
    pub fn from_array(v: [f64; FEATURE_COUNT]) -> Self {
        Self {
            median_income: v[0],
            population_growth: v[1],
            employment_growth: v[2],
            inventory_months: v[3],
            days_on_market: v[4],
            mortgage_rate: v[5],
            new_construction: v[6],
            price_per_sqft_lag: v[7],
            seasonal_factor: v[8],
        }
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.median_income,
            self.population_growth,
            self.employment_growth,
            self.inventory_months,
            self.days_on_market,
            self.mortgage_rate,
            self.new_construction,
            self.price_per_sqft_lag,
            self.seasonal_factor,
        ]
    }
}

/// Inputs of the investment-score model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentFeatures {
    pub price_to_rent_ratio: f64,
    pub rental_yield: f64,
    pub price_growth_5yr: f64,
    pub population_growth: f64,
    pub employment_growth: f64,
    pub inventory_months: f64,
    pub median_income: f64,
    pub new_construction: f64,
    pub market_volatility: f64,
}

impl InvestmentFeatures {
    pub fn from_array(v: [f64; FEATURE_COUNT]) -> Self {
        Self {
            price_to_rent_ratio: v[0],
            rental_yield: v[1],
            price_growth_5yr: v[2],
            population_growth: v[3],
            employment_growth: v[4],
            inventory_months: v[5],
            median_income: v[6],
            new_construction: v[7],
            market_volatility: v[8],
        }
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.price_to_rent_ratio,
            self.rental_yield,
            self.price_growth_5yr,
            self.population_growth,
            self.employment_growth,
            self.inventory_months,
            self.median_income,
            self.new_construction,
            self.market_volatility,
        ]
    }
}

/// Human-readable label for a raw feature name.
/// Unknown names fall back to title case ("foo_bar" -> "Foo Bar").
pub fn display_name(feature: &str) -> String {
    let mapped = match feature {
        "price_to_rent_ratio" => "Price-to-Rent Ratio",
        "rental_yield" => "Rental Yield",
        "price_growth_5yr" => "5-Year Price Growth",
        "population_growth" => "Population Growth",
        "employment_growth" => "Employment Growth",
        "inventory_months" => "Market Inventory",
        "median_income" => "Median Income",
        "new_construction" => "New Construction",
        "market_volatility" => "Market Volatility",
        _ => return title_case(feature),
    };
    mapped.to_string()
}

fn title_case(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
