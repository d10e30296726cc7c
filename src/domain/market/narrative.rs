//! Qualitative labels derived from feature thresholds and scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ml::{ForecastFeatures, InvestmentFeatures};
use crate::domain::reports::RiskFactor;
use crate::domain::units::round_to;

pub const MAX_RISK_FACTORS: usize = 3;
pub const MIN_HIGHLIGHTS: usize = 2;
pub const MAX_HIGHLIGHTS: usize = 4;

macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labelled_enum!(MarketType {
    Luxury => "Luxury Market",
    Sellers => "Seller's Market",
    Buyers => "Buyer's Market",
    Balanced => "Balanced Market",
});

labelled_enum!(Volatility {
    High => "High",
    Moderate => "Moderate",
    Low => "Low",
});

labelled_enum!(SeasonalTrend {
    Spring => "Spring buying season",
    Summer => "Summer peak activity",
    Fall => "Fall market cooling",
    Winter => "Winter slow season",
});

labelled_enum!(Momentum {
    StrongUpward => "Strong upward",
    Positive => "Positive",
    Weakening => "Weakening",
    Stable => "Stable",
});

labelled_enum!(RiskLevel {
    Low => "Low",
    Moderate => "Moderate",
    High => "High",
});

labelled_enum!(Recommendation {
    StrongBuy => "Strong Buy",
    Buy => "Buy",
    Hold => "Hold",
    Avoid => "Avoid",
});

labelled_enum!(InventoryLevel {
    Low => "Low",
    Balanced => "Balanced",
    High => "High",
});

pub fn market_type(f: &ForecastFeatures) -> MarketType {
    if f.median_income > 100_000.0 {
        MarketType::Luxury
    } else if f.days_on_market < 20.0 {
        MarketType::Sellers
    } else if f.inventory_months > 5.0 {
        MarketType::Buyers
    } else {
        MarketType::Balanced
    }
}

pub fn volatility(f: &ForecastFeatures) -> Volatility {
    if f.inventory_months > 5.0 {
        Volatility::High
    } else if f.days_on_market < 20.0 {
        Volatility::Low
    } else {
        Volatility::Moderate
    }
}

/// `month` is 1-based (January = 1).
pub fn seasonal_trend(month: u32) -> SeasonalTrend {
    match month {
        3..=6 => SeasonalTrend::Spring,
        7..=9 => SeasonalTrend::Summer,
        10 | 11 => SeasonalTrend::Fall,
        _ => SeasonalTrend::Winter,
    }
}

pub fn momentum(f: &ForecastFeatures) -> Momentum {
    if f.population_growth > 2.0 {
        Momentum::StrongUpward
    } else if f.employment_growth > 2.5 {
        Momentum::Positive
    } else if f.inventory_months > 5.0 {
        Momentum::Weakening
    } else {
        Momentum::Stable
    }
}

/// Between one and `MAX_RISK_FACTORS` risks; a generic one when no rule fires.
pub fn risk_factors(f: &ForecastFeatures) -> Vec<RiskFactor> {
    let rules: [(bool, &str, &str); 3] = [
        (
            f.mortgage_rate > 7.0,
            "Rising Interest Rates",
            "Higher mortgage rates may reduce buyer demand and affordability",
        ),
        (
            f.inventory_months > 4.0,
            "Market Oversupply",
            "Increased inventory levels could lead to price pressure",
        ),
        (
            f.population_growth < 1.0,
            "Demographic Trends",
            "Slow population growth may limit long-term demand",
        ),
    ];

    let mut risks: Vec<RiskFactor> = rules
        .iter()
        .filter(|(fired, _, _)| *fired)
        .map(|(_, factor, description)| RiskFactor {
            factor: factor.to_string(),
            description: description.to_string(),
        })
        .collect();

    if risks.is_empty() {
        risks.push(RiskFactor {
            factor: "Market Uncertainty".to_string(),
            description: "General economic conditions may impact real estate values".to_string(),
        });
    }

    risks.truncate(MAX_RISK_FACTORS);
    risks
}

pub fn risk_level(score: u8) -> RiskLevel {
    match score {
        80.. => RiskLevel::Low,
        60..=79 => RiskLevel::Moderate,
        _ => RiskLevel::High,
    }
}

impl Recommendation {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => Recommendation::StrongBuy,
            70..=84 => Recommendation::Buy,
            55..=69 => Recommendation::Hold,
            _ => Recommendation::Avoid,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => {
                "Excellent investment opportunity with strong fundamentals, high rental yields, and positive market trends."
            }
            Recommendation::Buy => {
                "Good investment potential with favorable market conditions and solid return prospects."
            }
            Recommendation::Hold => {
                "Moderate investment with mixed signals. Consider timing and personal investment goals."
            }
            Recommendation::Avoid => {
                "Investment risks outweigh potential returns based on current market conditions."
            }
        }
    }
}

pub fn inventory_level(inventory_months: f64) -> InventoryLevel {
    if inventory_months < 3.0 {
        InventoryLevel::Low
    } else if inventory_months > 5.0 {
        InventoryLevel::High
    } else {
        InventoryLevel::Balanced
    }
}

/// Yield plus a fifth of the 5-year appreciation, one decimal.
pub fn expected_return(f: &InvestmentFeatures) -> f64 {
    round_to(f.rental_yield + f.price_growth_5yr * 0.2, 1)
}

/// 10 at zero days on market, one point lost per 30 days, clamped to [1, 10].
pub fn liquidity_score(days_on_market: f64) -> u8 {
    let raw = 10.0 - days_on_market / 30.0;
    raw.trunc().clamp(1.0, 10.0) as u8
}

pub fn key_highlights(f: &InvestmentFeatures, score: u8) -> Vec<String> {
    let mut highlights = Vec::new();

    if f.rental_yield > 6.0 {
        highlights.push(format!("Strong rental yield of {:.1}%", f.rental_yield));
    }
    if f.price_growth_5yr > 20.0 {
        highlights.push(format!(
            "Excellent 5-year price growth of {:.1}%",
            f.price_growth_5yr
        ));
    }
    if f.population_growth > 2.0 {
        highlights.push(format!(
            "Strong population growth of {:.1}%",
            f.population_growth
        ));
    }
    if f.price_to_rent_ratio < 25.0 {
        highlights.push("Favorable price-to-rent ratio".to_string());
    }
    if score >= 80 {
        highlights.push("Top-tier investment score".to_string());
    }

    if highlights.len() < MIN_HIGHLIGHTS {
        highlights.push("Positive market fundamentals".to_string());
        highlights.push("Stable investment environment".to_string());
    }

    highlights.truncate(MAX_HIGHLIGHTS);
    highlights
}
