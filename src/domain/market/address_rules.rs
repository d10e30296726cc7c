//! Address classification.
//!
//! There is no geocoding behind these lookups: an address is lower-cased and
//! matched against ordered keyword tables. The first rule with a keyword
//! contained in the address wins; otherwise the table's default applies.

use crate::domain::errors::ValidationError;
use crate::domain::ml::{ForecastFeatures, InvestmentFeatures};

/// Shortest address (after trimming) the lookups accept.
pub const MIN_ADDRESS_LEN: usize = 3;

/// A single (keyword-set -> value) rule.
#[derive(Debug)]
pub struct AddressRule<T: 'static> {
    pub bucket: &'static str,
    pub keywords: &'static [&'static str],
    pub value: T,
}

/// Ordered rules with an explicit fallback.
#[derive(Debug)]
pub struct RuleTable<T: 'static> {
    pub rules: &'static [AddressRule<T>],
    pub default_bucket: &'static str,
    pub default: T,
}

impl<T> RuleTable<T> {
    /// Returns the bucket name and value for `address`.
    pub fn classify(&self, address: &str) -> (&'static str, &T) {
        let normalized = address.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| normalized.contains(k)))
            .map(|rule| (rule.bucket, &rule.value))
            .unwrap_or((self.default_bucket, &self.default))
    }
}

/// Investment-side view of a market: model inputs plus attributes the
/// investment model does not consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketProfile {
    pub features: InvestmentFeatures,
    pub days_on_market: f64,
}

/// County and current median value resolved for an address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub county: &'static str,
    pub current_price: f64,
}

const LUXURY_KEYWORDS: &[&str] = &["beverly hills", "90210", "malibu"];

pub static FORECAST_RULES: RuleTable<[f64; 9]> = RuleTable {
    rules: &[
        AddressRule {
            bucket: "luxury",
            keywords: LUXURY_KEYWORDS,
            value: [120000.0, 0.8, 1.5, 2.0, 15.0, 6.5, 200.0, 800.0, 0.2],
        },
        AddressRule {
            bucket: "downtown",
            keywords: &["downtown", "dtla", "hollywood"],
            value: [80000.0, 1.2, 2.1, 3.5, 25.0, 6.8, 500.0, 650.0, -0.1],
        },
    ],
    default_bucket: "suburban",
    default: [70000.0, 1.5, 2.5, 4.0, 30.0, 7.0, 300.0, 520.0, 0.0],
};

/// (investment features, days on market)
pub static INVESTMENT_RULES: RuleTable<([f64; 9], f64)> = RuleTable {
    rules: &[
        AddressRule {
            bucket: "luxury",
            keywords: LUXURY_KEYWORDS,
            value: ([35.0, 3.2, 15.0, 0.8, 1.5, 2.0, 120000.0, 200.0, 0.12], 15.0),
        },
        AddressRule {
            bucket: "inland_empire",
            keywords: &["riverside", "inland empire"],
            value: ([22.0, 6.8, 25.0, 2.8, 3.5, 4.5, 65000.0, 800.0, 0.18], 35.0),
        },
    ],
    default_bucket: "average",
    default: ([28.0, 5.5, 20.0, 1.8, 2.2, 3.5, 75000.0, 450.0, 0.15], 22.0),
};

pub static LOCATION_RULES: RuleTable<Location> = RuleTable {
    rules: &[
        AddressRule {
            bucket: "los_angeles",
            keywords: &["los angeles", "90210"],
            value: Location {
                county: "Los Angeles County",
                current_price: 850000.0,
            },
        },
        AddressRule {
            bucket: "san_diego",
            keywords: &["san diego"],
            value: Location {
                county: "San Diego County",
                current_price: 720000.0,
            },
        },
        AddressRule {
            bucket: "orange",
            keywords: &["orange"],
            value: Location {
                county: "Orange County",
                current_price: 950000.0,
            },
        },
        AddressRule {
            bucket: "riverside",
            keywords: &["riverside"],
            value: Location {
                county: "Riverside County",
                current_price: 520000.0,
            },
        },
    ],
    default_bucket: "default",
    default: Location {
        county: "Los Angeles County",
        current_price: 650000.0,
    },
};

pub fn derive_forecast_features(address: &str) -> ForecastFeatures {
    let (_, values) = FORECAST_RULES.classify(address);
    ForecastFeatures::from_array(*values)
}

pub fn derive_investment_profile(address: &str) -> MarketProfile {
    let (_, (values, days_on_market)) = INVESTMENT_RULES.classify(address);
    MarketProfile {
        features: InvestmentFeatures::from_array(*values),
        days_on_market: *days_on_market,
    }
}

pub fn resolve_location(address: &str) -> Location {
    *LOCATION_RULES.classify(address).1
}

/// Trim an incoming address and reject it when it is too short to look up.
pub fn validate_address(address: &str) -> Result<&str, ValidationError> {
    let trimmed = address.trim();
    if trimmed.chars().count() < MIN_ADDRESS_LEN {
        return Err(ValidationError::AddressTooShort {
            min_len: MIN_ADDRESS_LEN,
        });
    }
    Ok(trimmed)
}
