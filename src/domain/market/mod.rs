// Address classification (rule tables)
pub mod address_rules;

// Qualitative labels
pub mod narrative;

// Static top-county catalog
pub mod top_areas;

pub use address_rules::{
    Location, MIN_ADDRESS_LEN, MarketProfile, derive_forecast_features,
    derive_investment_profile, resolve_location, validate_address,
};
