pub mod feature_registry;

pub use feature_registry::{
    FEATURE_COUNT, FORECAST_FEATURE_NAMES, ForecastFeatures, INVESTMENT_FEATURE_NAMES,
    InvestmentFeatures, display_name,
};
