// Model training, persistence and inference
pub mod ml;

// Request-level pipelines over the trained models
pub mod forecast_service;
pub mod investment_service;

pub use forecast_service::ForecastService;
pub use investment_service::InvestmentService;
