// Address-driven market data and narrative rules
pub mod market;

// Feature layouts shared by training and inference
pub mod ml;

// Response payloads
pub mod reports;

// Rental return math
pub mod rental;

// Domain-specific error types
pub mod errors;

pub mod units;
