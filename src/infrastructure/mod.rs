// Model artifact persistence
pub mod persistence;
