pub mod areas;
pub mod forecast;
pub mod health;
pub mod investment;
pub mod rental;
