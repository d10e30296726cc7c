pub mod model_repository;

pub use model_repository::{
    INVESTMENT_MODEL_FILE, ModelRepository, PRICE_MODEL_FILE, SCALER_FILE,
};
