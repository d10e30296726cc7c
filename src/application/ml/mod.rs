pub mod explainer;
pub mod gradient_boosted;
pub mod model_store;
pub mod predictor;
pub mod scaler;
pub mod smartcore_predictor;
pub mod synthetic;

pub use model_store::{ModelStore, TrainedModelBundle, TrainingParams};
pub use predictor::Regressor;
