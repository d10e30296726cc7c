use std::sync::Arc;

use crate::application::ml::TrainedModelBundle;
use crate::application::{ForecastService, InvestmentService};

/// Shared handler state. Cheap to clone; the model bundle is read-only.
#[derive(Clone)]
pub struct AppState {
    pub forecasts: Arc<ForecastService>,
    pub investments: Arc<InvestmentService>,
}

impl AppState {
    pub fn new(models: Arc<TrainedModelBundle>) -> Self {
        Self {
            forecasts: Arc::new(ForecastService::new(models.clone())),
            investments: Arc::new(InvestmentService::new(models)),
        }
    }
}
