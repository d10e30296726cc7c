#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use propcast::application::ml::gradient_boosted::BoostingParams;
use propcast::application::ml::smartcore_predictor::ForestParams;
use propcast::application::ml::{TrainedModelBundle, TrainingParams};

/// Smaller than the production run so the suite stays fast.
pub fn small_params() -> TrainingParams {
    TrainingParams {
        n_samples: 300,
        seed: 42,
        forest: ForestParams {
            n_trees: 15,
            max_depth: 8,
            ..Default::default()
        },
        boosting: BoostingParams {
            n_stages: 25,
            ..Default::default()
        },
    }
}

pub fn bundle() -> Arc<TrainedModelBundle> {
    static BUNDLE: OnceLock<Arc<TrainedModelBundle>> = OnceLock::new();
    BUNDLE
        .get_or_init(|| Arc::new(TrainedModelBundle::train(&small_params()).unwrap()))
        .clone()
}
