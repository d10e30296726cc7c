//! Model artifact and training configuration parsing from environment variables.

use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

use crate::application::ml::TrainingParams;
use crate::application::ml::gradient_boosted::BoostingParams;
use crate::application::ml::smartcore_predictor::ForestParams;

/// Model environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEnvConfig {
    pub model_dir: PathBuf,
    pub training_samples: usize,
    pub training_seed: u64,
    pub forest_trees: usize,
    pub forest_max_depth: u16,
    pub boosting_stages: usize,
    pub boosting_learning_rate: f64,
    pub boosting_max_depth: u16,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("data/models"),
            training_samples: 1000,
            training_seed: 42,
            forest_trees: 100,
            forest_max_depth: 10,
            boosting_stages: 100,
            boosting_learning_rate: 0.1,
            boosting_max_depth: 6,
        }
    }
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            model_dir: PathBuf::from(
                env::var("MODEL_DIR").unwrap_or_else(|_| "data/models".to_string()),
            ),
            training_samples: env::var("TRAINING_SAMPLES")
                .unwrap_or_else(|_| "1000".to_string())
                .parse::<usize>()
                .unwrap_or(1000),
            training_seed: env::var("TRAINING_SEED")
                .unwrap_or_else(|_| "42".to_string())
                .parse::<u64>()
                .unwrap_or(42),
            forest_trees: env::var("FOREST_TREES")
                .unwrap_or_else(|_| "100".to_string())
                .parse::<usize>()
                .unwrap_or(100),
            forest_max_depth: env::var("FOREST_MAX_DEPTH")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u16>()
                .unwrap_or(10),
            boosting_stages: env::var("BOOSTING_STAGES")
                .unwrap_or_else(|_| "100".to_string())
                .parse::<usize>()
                .unwrap_or(100),
            boosting_learning_rate: env::var("BOOSTING_LEARNING_RATE")
                .unwrap_or_else(|_| "0.1".to_string())
                .parse::<f64>()
                .unwrap_or(0.1),
            boosting_max_depth: env::var("BOOSTING_MAX_DEPTH")
                .unwrap_or_else(|_| "6".to_string())
                .parse::<u16>()
                .unwrap_or(6),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.training_samples < 10 {
            bail!(
                "TRAINING_SAMPLES must be at least 10, got {}",
                self.training_samples
            );
        }
        if self.forest_trees == 0 {
            bail!("FOREST_TREES must be positive");
        }
        if !(self.boosting_learning_rate > 0.0 && self.boosting_learning_rate <= 1.0) {
            bail!(
                "BOOSTING_LEARNING_RATE must be in (0, 1], got {}",
                self.boosting_learning_rate
            );
        }
        Ok(())
    }

    pub fn training_params(&self) -> TrainingParams {
        TrainingParams {
            n_samples: self.training_samples,
            seed: self.training_seed,
            forest: ForestParams {
                n_trees: self.forest_trees,
                max_depth: self.forest_max_depth,
                seed: self.training_seed,
                ..Default::default()
            },
            boosting: BoostingParams {
                n_stages: self.boosting_stages,
                learning_rate: self.boosting_learning_rate,
                max_depth: self.boosting_max_depth,
                ..Default::default()
            },
        }
    }
}
