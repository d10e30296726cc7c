//! Least-squares gradient boosting over smartcore regression trees.
//!
//! # Prediction
//!
//! 1. Start from `init_value` (mean of the training target)
//! 2. For each stage, add `learning_rate * tree.predict(x)`
//!
//! Each stage's tree is fitted on the residuals left by the stages before it.

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorParameters,
};
use tracing::debug;

use super::predictor::{Regressor, check_shape};
use super::smartcore_predictor::to_matrix;
use crate::domain::errors::ModelError;

type Tree = DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

const MODEL_NAME: &str = "Gradient Boosted Trees";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostingParams {
    pub n_stages: usize,
    pub learning_rate: f64,
    pub max_depth: u16,
    /// Smallest leaf a stage tree may produce.
    pub min_samples_leaf: usize,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_stages: 100,
            learning_rate: 0.1,
            max_depth: 6,
            min_samples_leaf: 20,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoostedRegressor {
    init_value: f64,
    learning_rate: f64,
    stages: Vec<Tree>,
    n_features: usize,
}

impl BoostedRegressor {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &BoostingParams) -> Result<Self, ModelError> {
        let training_failed = |reason: String| ModelError::TrainingFailed {
            model: MODEL_NAME,
            reason,
        };

        if x.is_empty() || x.len() != y.len() {
            return Err(training_failed(format!(
                "{} rows for {} targets",
                x.len(),
                y.len()
            )));
        }
        if !(params.learning_rate > 0.0 && params.learning_rate <= 1.0) {
            return Err(training_failed(format!(
                "Invalid learning_rate: {} (should be 0 < lr <= 1)",
                params.learning_rate
            )));
        }

        let n_features = x[0].len();
        check_shape(MODEL_NAME, n_features, x)?;
        let x_matrix = to_matrix(MODEL_NAME, x)?;

        let init_value = y.iter().sum::<f64>() / y.len() as f64;
        let mut fitted = vec![init_value; y.len()];
        let mut stages = Vec::with_capacity(params.n_stages);

        let tree_params = DecisionTreeRegressorParameters::default()
            .with_max_depth(params.max_depth)
            .with_min_samples_leaf(params.min_samples_leaf);

        for stage in 0..params.n_stages {
            let residuals: Vec<f64> = y.iter().zip(&fitted).map(|(t, f)| t - f).collect();

            let tree = Tree::fit(&x_matrix, &residuals, tree_params.clone())
                .map_err(|e| training_failed(format!("stage {}: {}", stage, e)))?;
            let step = tree
                .predict(&x_matrix)
                .map_err(|e| training_failed(format!("stage {}: {}", stage, e)))?;

            for (f, s) in fitted.iter_mut().zip(step) {
                *f += params.learning_rate * s;
            }
            stages.push(tree);
        }

        let mse = y
            .iter()
            .zip(&fitted)
            .map(|(t, f)| (t - f).powi(2))
            .sum::<f64>()
            / y.len() as f64;
        debug!(
            "Boosted {} stages (lr {}, depth {}), training RMSE {:.4}",
            params.n_stages,
            params.learning_rate,
            params.max_depth,
            mse.sqrt()
        );

        Ok(Self {
            init_value,
            learning_rate: params.learning_rate,
            stages,
            n_features,
        })
    }

    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }
}

impl Regressor for BoostedRegressor {
    fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        check_shape(MODEL_NAME, self.n_features, rows)?;
        let input_matrix = to_matrix(MODEL_NAME, rows)?;

        let mut scores = vec![self.init_value; rows.len()];
        for tree in &self.stages {
            let step = tree
                .predict(&input_matrix)
                .map_err(|e| ModelError::InferenceFailed {
                    model: MODEL_NAME,
                    reason: format!("Prediction failed: {}", e),
                })?;
            for (score, s) in scores.iter_mut().zip(step) {
                *score += self.learning_rate * s;
            }
        }
        Ok(scores)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &'static str {
        MODEL_NAME
    }
}
