use super::predictor::{Regressor, check_shape};
use crate::domain::errors::ModelError;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::debug;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

const MODEL_NAME: &str = "SmartCore Random Forest";

/// Hyper-parameters of the investment-score forest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

pub(crate) fn to_matrix(model: &'static str, rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>, ModelError> {
    DenseMatrix::from_2d_vec(&rows.to_vec()).map_err(|e| ModelError::InferenceFailed {
        model,
        reason: format!("Matrix creation failed: {}", e),
    })
}

/// Random forest regressor over a fixed-width feature vector.
#[derive(Debug, Serialize, Deserialize)]
pub struct ForestRegressor {
    model: Forest,
    n_features: usize,
}

impl ForestRegressor {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &ForestParams) -> Result<Self, ModelError> {
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        check_shape(MODEL_NAME, n_features, x)?;

        let x_matrix = to_matrix(MODEL_NAME, x)?;
        let forest_params = RandomForestRegressorParameters::default()
            .with_n_trees(params.n_trees)
            .with_max_depth(params.max_depth)
            .with_min_samples_split(params.min_samples_split)
            .with_seed(params.seed);

        debug!(
            "Training Random Forest Regressor (Trees: {}, Depth: {}, MinSplit: {}) on {} samples",
            params.n_trees,
            params.max_depth,
            params.min_samples_split,
            x.len()
        );

        let model = RandomForestRegressor::fit(&x_matrix, &y.to_vec(), forest_params).map_err(
            |e| ModelError::TrainingFailed {
                model: MODEL_NAME,
                reason: e.to_string(),
            },
        )?;

        Ok(Self { model, n_features })
    }
}

impl Regressor for ForestRegressor {
    fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        check_shape(MODEL_NAME, self.n_features, rows)?;
        let input_matrix = to_matrix(MODEL_NAME, rows)?;
        self.model
            .predict(&input_matrix)
            .map_err(|e| ModelError::InferenceFailed {
                model: MODEL_NAME,
                reason: format!("Prediction failed: {}", e),
            })
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &'static str {
        MODEL_NAME
    }
}
