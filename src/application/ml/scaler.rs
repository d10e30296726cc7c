use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};

use crate::domain::errors::ModelError;

/// Per-column mean and standard deviation of a training matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl FeatureScaler {
    pub fn fit(x: &[Vec<f64>]) -> Result<Self, ModelError> {
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        if x.len() < 2 || n_features == 0 {
            return Err(ModelError::TrainingFailed {
                model: "scaler",
                reason: format!("need at least 2 rows, got {}", x.len()),
            });
        }

        let mut means = Vec::with_capacity(n_features);
        let mut stds = Vec::with_capacity(n_features);
        for col in 0..n_features {
            let data = Data::new(x.iter().map(|row| row[col]).collect::<Vec<f64>>());
            means.push(data.mean().unwrap_or(0.0));
            stds.push(data.std_dev().unwrap_or(0.0));
        }

        Ok(Self { means, stds })
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    /// Standardize a row; constant columns map to 0.
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(v, (m, s))| if *s > 0.0 { (v - m) / s } else { 0.0 })
            .collect()
    }
}
