//! Exact Shapley attribution for a single prediction.
//!
//! Every coalition of features is evaluated against a fixed reference point
//! (the training means): features inside the coalition take the explained
//! row's values, the rest take the reference values. With M features this
//! costs one batched prediction of 2^M rows.
//!
//! The attributions satisfy efficiency: they sum to
//! `f(row) - f(reference)`.

use serde::{Deserialize, Serialize};

use super::predictor::Regressor;
use crate::domain::errors::ModelError;

/// Above this width the 2^M coalition batch is no longer practical.
pub const MAX_EXACT_FEATURES: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapleyExplainer {
    reference: Vec<f64>,
}

impl ShapleyExplainer {
    pub fn new(reference: Vec<f64>) -> Result<Self, ModelError> {
        if reference.is_empty() || reference.len() > MAX_EXACT_FEATURES {
            return Err(ModelError::TrainingFailed {
                model: "explainer",
                reason: format!(
                    "reference must have 1..={} features, got {}",
                    MAX_EXACT_FEATURES,
                    reference.len()
                ),
            });
        }
        Ok(Self { reference })
    }

    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    /// Model output at the reference point.
    pub fn expected_value<M: Regressor + ?Sized>(&self, model: &M) -> Result<f64, ModelError> {
        model.predict(&self.reference)
    }

    /// One attribution per feature, in feature order.
    pub fn explain<M: Regressor + ?Sized>(
        &self,
        model: &M,
        row: &[f64],
    ) -> Result<Vec<f64>, ModelError> {
        let m = self.reference.len();
        if row.len() != m {
            return Err(ModelError::FeatureShape {
                model: "explainer",
                expected: m,
                actual: row.len(),
            });
        }

        let n_coalitions = 1usize << m;
        let rows: Vec<Vec<f64>> = (0..n_coalitions)
            .map(|mask| {
                (0..m)
                    .map(|j| {
                        if mask & (1 << j) != 0 {
                            row[j]
                        } else {
                            self.reference[j]
                        }
                    })
                    .collect()
            })
            .collect();
        let values = model.predict_batch(&rows)?;

        let weights = coalition_weights(m);
        let mut phi = vec![0.0; m];
        for (mask, value) in values.iter().enumerate() {
            let size = mask.count_ones() as usize;
            for (i, contribution) in phi.iter_mut().enumerate() {
                if mask & (1 << i) == 0 {
                    *contribution += weights[size] * (values[mask | (1 << i)] - value);
                }
            }
        }
        Ok(phi)
    }
}

/// |S|! (M - |S| - 1)! / M! for every coalition size |S| < M.
fn coalition_weights(m: usize) -> Vec<f64> {
    let factorial = |n: usize| (1..=n).map(|k| k as f64).product::<f64>();
    let total = factorial(m);
    (0..m)
        .map(|s| factorial(s) * factorial(m - s - 1) / total)
        .collect()
}
