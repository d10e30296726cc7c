use crate::domain::errors::ModelError;

/// Interface for the regression models behind the scoring pipeline
pub trait Regressor: Send + Sync {
    /// Predict one value per row. Every row must have `n_features()` values.
    fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError>;

    /// Predict a single row
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        self.predict_batch(&[features.to_vec()])?
            .first()
            .copied()
            .ok_or_else(|| ModelError::InferenceFailed {
                model: self.name(),
                reason: "No prediction returned".to_string(),
            })
    }

    /// Number of input features the model was fitted on
    fn n_features(&self) -> usize;

    /// Get model name/type
    fn name(&self) -> &'static str;
}

/// Reject rows whose width does not match the fitted model.
pub(crate) fn check_shape(
    model: &'static str,
    expected: usize,
    rows: &[Vec<f64>],
) -> Result<(), ModelError> {
    match rows.iter().find(|r| r.len() != expected) {
        Some(bad) => Err(ModelError::FeatureShape {
            model,
            expected,
            actual: bad.len(),
        }),
        None => Ok(()),
    }
}
