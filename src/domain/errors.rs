use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by request validation, before any model is touched
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Address must be at least {min_len} characters")]
    AddressTooShort { min_len: usize },

    #[error("Invalid rental input '{field}': {reason}")]
    InvalidRentalInput { field: &'static str, reason: String },
}

/// Errors related to model artifacts, training and inference
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model artifact not found at {path:?}")]
    ArtifactMissing { path: PathBuf },

    #[error("Failed to read model artifact {path:?}: {reason}")]
    ArtifactUnreadable { path: PathBuf, reason: String },

    #[error("Failed to persist model artifact {path:?}: {reason}")]
    PersistFailed { path: PathBuf, reason: String },

    #[error("Training failed for {model}: {reason}")]
    TrainingFailed { model: &'static str, reason: String },

    #[error("Inference failed for {model}: {reason}")]
    InferenceFailed { model: &'static str, reason: String },

    #[error("Feature vector has {actual} values, {model} expects {expected}")]
    FeatureShape {
        model: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Errors surfaced by the scoring pipeline to the request boundary
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
