//! JSON artifacts for fitted models.
//!
//! Each artifact is a single file in the model directory. Writes go to a
//! temp file first and are renamed into place, so a crash never leaves a
//! half-written artifact behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::errors::ModelError;

pub const PRICE_MODEL_FILE: &str = "price_model.json";
pub const INVESTMENT_MODEL_FILE: &str = "investment_model.json";
pub const SCALER_FILE: &str = "scaler.json";

pub struct ModelRepository {
    dir: PathBuf,
}

impl ModelRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, ModelError> {
        let path = self.path_of(name);
        if !path.is_file() {
            return Err(ModelError::ArtifactMissing { path });
        }

        let file = File::open(&path).map_err(|e| ModelError::ArtifactUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ModelError::ArtifactUnreadable {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!("Loaded artifact {:?}", path);
        Ok(value)
    }

    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<(), ModelError> {
        let path = self.path_of(name);
        let persist_failed = |reason: String| ModelError::PersistFailed {
            path: path.clone(),
            reason,
        };

        fs::create_dir_all(&self.dir).map_err(|e| persist_failed(e.to_string()))?;

        let temp_path = path.with_extension("tmp");
        let file = File::create(&temp_path).map_err(|e| persist_failed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, value).map_err(|e| persist_failed(e.to_string()))?;
        writer.flush().map_err(|e| persist_failed(e.to_string()))?;
        drop(writer);

        fs::rename(&temp_path, &path).map_err(|e| persist_failed(e.to_string()))?;

        debug!("Saved artifact {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let repo = ModelRepository::new(dir.path().join("models"));
        assert!(!repo.exists(SCALER_FILE));

        repo.write(SCALER_FILE, &vec![1.5, 2.5]).unwrap();
        assert!(repo.exists(SCALER_FILE));
        assert!(!repo.path_of(SCALER_FILE).with_extension("tmp").exists());

        let back: Vec<f64> = repo.read(SCALER_FILE).unwrap();
        assert_eq!(back, vec![1.5, 2.5]);
    }

    #[test]
    fn test_missing_and_corrupt_artifacts() {
        let dir = tempdir().unwrap();
        let repo = ModelRepository::new(dir.path());

        assert!(matches!(
            repo.read::<Vec<f64>>(PRICE_MODEL_FILE),
            Err(ModelError::ArtifactMissing { .. })
        ));

        fs::write(repo.path_of(PRICE_MODEL_FILE), "{not json").unwrap();
        assert!(matches!(
            repo.read::<Vec<f64>>(PRICE_MODEL_FILE),
            Err(ModelError::ArtifactUnreadable { .. })
        ));
    }
}
