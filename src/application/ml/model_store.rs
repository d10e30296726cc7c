use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use super::explainer::ShapleyExplainer;
use super::gradient_boosted::{BoostedRegressor, BoostingParams};
use super::predictor::Regressor;
use super::scaler::FeatureScaler;
use super::smartcore_predictor::{ForestParams, ForestRegressor};
use super::synthetic::SyntheticDataset;
use crate::domain::errors::ModelError;
use crate::domain::ml::{ForecastFeatures, INVESTMENT_FEATURE_NAMES, InvestmentFeatures};
use crate::infrastructure::persistence::{
    INVESTMENT_MODEL_FILE, ModelRepository, PRICE_MODEL_FILE, SCALER_FILE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    pub n_samples: usize,
    pub seed: u64,
    pub forest: ForestParams,
    pub boosting: BoostingParams,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            seed: 42,
            forest: ForestParams::default(),
            boosting: BoostingParams::default(),
        }
    }
}

/// Fitted models behind the forecast and investment endpoints. Immutable
/// once built; shared across requests behind an `Arc`.
#[derive(Debug)]
pub struct TrainedModelBundle {
    price_model: BoostedRegressor,
    investment_model: ForestRegressor,
    scaler: FeatureScaler,
    explainer: ShapleyExplainer,
}

impl TrainedModelBundle {
    pub fn train(params: &TrainingParams) -> Result<Self, ModelError> {
        let dataset = SyntheticDataset::generate(params.n_samples, params.seed);
        Self::train_on(&dataset, params)
    }

    pub fn train_on(dataset: &SyntheticDataset, params: &TrainingParams) -> Result<Self, ModelError> {
        let (x_price, y_price) = dataset.forecast_matrix();
        let price_model = BoostedRegressor::fit(&x_price, &y_price, &params.boosting)?;

        let (x_invest, y_invest) = dataset.investment_matrix();
        let forest = ForestParams {
            seed: params.seed,
            ..params.forest
        };
        let investment_model = ForestRegressor::fit(&x_invest, &y_invest, &forest)?;
        let scaler = FeatureScaler::fit(&x_invest)?;

        Self::from_parts(price_model, investment_model, scaler)
    }

    pub fn from_parts(
        price_model: BoostedRegressor,
        investment_model: ForestRegressor,
        scaler: FeatureScaler,
    ) -> Result<Self, ModelError> {
        if scaler.means().len() != investment_model.n_features() {
            return Err(ModelError::FeatureShape {
                model: "scaler",
                expected: investment_model.n_features(),
                actual: scaler.means().len(),
            });
        }
        let explainer = ShapleyExplainer::new(scaler.means().to_vec())?;
        Ok(Self {
            price_model,
            investment_model,
            scaler,
            explainer,
        })
    }

    /// Point estimate of the 12-month price change, in percent.
    pub fn predict_price_change(&self, features: &ForecastFeatures) -> Result<f64, ModelError> {
        self.price_model.predict(&features.to_vector())
    }

    /// Raw investment score; callers clamp it to the 0..=100 scale.
    pub fn predict_investment_score(
        &self,
        features: &InvestmentFeatures,
    ) -> Result<f64, ModelError> {
        self.investment_model.predict(&features.to_vector())
    }

    /// Per-feature contribution to the investment score, in feature order.
    pub fn explain_investment(
        &self,
        features: &InvestmentFeatures,
    ) -> Result<Vec<(&'static str, f64)>, ModelError> {
        let phi = self
            .explainer
            .explain(&self.investment_model, &features.to_vector())?;
        Ok(INVESTMENT_FEATURE_NAMES.iter().copied().zip(phi).collect())
    }

    pub fn price_model(&self) -> &BoostedRegressor {
        &self.price_model
    }

    pub fn investment_model(&self) -> &ForestRegressor {
        &self.investment_model
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    pub fn explainer(&self) -> &ShapleyExplainer {
        &self.explainer
    }
}

/// Loads the model bundle from its artifact directory, training and
/// persisting a fresh one when the artifacts are absent or unusable.
pub struct ModelStore {
    repo: ModelRepository,
    params: TrainingParams,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>, params: TrainingParams) -> Self {
        Self {
            repo: ModelRepository::new(dir),
            params,
        }
    }

    pub fn load_or_train(&self) -> Result<TrainedModelBundle, ModelError> {
        if !self.repo.exists(PRICE_MODEL_FILE) {
            info!(
                "No trained models in {:?}, training from synthetic data",
                self.repo.dir()
            );
            return self.train_and_save();
        }

        match self.load() {
            Ok(bundle) => {
                info!("Loaded trained models from {:?}", self.repo.dir());
                Ok(bundle)
            }
            Err(e) => {
                warn!("Could not load models ({}), retraining", e);
                self.train_and_save()
            }
        }
    }

    pub fn load(&self) -> Result<TrainedModelBundle, ModelError> {
        let price_model: BoostedRegressor = self.repo.read(PRICE_MODEL_FILE)?;
        let investment_model: ForestRegressor = self.repo.read(INVESTMENT_MODEL_FILE)?;
        let scaler: FeatureScaler = self.repo.read(SCALER_FILE)?;
        TrainedModelBundle::from_parts(price_model, investment_model, scaler)
    }

    pub fn save(&self, bundle: &TrainedModelBundle) -> Result<(), ModelError> {
        self.repo.write(PRICE_MODEL_FILE, bundle.price_model())?;
        self.repo.write(INVESTMENT_MODEL_FILE, bundle.investment_model())?;
        self.repo.write(SCALER_FILE, bundle.scaler())?;
        info!("Saved trained models to {:?}", self.repo.dir());
        Ok(())
    }

    fn train_and_save(&self) -> Result<TrainedModelBundle, ModelError> {
        let started = Instant::now();
        let bundle = TrainedModelBundle::train(&self.params)?;
        info!(
            "Trained models on {} synthetic samples (seed {}) in {:?}",
            self.params.n_samples,
            self.params.seed,
            started.elapsed()
        );

        if let Err(e) = self.save(&bundle) {
            warn!("Keeping in-memory models, persisting failed: {}", e);
        }
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::FEATURE_COUNT;

    fn small_params() -> TrainingParams {
        TrainingParams {
            n_samples: 200,
            seed: 11,
            forest: ForestParams {
                n_trees: 10,
                max_depth: 6,
                ..Default::default()
            },
            boosting: BoostingParams {
                n_stages: 20,
                ..Default::default()
            },
        }
    }

    fn luxury() -> InvestmentFeatures {
        InvestmentFeatures::from_array([35.0, 3.2, 15.0, 0.8, 1.5, 2.0, 120000.0, 200.0, 0.12])
    }

    #[test]
    fn test_explanations_sum_to_prediction_gap() {
        let bundle = TrainedModelBundle::train(&small_params()).unwrap();
        let features = luxury();

        let attributions = bundle.explain_investment(&features).unwrap();
        assert_eq!(attributions.len(), FEATURE_COUNT);
        assert_eq!(attributions[0].0, "price_to_rent_ratio");

        let total: f64 = attributions.iter().map(|(_, v)| v).sum();
        let gap = bundle.predict_investment_score(&features).unwrap()
            - bundle
                .explainer()
                .expected_value(bundle.investment_model())
                .unwrap();
        assert!((total - gap).abs() < 1e-6, "sum {} vs gap {}", total, gap);
    }

    #[test]
    fn test_training_is_deterministic() {
        let a = TrainedModelBundle::train(&small_params()).unwrap();
        let b = TrainedModelBundle::train(&small_params()).unwrap();

        let f = ForecastFeatures::from_array([70000.0, 1.5, 2.5, 4.0, 30.0, 7.0, 300.0, 520.0, 0.0]);
        assert_eq!(
            a.predict_price_change(&f).unwrap(),
            b.predict_price_change(&f).unwrap()
        );
        assert_eq!(
            a.predict_investment_score(&luxury()).unwrap(),
            b.predict_investment_score(&luxury()).unwrap()
        );
    }

    #[test]
    fn test_scaler_width_must_match_forest() {
        let bundle = TrainedModelBundle::train(&small_params()).unwrap();
        let narrow = FeatureScaler::fit(&[vec![1.0], vec![2.0]]).unwrap();

        let json = serde_json::to_string(bundle.investment_model()).unwrap();
        let forest: ForestRegressor = serde_json::from_str(&json).unwrap();
        let json = serde_json::to_string(bundle.price_model()).unwrap();
        let boosted: BoostedRegressor = serde_json::from_str(&json).unwrap();

        assert!(matches!(
            TrainedModelBundle::from_parts(boosted, forest, narrow),
            Err(ModelError::FeatureShape { .. })
        ));
    }
}
