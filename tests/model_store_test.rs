mod common;

use std::fs;

use propcast::application::ml::{ModelStore, Regressor, TrainedModelBundle, TrainingParams};
use propcast::domain::market::{derive_forecast_features, derive_investment_profile};
use propcast::domain::ml::INVESTMENT_FEATURE_NAMES;
use propcast::infrastructure::persistence::{INVESTMENT_MODEL_FILE, PRICE_MODEL_FILE, SCALER_FILE};
use tempfile::tempdir;

#[test]
fn test_first_start_trains_and_persists() {
    let dir = tempdir().unwrap();
    let store = ModelStore::new(dir.path().join("models"), common::small_params());

    let trained = store.load_or_train().unwrap();
    for name in [PRICE_MODEL_FILE, INVESTMENT_MODEL_FILE, SCALER_FILE] {
        assert!(dir.path().join("models").join(name).is_file(), "{} missing", name);
    }

    let loaded = store.load().unwrap();
    let forecast = derive_forecast_features("Downtown LA");
    let profile = derive_investment_profile("Riverside, CA");

    assert_eq!(
        trained.predict_price_change(&forecast).unwrap(),
        loaded.predict_price_change(&forecast).unwrap()
    );
    assert_eq!(
        trained.predict_investment_score(&profile.features).unwrap(),
        loaded.predict_investment_score(&profile.features).unwrap()
    );
    assert_eq!(trained.scaler(), loaded.scaler());
    assert_eq!(
        trained.explain_investment(&profile.features).unwrap(),
        loaded.explain_investment(&profile.features).unwrap()
    );
}

#[test]
fn test_corrupt_artifact_triggers_retraining() {
    let dir = tempdir().unwrap();
    let store = ModelStore::new(dir.path(), common::small_params());
    let original = store.load_or_train().unwrap();

    fs::write(dir.path().join(SCALER_FILE), "not json").unwrap();
    assert!(store.load().is_err());

    // Retrains with the same seed and rewrites the broken artifact
    let recovered = store.load_or_train().unwrap();
    assert!(store.load().is_ok());

    let profile = derive_investment_profile("Malibu");
    assert_eq!(
        original.predict_investment_score(&profile.features).unwrap(),
        recovered.predict_investment_score(&profile.features).unwrap()
    );
}

#[test]
fn test_unwritable_directory_keeps_in_memory_models() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "a file where the model directory should be").unwrap();

    let store = ModelStore::new(&blocker, common::small_params());
    let bundle = store.load_or_train().unwrap();
    assert_eq!(bundle.investment_model().n_features(), 9);
}

/// Attribution of `feature` when it alone moves `sds` standard deviations off
/// the reference point; every other feature stays at its mean.
fn attribution_off_mean(bundle: &TrainedModelBundle, feature: &str, sds: f64) -> f64 {
    let idx = INVESTMENT_FEATURE_NAMES
        .iter()
        .position(|name| *name == feature)
        .unwrap();
    let mut row = bundle.explainer().reference().to_vec();
    row[idx] += sds * bundle.scaler().stds()[idx];

    let phi = bundle
        .explainer()
        .explain(bundle.investment_model(), &row)
        .unwrap();
    for (j, value) in phi.iter().enumerate() {
        if j != idx {
            assert!(value.abs() < 1e-9, "{} leaked {}", INVESTMENT_FEATURE_NAMES[j], value);
        }
    }
    phi[idx]
}

#[test]
fn test_attribution_signs_at_default_training() {
    let bundle = TrainedModelBundle::train(&TrainingParams::default()).unwrap();

    for feature in ["rental_yield", "employment_growth", "population_growth"] {
        let up = attribution_off_mean(&bundle, feature, 2.5);
        let down = attribution_off_mean(&bundle, feature, -2.5);
        assert!(up > 0.0, "{} +2.5sd gave {}", feature, up);
        assert!(down < 0.0, "{} -2.5sd gave {}", feature, down);
    }

    let up = attribution_off_mean(&bundle, "market_volatility", 2.5);
    let down = attribution_off_mean(&bundle, "market_volatility", -2.5);
    assert!(up < 0.0, "market_volatility +2.5sd gave {}", up);
    assert!(down > 0.0, "market_volatility -2.5sd gave {}", down);

    // The mean ratio already sits below 25, so moving up widens the deviation
    let ratio = attribution_off_mean(&bundle, "price_to_rent_ratio", 2.5);
    assert!(ratio < 0.0, "price_to_rent_ratio +2.5sd gave {}", ratio);
}
