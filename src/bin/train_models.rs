//! Train the forecast and investment models on synthetic data, report
//! held-out accuracy, and persist the artifacts the server loads.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use propcast::application::ml::synthetic::SyntheticDataset;
use propcast::application::ml::{ModelStore, Regressor, TrainedModelBundle};
use propcast::config::ModelEnvConfig;
use propcast::domain::market::derive_investment_profile;
use propcast::domain::ml::{INVESTMENT_FEATURE_NAMES, display_name};
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory for the model artifacts (default: MODEL_DIR or data/models)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Number of synthetic samples (default: TRAINING_SAMPLES or 1000)
    #[arg(long)]
    samples: Option<usize>,

    /// RNG seed for data generation and the forest (default: TRAINING_SEED or 42)
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the generated dataset to this CSV file
    #[arg(long)]
    export_data: Option<PathBuf>,

    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Evaluate only; do not write artifacts
    #[arg(long)]
    no_save: bool,
}

struct Accuracy {
    rmse: f64,
    mae: f64,
    r2: f64,
}

fn accuracy(predictions: &[f64], actuals: &[f64]) -> Accuracy {
    let n = actuals.len().max(1) as f64;
    let mean = actuals.iter().sum::<f64>() / n;
    let sse: f64 = predictions
        .iter()
        .zip(actuals)
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    let sae: f64 = predictions.iter().zip(actuals).map(|(p, t)| (p - t).abs()).sum();
    let sst: f64 = actuals.iter().map(|t| (t - mean).powi(2)).sum();

    Accuracy {
        rmse: (sse / n).sqrt(),
        mae: sae / n,
        r2: if sst > 0.0 { 1.0 - sse / sst } else { 0.0 },
    }
}

fn print_accuracy(label: &str, acc: &Accuracy) {
    println!(
        "  {:<18} RMSE {:>8.4}   MAE {:>8.4}   R² {:>7.4}",
        label, acc.rmse, acc.mae, acc.r2
    );
}

fn export_csv(dataset: &SyntheticDataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut wtr = csv::Writer::from_writer(BufWriter::new(file));
    for record in dataset.records() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();
    let mut config = ModelEnvConfig::from_env().context("Failed to load model config")?;
    if let Some(dir) = args.output_dir {
        config.model_dir = dir;
    }
    if let Some(samples) = args.samples {
        config.training_samples = samples;
    }
    if let Some(seed) = args.seed {
        config.training_seed = seed;
    }
    config.validate()?;
    let params = config.training_params();

    let dataset = SyntheticDataset::generate(params.n_samples, params.seed);
    info!(
        "Generated {} synthetic samples (seed {})",
        dataset.len(),
        params.seed
    );

    if let Some(path) = &args.export_data {
        export_csv(&dataset, path)?;
        info!("Exported training data to {:?}", path);
    }

    // Held-out evaluation
    let (train, test) = dataset.split(args.test_fraction);
    if !test.is_empty() {
        let held_out = TrainedModelBundle::train_on(&train, &params)?;

        let (x_price, y_price) = test.forecast_matrix();
        let (x_invest, y_invest) = test.investment_matrix();
        let price_pred = held_out.price_model().predict_batch(&x_price)?;
        let invest_pred = held_out.investment_model().predict_batch(&x_invest)?;

        println!(
            "\nHeld-out accuracy ({} train / {} test rows):",
            train.len(),
            test.len()
        );
        print_accuracy("Price change 12m", &accuracy(&price_pred, &y_price));
        print_accuracy("Investment score", &accuracy(&invest_pred, &y_invest));
    }

    // Final models use every row
    let bundle = TrainedModelBundle::train_on(&dataset, &params)?;

    println!("\nAddress profiles against the training distribution (z-scores):");
    for address in ["Beverly Hills, CA", "Riverside, CA", "Sacramento, CA"] {
        let profile = derive_investment_profile(address);
        let z = bundle.scaler().transform(&profile.features.to_vector());
        let score = bundle.predict_investment_score(&profile.features)?;
        println!("  {} -> score {:.1}", address, score);
        for (name, value) in INVESTMENT_FEATURE_NAMES.iter().zip(z) {
            println!("      {:<22} {:+.2}", display_name(name), value);
        }
    }

    if args.no_save {
        info!("--no-save given, artifacts not written");
        return Ok(());
    }

    ModelStore::new(config.model_dir.clone(), params).save(&bundle)?;
    println!("\nSaved models to {:?}", config.model_dir);
    Ok(())
}
