use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use classifier::{evaluate, EvaluationConfig, SvcModel};
use data_loader::{
    bulk_counts, describe, read_training_table, write_training_table, SourceTables, TrainingRow,
    FEATURE_NAMES,
};
use pipeline::{NumericValue, PredictionRequest};
use server::{PredictionResponse, PredictionService};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// WavePredictor - sea-condition classifier tooling
#[derive(Parser)]
#[command(name = "wave-predictor")]
#[command(about = "Build the wave dataset, inspect it, and query the bulk classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the raw forecast exports into the training table
    BuildDataset {
        /// Directory holding day_forecast.csv, hour_forecast.csv and sea_condition_fact.csv
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Field delimiter of the raw exports
        #[arg(long, default_value = ";")]
        delimiter: char,

        /// Where to write the cleaned dataset
        #[arg(long, default_value = "data/sea_activity_dataset.csv")]
        output: PathBuf,
    },

    /// Print shape, feature statistics and class balance of a dataset
    Explore {
        #[arg(long, default_value = "data/sea_activity_dataset.csv")]
        dataset: PathBuf,
    },

    /// Score a model artifact on a held-out split of the dataset
    Evaluate {
        #[arg(long, default_value = "data/sea_activity_dataset.csv")]
        dataset: PathBuf,

        #[arg(long, env = "WAVE_MODEL_PATH", default_value = "model.json")]
        model: PathBuf,

        /// Fraction of rows held out for testing
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Seed for the split
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Split without keeping class proportions
        #[arg(long)]
        no_stratify: bool,
    },

    /// Predict sea condition and activity for one set of values
    Predict {
        #[arg(long, env = "WAVE_MODEL_PATH", default_value = "model.json")]
        model: PathBuf,

        /// Significant wave height (m)
        #[arg(long)]
        sigheight: f64,

        /// Swell height (m)
        #[arg(long)]
        swellheight: f64,

        /// Wave period (s)
        #[arg(long)]
        period: f64,

        /// Wind speed in knots
        #[arg(long)]
        windspeed: f64,

        /// Wind direction (degrees)
        #[arg(long)]
        winddirdegree: f64,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::BuildDataset {
            data_dir,
            delimiter,
            output,
        } => handle_build_dataset(&data_dir, delimiter, &output)?,
        Commands::Explore { dataset } => handle_explore(&dataset)?,
        Commands::Evaluate {
            dataset,
            model,
            test_size,
            seed,
            no_stratify,
        } => {
            let config = EvaluationConfig {
                test_size,
                seed,
                stratify: !no_stratify,
            };
            handle_evaluate(&dataset, &model, &config)?
        }
        Commands::Predict {
            model,
            sigheight,
            swellheight,
            period,
            windspeed,
            winddirdegree,
        } => {
            let request = PredictionRequest {
                sigheight: Some(NumericValue::Number(sigheight)),
                swellheight: Some(NumericValue::Number(swellheight)),
                period: Some(NumericValue::Number(period)),
                windspeed: Some(NumericValue::Number(windspeed)),
                winddirdegree: Some(NumericValue::Number(winddirdegree)),
            };
            handle_predict(&model, &request)?
        }
    }

    Ok(())
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

fn load_dataset(path: &Path) -> Result<Vec<TrainingRow>> {
    read_training_table(path).with_context(|| format!("Failed to read dataset {}", path.display()))
}

/// Handle the 'build-dataset' command
fn handle_build_dataset(data_dir: &Path, delimiter: char, output: &Path) -> Result<()> {
    let start = Instant::now();

    let tables = SourceTables::load_from_dir(data_dir, delimiter_byte(delimiter)?)
        .context("Failed to load forecast exports")?;
    let rows = tables
        .build_training_table()
        .context("Failed to build training table")?;

    write_training_table(output, &rows)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Built dataset in {:?}", start.elapsed());

    println!(
        "{} Saved {} rows to {}",
        "✓".green(),
        rows.len(),
        output.display()
    );
    print_bulk_counts(&rows);
    Ok(())
}

/// Handle the 'explore' command
fn handle_explore(dataset: &Path) -> Result<()> {
    let rows = load_dataset(dataset)?;

    println!("{}", "Dataset overview:".bold().blue());
    println!("Shape (rows, columns): ({}, {})", rows.len(), FEATURE_NAMES.len() + 1);
    println!("Columns: {}, bulk", FEATURE_NAMES.join(", "));

    println!();
    println!("{}", "Feature statistics:".bold().blue());
    println!(
        "{:<14} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for s in describe(&rows) {
        println!(
            "{:<14} {:>7} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3}",
            s.name, s.count, s.mean, s.std, s.min, s.p25, s.median, s.p75, s.max
        );
    }

    println!();
    print_bulk_counts(&rows);
    Ok(())
}

/// Handle the 'evaluate' command
fn handle_evaluate(dataset: &Path, model_path: &Path, config: &EvaluationConfig) -> Result<()> {
    let rows = load_dataset(dataset)?;
    let model = SvcModel::load(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

    let report = evaluate(&model, &rows, config).context("Evaluation failed")?;

    println!(
        "{}",
        format!(
            "Evaluation on {} held-out rows ({} not used):",
            report.test_size, report.train_size
        )
        .bold()
        .blue()
    );
    print!("{}", report);
    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(model_path: &Path, request: &PredictionRequest) -> Result<()> {
    let service = PredictionService::from_artifact(model_path)?;
    let response = service.predict(request).context("Prediction failed")?;
    print_prediction(&response);
    Ok(())
}

fn print_bulk_counts(rows: &[TrainingRow]) {
    println!("{}", "Bulk value counts:".bold().blue());
    for count in bulk_counts(rows) {
        println!(
            "{}{}: {} ({:.1}%)",
            "• ".cyan(),
            count.bulk,
            count.count,
            count.fraction * 100.0
        );
    }
}

fn print_prediction(response: &PredictionResponse) {
    println!(
        "{} {}",
        "Sea condition:".bold().blue(),
        response.sea_condition
    );
    println!("{}Bulk class: {}", "• ".green(), response.bulk_class);
    println!("{}Activity: {}", "• ".green(), response.activity);
    println!("   {}", response.message);
}
