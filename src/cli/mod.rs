//! Command-line interface
//!
//! `train` mirrors the classic invocation surface: a positional optimizer
//! variant (0, 1, or 2) and a positional normalization flag (1 enables
//! pooled z-score normalization, anything else disables it).

use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::data;
use crate::estimator::{ensure_readable, LogisticRegression};
use crate::training::{OptimizerKind, TrainConfig};

#[derive(Parser)]
#[command(name = "logreg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Binary logistic regression trainer")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fit a classifier and score it on a held-out set
    Train(TrainArgs),

    /// Show shape information for a CSV dataset
    Info {
        /// Input data file
        data: PathBuf,
    },
}

#[derive(Args)]
pub struct TrainArgs {
    /// Optimizer variant: 0 batch gradient, 1 Newton-Raphson, 2 regularized batch gradient
    pub variant: String,

    /// Pass 1 to apply pooled z-score normalization; any other value disables it
    pub normalize: String,

    /// Training data CSV (must contain a `y` label column)
    #[arg(long, default_value = "logistic_regression_train.csv")]
    pub train_data: String,

    /// Test data CSV (must contain a `y` label column)
    #[arg(long, default_value = "logistic_regression_test.csv")]
    pub test_data: String,

    /// Learning rate for the gradient variants
    #[arg(long, default_value_t = 0.003)]
    pub learning_rate: f64,

    /// Fixed iteration count
    #[arg(long, default_value_t = 10_000)]
    pub iterations: usize,

    /// L2 strength for the regularized variant
    #[arg(long, default_value_t = 9.2)]
    pub lambda: f64,

    /// Seed for the coefficient initialization
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory receiving the prediction dump
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Suppress periodic per-iteration diagnostics
    #[arg(long)]
    pub quiet: bool,
}

fn kv(key: &str, val: &str) {
    println!("  {} {}", key.dimmed(), val);
}

pub fn cmd_train(args: &TrainArgs) -> anyhow::Result<()> {
    let kind: OptimizerKind = args.variant.parse()?;
    let normalize = args.normalize == "1";

    println!("{}", "logistic regression".bold());
    kv("optimizer:", kind.name());
    kv("normalization:", if normalize { "pooled z-score" } else { "off" });
    kv("train data:", &args.train_data);
    kv("test data:", &args.test_data);
    kv("learning rate:", &args.learning_rate.to_string());
    kv("iterations:", &args.iterations.to_string());
    if kind == OptimizerKind::RegularizedGradient {
        kv("lambda:", &args.lambda.to_string());
    }

    ensure_readable(&args.train_data)?;
    ensure_readable(&args.test_data)?;

    let mut config = TrainConfig::default()
        .with_learning_rate(args.learning_rate)
        .with_num_iter(args.iterations)
        .with_lambda(args.lambda)
        .with_verbose(!args.quiet);
    if let Some(seed) = args.seed {
        config = config.with_random_state(seed);
    }

    let mut estimator =
        LogisticRegression::new(config).with_output_dir(args.output_dir.clone());
    estimator.load(&args.train_data, &args.test_data)?;
    if normalize {
        estimator.normalize()?;
    }

    let beta = estimator.train(kind)?;
    println!();
    kv("coefficients:", &format!("{:?}", beta.to_vec()));
    kv(
        "training avg logL:",
        &estimator.training_log_likelihood(&beta)?.to_string(),
    );

    let accuracy = estimator.predict(&beta)?;
    kv("predictions:", &estimator.output_path().display().to_string());
    println!();
    println!("  {} test accuracy: {:.4}", "✓".green(), accuracy);

    Ok(())
}

pub fn cmd_info(path: &PathBuf) -> anyhow::Result<()> {
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("non-UTF8 path"))?;
    let df = data::read_csv(path_str)?;

    println!("{}", path_str.bold());
    kv("rows:", &df.height().to_string());
    kv("columns:", &df.width().to_string());
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    kv("names:", &names.join(", "));

    Ok(())
}
