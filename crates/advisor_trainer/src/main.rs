//! Stack Advisor Trainer CLI
//!
//! Fits the encoders and classifier, then writes the artifact pair.

use anyhow::{Context, Result};
use clap::Parser;
use stack_advisor_trainer::{Dataset, Trainer, TrainingParams, VERSION};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "advisor-train")]
#[command(author = "Stack Advisor Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train the tech stack recommendation tree", long_about = None)]
struct Args {
    /// Output directory for encoders.json and model.json
    #[arg(short, long, default_value = "artifacts")]
    output: PathBuf,

    /// Labelled CSV dataset (the built-in sample is used when omitted)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Maximum tree depth (unlimited when omitted)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Minimum samples required to split a node
    #[arg(long, default_value = "2")]
    min_samples_split: usize,

    /// Minimum samples per leaf
    #[arg(long, default_value = "1")]
    min_samples_leaf: usize,

    /// Unix timestamp recorded in the model (defaults to SOURCE_DATE_EPOCH, then now)
    #[arg(long)]
    created_at: Option<i64>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Stack Advisor Trainer v{}", VERSION);

    let dataset = match &args.dataset {
        Some(path) => {
            info!("Loading dataset from: {}", path.display());
            Dataset::from_csv(path).context("Failed to load dataset")?
        }
        None => {
            info!("Using built-in sample dataset");
            Dataset::sample()
        }
    };
    info!("Loaded {} labelled rows", dataset.len());

    let params = TrainingParams {
        max_depth: args.max_depth,
        min_samples_split: args.min_samples_split,
        min_samples_leaf: args.min_samples_leaf,
    };

    info!("Training configuration:");
    match params.max_depth {
        Some(depth) => info!("  Max depth: {}", depth),
        None => info!("  Max depth: unlimited"),
    }
    info!("  Min samples per split: {}", params.min_samples_split);
    info!("  Min samples per leaf: {}", params.min_samples_leaf);

    let mut trainer = Trainer::new(params)?;
    if let Some(ts) = args.created_at.or_else(source_date_epoch) {
        trainer = trainer.with_created_at(ts);
    }

    let trained = trainer.train(&dataset)?;

    for (label, code) in trained.encoders.stack.classes.iter().zip(0u32..) {
        info!("  class {}: {}", code, label);
    }
    info!("  Model hash: {}", trained.model.hash_hex()?);

    let paths = trained
        .save(&args.output)
        .with_context(|| format!("Failed to write artifacts to {}", args.output.display()))?;

    info!("✓ Training completed successfully");
    info!("  Encoders: {}", paths.encoders.display());
    info!("  Model: {}", paths.model.display());

    Ok(())
}

fn source_date_epoch() -> Option<i64> {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|value| value.trim().parse().ok())
}
