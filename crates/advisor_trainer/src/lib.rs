//! Stack Advisor Trainer - Deterministic offline decision tree trainer
//!
//! Fits category encoders and a CART classifier on a labelled dataset and
//! writes both as a canonical JSON artifact pair.

pub mod cart;
pub mod dataset;
pub mod deterministic;
pub mod errors;
pub mod trainer;

use std::path::Path;

pub use cart::{CartBuilder, TreeConfig};
pub use dataset::{Dataset, EncodedDataset, LabeledRow, CSV_HEADER};
pub use deterministic::SplitTieBreaker;
pub use errors::TrainerError;
pub use trainer::{TrainedArtifacts, Trainer, TrainingParams};

/// Train directly from a CSV file using the provided parameters.
pub fn train_from_csv(path: &Path, params: TrainingParams) -> Result<TrainedArtifacts, TrainerError> {
    let dataset = Dataset::from_csv(path).map_err(|err| TrainerError::Dataset(format!("{err:#}")))?;
    Trainer::new(params)?.train(&dataset)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
