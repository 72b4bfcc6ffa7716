//! Decision tree trainer
//!
//! Fits label encoders, encodes the dataset, grows a single unpruned CART
//! classifier and stamps the model with the hash of its encoders.

use stack_advisor_core::{
    save_artifacts, ArtifactPaths, Artifacts, ClassifierModel, EncoderSet, FitParams,
    ModelMetadata, FEATURE_COUNT,
};
use std::path::Path;
use tracing::{debug, info};

use crate::cart::{CartBuilder, TreeConfig};
use crate::dataset::Dataset;
use crate::errors::TrainerError;

/// Training configuration; defaults match an unregularized classifier
pub type TrainingParams = FitParams;

/// Encoders and model produced by one training run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainedArtifacts {
    pub encoders: EncoderSet,
    pub model: ClassifierModel,
}

impl TrainedArtifacts {
    /// Write the pair to `dir`, overwriting any previous artifacts
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<ArtifactPaths, TrainerError> {
        Ok(save_artifacts(dir, &self.encoders, &self.model)?)
    }

    /// Hand the pair straight to a predictor without touching disk
    pub fn into_artifacts(self) -> Result<Artifacts, TrainerError> {
        Ok(Artifacts::new(self.encoders, self.model)?)
    }
}

/// Decision tree trainer
pub struct Trainer {
    params: TrainingParams,
    created_at: Option<i64>,
}

impl Trainer {
    pub fn new(params: TrainingParams) -> Result<Self, TrainerError> {
        validate_params(&params)?;
        Ok(Self {
            params,
            created_at: None,
        })
    }

    /// Pin the recorded training timestamp for reproducible artifacts
    pub fn with_created_at(mut self, unix_secs: i64) -> Self {
        self.created_at = Some(unix_secs);
        self
    }

    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    /// Train a classifier on the given dataset
    pub fn train(&self, dataset: &Dataset) -> Result<TrainedArtifacts, TrainerError> {
        if dataset.is_empty() {
            return Err(TrainerError::Dataset("dataset is empty".to_string()));
        }

        let encoders = dataset.fit_encoders();
        info!(
            project_types = encoders.project_type.len(),
            perf_needs = encoders.perf_need.len(),
            experiences = encoders.experience.len(),
            stacks = encoders.stack.len(),
            "Fitted label encoders"
        );

        let encoded = dataset.encode(&encoders)?;
        for (i, (min, max)) in Dataset::feature_stats(&encoded).iter().enumerate() {
            debug!("  Feature {}: min={}, max={}", i, min, max);
        }

        let tree_config = TreeConfig {
            max_depth: self.params.max_depth,
            min_samples_split: self.params.min_samples_split,
            min_samples_leaf: self.params.min_samples_leaf,
        };
        let tree =
            CartBuilder::new(&encoded.features, &encoded.targets, encoded.n_classes, tree_config)
                .build();

        tree.validate(FEATURE_COUNT, encoded.n_classes)
            .map_err(TrainerError::Training)?;

        info!(
            nodes = tree.nodes.len(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "Tree built"
        );

        let metadata = ModelMetadata {
            created_at: self
                .created_at
                .unwrap_or_else(|| chrono::Utc::now().timestamp()),
            training_rows: dataset.len(),
            max_depth_reached: tree.depth(),
            encoders_hash: encoders.hash_hex()?,
            params: self.params.clone(),
        };

        let model = ClassifierModel::new(tree, FEATURE_COUNT, encoded.n_classes, metadata);
        model.validate()?;

        Ok(TrainedArtifacts { encoders, model })
    }
}

fn validate_params(params: &TrainingParams) -> Result<(), TrainerError> {
    if params.max_depth == Some(0) {
        return Err(TrainerError::Params("max_depth must be at least 1".to_string()));
    }
    if params.min_samples_split < 2 {
        return Err(TrainerError::Params(
            "min_samples_split must be at least 2".to_string(),
        ));
    }
    if params.min_samples_leaf < 1 {
        return Err(TrainerError::Params(
            "min_samples_leaf must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_sample_model() -> Result<(), TrainerError> {
        let trained = Trainer::new(TrainingParams::default())?.train(&Dataset::sample())?;

        assert_eq!(trained.model.n_features, 4);
        assert_eq!(trained.model.n_classes, 5);
        assert_eq!(trained.model.metadata.training_rows, 5);
        assert_eq!(trained.model.tree.leaf_count(), 5);
        assert_eq!(
            trained.model.metadata.encoders_hash,
            trained.encoders.hash_hex()?
        );
        Ok(())
    }

    #[test]
    fn test_fits_every_training_row() -> Result<(), TrainerError> {
        let dataset = Dataset::sample();
        let trained = Trainer::new(TrainingParams::default())?.train(&dataset)?;
        let encoded = dataset.encode(&trained.encoders)?;

        for (row, &target) in encoded.features.iter().zip(&encoded.targets) {
            assert_eq!(trained.model.predict(row)?, target);
        }
        Ok(())
    }

    #[test]
    fn test_determinism() -> Result<(), TrainerError> {
        let dataset = Dataset::sample();
        let a = Trainer::new(TrainingParams::default())?
            .with_created_at(1_700_000_000)
            .train(&dataset)?;
        let b = Trainer::new(TrainingParams::default())?
            .with_created_at(1_700_000_000)
            .train(&dataset)?;

        assert_eq!(a, b);
        assert_eq!(a.model.hash_hex()?, b.model.hash_hex()?);
        Ok(())
    }

    #[test]
    fn test_invalid_params() {
        let zero_depth = TrainingParams {
            max_depth: Some(0),
            ..TrainingParams::default()
        };
        assert!(matches!(
            Trainer::new(zero_depth),
            Err(TrainerError::Params(_))
        ));

        let tiny_split = TrainingParams {
            min_samples_split: 1,
            ..TrainingParams::default()
        };
        assert!(Trainer::new(tiny_split).is_err());

        let no_leaf = TrainingParams {
            min_samples_leaf: 0,
            ..TrainingParams::default()
        };
        assert!(Trainer::new(no_leaf).is_err());
    }

    #[test]
    fn test_depth_limited_model_still_valid() -> Result<(), TrainerError> {
        let params = TrainingParams {
            max_depth: Some(1),
            ..TrainingParams::default()
        };
        let trained = Trainer::new(params)?.train(&Dataset::sample())?;

        assert_eq!(trained.model.metadata.max_depth_reached, 1);
        assert_eq!(trained.model.tree.leaf_count(), 2);
        assert!(trained.into_artifacts().is_ok());
        Ok(())
    }
}
