//! Decision tree classifier model
//!
//! Implements the trained model artifact with:
//! - Canonical JSON serialization
//! - Blake3 model hashing
//! - Integer-only inference

use crate::errors::{AdvisorError, Result};
use crate::serde_canon::{hash_canonical_hex, to_canonical_json};
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current model format version
pub const MODEL_FORMAT_VERSION: i32 = 1;

/// Hyperparameters the model was fitted with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitParams {
    /// Depth limit (`None` grows until leaves are pure)
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// Provenance recorded alongside the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Unix timestamp (seconds) of training
    pub created_at: i64,

    /// Number of labelled rows the tree was fitted on
    pub training_rows: usize,

    /// Depth of the fitted tree
    pub max_depth_reached: usize,

    /// Blake3 hash of the encoder set this model was trained with
    pub encoders_hash: String,

    pub params: FitParams,
}

/// Trained decision tree classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierModel {
    /// Model format version (always 1 for now)
    pub version: i32,

    /// Expected length of every feature row
    pub n_features: usize,

    /// Number of target classes (size of the stack vocabulary)
    pub n_classes: usize,

    pub tree: Tree,

    pub metadata: ModelMetadata,
}

impl ClassifierModel {
    pub fn new(tree: Tree, n_features: usize, n_classes: usize, metadata: ModelMetadata) -> Self {
        Self {
            version: MODEL_FORMAT_VERSION,
            n_features,
            n_classes,
            tree,
            metadata,
        }
    }

    /// Validate model structure
    pub fn validate(&self) -> Result<()> {
        if self.version != MODEL_FORMAT_VERSION {
            return Err(AdvisorError::InvalidModel(format!(
                "Unsupported model version: {}",
                self.version
            )));
        }

        if self.n_features == 0 || self.n_classes == 0 {
            return Err(AdvisorError::InvalidModel(format!(
                "Model declares {} features and {} classes",
                self.n_features, self.n_classes
            )));
        }

        self.tree
            .validate(self.n_features, self.n_classes)
            .map_err(AdvisorError::InvalidModel)
    }

    /// Predict the class code for a feature row
    pub fn predict(&self, features: &[i64]) -> Result<u32> {
        self.leaf_for(features)?
            .class
            .ok_or_else(|| AdvisorError::InvalidModel("leaf without class".to_string()))
    }

    /// Training class distribution at the leaf reached by `features`
    ///
    /// Falls back to a one-hot vector when the leaf carries no counts.
    pub fn predict_distribution(&self, features: &[i64]) -> Result<Vec<u32>> {
        let leaf = self.leaf_for(features)?;
        if !leaf.class_counts.is_empty() {
            return Ok(leaf.class_counts.clone());
        }

        let class = leaf
            .class
            .ok_or_else(|| AdvisorError::InvalidModel("leaf without class".to_string()))?;
        let mut one_hot = vec![0; self.n_classes];
        if let Some(slot) = one_hot.get_mut(class as usize) {
            *slot = 1;
        }
        Ok(one_hot)
    }

    fn leaf_for(&self, features: &[i64]) -> Result<&crate::tree::Node> {
        if features.len() != self.n_features {
            return Err(AdvisorError::FeatureCountMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        self.tree
            .evaluate(features)
            .ok_or_else(|| AdvisorError::InvalidModel("tree traversal failed".to_string()))
    }

    /// Serialize model to canonical JSON (sorted keys, no whitespace)
    pub fn to_canonical_json(&self) -> Result<String> {
        to_canonical_json(self)
    }

    /// Compute model hash as hex string
    pub fn hash_hex(&self) -> Result<String> {
        hash_canonical_hex(self)
    }

    /// Save model to JSON file with canonical serialization
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_canonical_json()?)?;
        Ok(())
    }

    /// Load model from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let model: ClassifierModel = serde_json::from_str(&json)?;
        model.validate()?;
        Ok(model)
    }
}
