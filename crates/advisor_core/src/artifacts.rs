//! Persisted artifact pair: the encoder set and the trained model
//!
//! Both files are canonical JSON. The model records the hash of the encoder
//! set it was trained with, so a model can never be served with encoders
//! from a different training run.

use crate::encoder::EncoderSet;
use crate::errors::{AdvisorError, Result};
use crate::model::ClassifierModel;
use crate::serde_canon::to_canonical_json;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ENCODERS_FILE: &str = "encoders.json";
pub const MODEL_FILE: &str = "model.json";

/// Locations of the two artifacts inside an artifact directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub encoders: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            encoders: dir.join(ENCODERS_FILE),
            model: dir.join(MODEL_FILE),
        }
    }
}

/// Loaded, validated artifacts shared read-only by the predictor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub encoders: EncoderSet,
    pub model: ClassifierModel,
    /// Hash of the model's canonical JSON
    pub model_hash: String,
}

impl Artifacts {
    /// Pair encoders and model after checking they belong together
    pub fn new(encoders: EncoderSet, model: ClassifierModel) -> Result<Self> {
        encoders.validate()?;
        Self::link(encoders, model)
    }

    /// Validate the model and its link to already-validated encoders
    fn link(encoders: EncoderSet, model: ClassifierModel) -> Result<Self> {
        model.validate()?;

        let encoders_hash = encoders.hash_hex()?;
        if model.metadata.encoders_hash != encoders_hash {
            return Err(AdvisorError::InvalidModel(format!(
                "model was trained with encoders {} but encoders hash to {}",
                model.metadata.encoders_hash, encoders_hash
            )));
        }

        if model.n_classes != encoders.stack.len() {
            return Err(AdvisorError::InvalidModel(format!(
                "model has {} classes but the stack encoder knows {} labels",
                model.n_classes,
                encoders.stack.len()
            )));
        }

        let model_hash = model.hash_hex()?;
        Ok(Self {
            encoders,
            model,
            model_hash,
        })
    }
}

/// Write both artifacts, creating the directory and overwriting existing files
pub fn save_artifacts(
    dir: impl AsRef<Path>,
    encoders: &EncoderSet,
    model: &ClassifierModel,
) -> Result<ArtifactPaths> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let paths = ArtifactPaths::in_dir(dir);
    fs::write(&paths.encoders, to_canonical_json(encoders)?)?;
    model.save_json(&paths.model)?;

    info!(
        encoders = %paths.encoders.display(),
        model = %paths.model.display(),
        "artifacts written"
    );
    Ok(paths)
}

/// Read and validate the artifact pair from `dir`
///
/// Every failure is reported as `ArtifactLoadFailure` naming the offending file.
pub fn load_artifacts(dir: impl AsRef<Path>) -> Result<Artifacts> {
    let paths = ArtifactPaths::in_dir(dir);

    let encoders: EncoderSet = read_json(&paths.encoders)?;
    let model: ClassifierModel = read_json(&paths.model)?;

    // Encoder problems name encoders.json; everything after names model.json
    encoders
        .validate()
        .map_err(|err| AdvisorError::load_failure(&paths.encoders, err))?;
    let artifacts = Artifacts::link(encoders, model)
        .map_err(|err| AdvisorError::load_failure(&paths.model, err))?;

    debug!(model_hash = %artifacts.model_hash, "artifacts loaded");
    Ok(artifacts)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|err| AdvisorError::load_failure(path, err))?;
    serde_json::from_str(&raw).map_err(|err| AdvisorError::load_failure(path, err))
}
