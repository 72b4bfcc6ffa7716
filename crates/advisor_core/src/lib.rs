//! Stack Advisor core
//!
//! Shared data model between the offline trainer and the predictor service.
//!
//! Modules:
//! - `categories`: Closed enums for the categorical inputs
//! - `encoder`: Label encoders and the encoder set artifact
//! - `features`: Fixed-order feature vector
//! - `tree`: Integer-only classification tree
//! - `model`: Trained classifier artifact with canonical hashing
//! - `artifacts`: Saving and loading the encoder/model pair
//! - `predictor`: The `recommend_stack` operation

pub mod artifacts;
pub mod categories;
pub mod encoder;
pub mod errors;
pub mod features;
pub mod model;
pub mod predictor;
pub mod serde_canon;
pub mod tree;

pub use artifacts::{load_artifacts, save_artifacts, ArtifactPaths, Artifacts};
pub use categories::{Column, Experience, PerfNeed, ProjectType};
pub use encoder::{EncoderSet, LabelEncoder};
pub use errors::{AdvisorError, Result};
pub use features::{FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT, TEAM_SIZE_RANGE};
pub use model::{ClassifierModel, FitParams, ModelMetadata, MODEL_FORMAT_VERSION};
pub use predictor::{Predictor, Recommendation, RecommendationRequest};
pub use tree::{Node, Tree};

