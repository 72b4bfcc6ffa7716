//! Error types for the advisor core

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while encoding inputs, predicting, or loading artifacts
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Input label outside the trained vocabulary of a column
    #[error("unknown {feature} value: {value:?}")]
    UnknownCategoryValue { feature: &'static str, value: String },

    /// Team size outside the accepted 1..=10 range
    #[error("team size must be between 1 and 10, got {0}")]
    InvalidTeamSize(u32),

    /// Model produced a class code the stack encoder cannot decode
    #[error("class code {0} has no label")]
    UnknownClassCode(u32),

    /// Feature row length does not match the model
    #[error("expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    /// Model structure failed validation
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Persisted artifacts are missing, corrupt, or do not belong together
    #[error("failed to load artifact {}: {reason}", path.display())]
    ArtifactLoadFailure { path: PathBuf, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    pub(crate) fn load_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ArtifactLoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error was caused by caller input rather than server state
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategoryValue { .. } | Self::InvalidTeamSize(_)
        )
    }

    /// Short stable identifier used in API error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCategoryValue { .. } => "unknown_category_value",
            Self::InvalidTeamSize(_) => "invalid_team_size",
            Self::UnknownClassCode(_) => "unknown_class_code",
            Self::FeatureCountMismatch { .. } => "feature_count_mismatch",
            Self::InvalidModel(_) => "invalid_model",
            Self::ArtifactLoadFailure { .. } => "artifact_load_failure",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Result type for advisor core operations
pub type Result<T> = std::result::Result<T, AdvisorError>;
