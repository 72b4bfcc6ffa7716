use stack_advisor_core::AdvisorError;
use thiserror::Error;

/// Errors returned by the trainer.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("invalid training parameters: {0}")]
    Params(String),

    #[error("training error: {0}")]
    Training(String),

    #[error("artifact error: {0}")]
    Artifacts(#[from] AdvisorError),
}
