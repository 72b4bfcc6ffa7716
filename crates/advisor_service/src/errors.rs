//! Service error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use stack_advisor_core::AdvisorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Advisor(#[from] AdvisorError),

    #[error("team size must be a whole number, got {0:?}")]
    TeamSizeNotANumber(String),

    /// Request body could not be decoded
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    /// 422 for bad caller input, 500 for everything else
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Advisor(err) if err.is_user_input() => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TeamSizeNotANumber(_) | Self::InvalidRequest(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Advisor(err) => err.kind(),
            Self::TeamSizeNotANumber(_) => "invalid_team_size",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Config(_) => "config",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let payload = Json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
        });
        (self.status(), payload).into_response()
    }
}
