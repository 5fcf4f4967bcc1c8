use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::value_objects::{
    entitlements::EntitlementDecision, enums::usage_resources::UsageResource,
};

/// Client-facing error taxonomy. Validation and authorization failures are
/// mapped where they are detected; storage failures collapse into
/// `Internal` so no database detail reaches the caller.
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Missing or malformed credentials")]
    Unauthenticated,

    #[error("Invalid or expired credentials")]
    InvalidCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource not found")]
    NotFound,

    #[error("{resource} limit reached")]
    LimitReached {
        resource: UsageResource,
        limit: i32,
        current: i32,
    },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError {
    pub fn limit_reached(decision: &EntitlementDecision) -> Self {
        UseCaseError::LimitReached {
            resource: decision.resource,
            limit: decision.limit,
            current: decision.current,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::Unauthenticated | UseCaseError::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            UseCaseError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            UseCaseError::NotFound => StatusCode::NOT_FOUND,
            UseCaseError::LimitReached { .. } => StatusCode::FORBIDDEN,
            UseCaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;
