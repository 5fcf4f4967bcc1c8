use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::usecases::errors::UseCaseError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<i32>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            limit: None,
            current: None,
        }
    }
}

impl IntoResponse for UseCaseError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Denials carry the numbers the client needs to render an upgrade
        // prompt; everything else is just the message.
        let body = match &self {
            UseCaseError::LimitReached { limit, current, .. } => ErrorResponse {
                error: self.to_string(),
                limit: Some(*limit),
                current: Some(*current),
            },
            _ => ErrorResponse::new(self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
