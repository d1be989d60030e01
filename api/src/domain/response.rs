use super::TODO_NOT_FOUND;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use entities::TodoError;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A failed operation plus the static message the caller is allowed to see.
///
/// Callers only learn "not found" or a per-operation failure; the cause stays
/// in the server log.
#[derive(Debug)]
pub struct HandlerError {
    error: TodoError,
    message: &'static str,
}

impl HandlerError {
    pub fn new(error: TodoError, message: &'static str) -> Self {
        Self { error, message }
    }

    pub fn status(&self) -> StatusCode {
        if self.error.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::NOT_FOUND {
            info!("{}: {}", TODO_NOT_FOUND, self.error);
            TODO_NOT_FOUND
        } else {
            error!(kind = %self.error.kind(), "{}: {}", self.message, self.error);
            self.message
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

pub trait RespondWith<T> {
    fn or_respond_with(self, message: &'static str) -> Result<T, HandlerError>;
}

impl<T> RespondWith<T> for Result<T, TodoError> {
    fn or_respond_with(self, message: &'static str) -> Result<T, HandlerError> {
        self.map_err(|e| HandlerError::new(e, message))
    }
}
