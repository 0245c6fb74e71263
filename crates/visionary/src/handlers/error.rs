use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use visionary_core::storage::{repository_error_to_status_code, RepositoryError};

/// Entity labels used in "doesn't exist" messages.
pub const USER: &str = "user";
pub const CORRECTION_PROFILE_RESULT: &str = "correction profile result";
pub const FILTER: &str = "filter";

/// Failure of a handler, rendered as a plain-text body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("The {0} doesn't exist.")]
    NotFound(&'static str),

    #[error("{context}: {detail}")]
    BadRequest {
        context: &'static str,
        detail: String,
    },
}

impl AppError {
    pub fn bad_request(context: &'static str, detail: impl ToString) -> Self {
        Self::BadRequest {
            context,
            detail: detail.to_string(),
        }
    }

    /// Returns a mapper turning a store failure into the handler's error.
    ///
    /// A missing row becomes `NotFound(entity)`; every other failure becomes
    /// a bad request carrying `context`.
    pub fn repository(
        context: &'static str,
        entity: &'static str,
    ) -> impl FnOnce(RepositoryError) -> Self {
        move |err| match repository_error_to_status_code(&err) {
            404 => Self::NotFound(entity),
            _ => Self::bad_request(context, err),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        tracing::warn!(status = %status, message = %message, "API error");
        (status, message).into_response()
    }
}
