//! Extractor rejections turned into context-prefixed bad requests.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};

use super::AppError;

/// Unwraps a numeric `{id}` path segment.
pub fn path_id(path: Result<Path<i64>, PathRejection>, context: &'static str) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::bad_request(context, rejection.body_text()))
}

/// Unwraps a JSON request body.
pub fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
    context: &'static str,
) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::bad_request(context, rejection.body_text()))
}
