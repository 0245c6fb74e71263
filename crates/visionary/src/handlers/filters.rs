//! Filter handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use visionary_core::profile::{Filter, FilterPatch};

use super::{
    error::FILTER,
    extract::{json_body, path_id},
    AppError,
};
use crate::state::AppState;

const LIST_FILTERS: &str = "Error to retrieve some filters";
const GET_FILTER: &str = "Error to retrieve the filter";
const UPDATE_FILTER: &str = "Error updating the filter";
const DELETE_FILTER: &str = "Error to delete the filter";

/// List every filter (GET /filters).
pub async fn list_filters(State(state): State<AppState>) -> Result<Json<Vec<Filter>>, AppError> {
    let filters = state
        .filter_repo
        .list_filters()
        .await
        .map_err(AppError::repository(LIST_FILTERS, FILTER))?;

    Ok(Json(filters))
}

/// Get a filter by id (GET /filters/{id}).
pub async fn get_filter(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Filter>, AppError> {
    let id = path_id(path, GET_FILTER)?;

    state
        .filter_repo
        .get_filter(id)
        .await
        .map_err(AppError::repository(GET_FILTER, FILTER))?
        .map(Json)
        .ok_or(AppError::NotFound(FILTER))
}

/// List filters with an exact parameter name (GET /filters/by-parameter/{parameter}).
pub async fn list_filters_by_parameter(
    State(state): State<AppState>,
    Path(parameter): Path<String>,
) -> Result<Json<Vec<Filter>>, AppError> {
    let filters = state
        .filter_repo
        .get_filters_by_parameter(&parameter)
        .await
        .map_err(AppError::repository(LIST_FILTERS, FILTER))?;

    Ok(Json(filters))
}

/// Partially update a filter (PUT /filters/{id}).
pub async fn update_filter(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<FilterPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path, UPDATE_FILTER)?;
    let patch = json_body(body, UPDATE_FILTER)?;

    let filter = state
        .filter_repo
        .update_filter(id, &patch)
        .await
        .map_err(AppError::repository(UPDATE_FILTER, FILTER))?;

    tracing::info!(filter_id = id, parameter = %filter.parameter, "Filter updated");
    Ok((StatusCode::CREATED, "Filter successfully updated !"))
}

/// Delete a filter (DELETE /filters/{id}).
pub async fn delete_filter(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path, DELETE_FILTER)?;

    state
        .filter_repo
        .delete_filter(id)
        .await
        .map_err(AppError::repository(DELETE_FILTER, FILTER))?;

    tracing::info!(filter_id = id, "Filter deleted");
    Ok((StatusCode::OK, "Filter successfully deleted !"))
}
