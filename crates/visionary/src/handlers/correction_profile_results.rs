//! Correction profile result handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use visionary_core::profile::{
    CorrectionProfileResult, CorrectionProfileResultPatch, Filter, NewFilter,
};

use super::{
    error::CORRECTION_PROFILE_RESULT,
    extract::{json_body, path_id},
    AppError,
};
use crate::state::AppState;

const CREATE_FILTER: &str = "Error when creating filter";
const NULL_FILTER: &str = "Body of filter to add is null.";
const LIST_PROFILE_RESULTS: &str = "Error to retrieve some correction profile results";
const GET_PROFILE_RESULT: &str = "Error to retrieve the correction profile result";
const GET_FILTERS: &str = "Error to retrieve the correction profile result's filters";
const UPDATE_PROFILE_RESULT: &str = "Error updating the correction profile result";
const DELETE_PROFILE_RESULT: &str = "Error to delete the correction profile result";

async fn find_profile_result(
    state: &AppState,
    id: i64,
    context: &'static str,
) -> Result<CorrectionProfileResult, AppError> {
    state
        .profile_repo
        .get_correction_profile_result(id)
        .await
        .map_err(AppError::repository(context, CORRECTION_PROFILE_RESULT))?
        .ok_or(AppError::NotFound(CORRECTION_PROFILE_RESULT))
}

/// Append a filter to a profile result (POST /correction-profile-results/{id}/filter).
pub async fn add_filter(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Option<NewFilter>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let profile_id = path_id(path, CREATE_FILTER)?;
    let filter = json_body(body, CREATE_FILTER)?;

    find_profile_result(&state, profile_id, CREATE_FILTER).await?;
    let Some(filter) = filter else {
        return Err(AppError::bad_request(CREATE_FILTER, NULL_FILTER));
    };

    let created = state
        .profile_repo
        .add_filter(profile_id, &filter)
        .await
        .map_err(AppError::repository(CREATE_FILTER, CORRECTION_PROFILE_RESULT))?;

    tracing::info!(
        correction_profile_result_id = profile_id,
        filter_id = created.id,
        "Filter created"
    );
    Ok((StatusCode::CREATED, "Filter successfully created !"))
}

/// List every profile result, owned or detached (GET /correction-profile-results).
pub async fn list_correction_profile_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<CorrectionProfileResult>>, AppError> {
    let profiles = state
        .profile_repo
        .list_correction_profile_results()
        .await
        .map_err(AppError::repository(
            LIST_PROFILE_RESULTS,
            CORRECTION_PROFILE_RESULT,
        ))?;

    Ok(Json(profiles))
}

/// Get a profile result by id (GET /correction-profile-results/{id}).
pub async fn get_correction_profile_result(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CorrectionProfileResult>, AppError> {
    let id = path_id(path, GET_PROFILE_RESULT)?;
    Ok(Json(find_profile_result(&state, id, GET_PROFILE_RESULT).await?))
}

/// List profile results of one type (GET /correction-profile-results/by-type/{type}).
///
/// An unknown type yields an empty list, not a 404.
pub async fn list_correction_profile_results_by_type(
    State(state): State<AppState>,
    Path(profile_type): Path<String>,
) -> Result<Json<Vec<CorrectionProfileResult>>, AppError> {
    let profiles = state
        .profile_repo
        .get_correction_profile_results_by_type(&profile_type)
        .await
        .map_err(AppError::repository(
            LIST_PROFILE_RESULTS,
            CORRECTION_PROFILE_RESULT,
        ))?;

    Ok(Json(profiles))
}

/// List a profile result's filters (GET /correction-profile-results/{id}/filters).
pub async fn list_profile_result_filters(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Filter>>, AppError> {
    let id = path_id(path, GET_FILTERS)?;
    let profile = find_profile_result(&state, id, GET_FILTERS).await?;

    Ok(Json(profile.filters))
}

/// Partially update a profile result (PUT /correction-profile-results/{id}).
///
/// A present `filters` list replaces the stored filters, which are deleted.
pub async fn update_correction_profile_result(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CorrectionProfileResultPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path, UPDATE_PROFILE_RESULT)?;
    let patch = json_body(body, UPDATE_PROFILE_RESULT)?;

    let profile = state
        .profile_repo
        .update_correction_profile_result(id, &patch)
        .await
        .map_err(AppError::repository(
            UPDATE_PROFILE_RESULT,
            CORRECTION_PROFILE_RESULT,
        ))?;

    tracing::info!(
        correction_profile_result_id = id,
        filters = profile.filters.len(),
        "Correction profile result updated"
    );
    Ok((
        StatusCode::CREATED,
        "Correction profile result successfully updated !",
    ))
}

/// Delete a profile result and its filters (DELETE /correction-profile-results/{id}).
pub async fn delete_correction_profile_result(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path, DELETE_PROFILE_RESULT)?;

    state
        .profile_repo
        .delete_correction_profile_result(id)
        .await
        .map_err(AppError::repository(
            DELETE_PROFILE_RESULT,
            CORRECTION_PROFILE_RESULT,
        ))?;

    tracing::info!(correction_profile_result_id = id, "Correction profile result deleted");
    Ok((
        StatusCode::OK,
        "Correction profile result successfully deleted !",
    ))
}
