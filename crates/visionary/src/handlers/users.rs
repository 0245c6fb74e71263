//! User handlers.

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
    decode_email_segment, CorrectionProfileResult, NewCorrectionProfileResult, NewUser, User,
    UserPatch,
};

use super::{
    error::USER,
    extract::{json_body, path_id},
    AppError,
};
use crate::state::AppState;

const CREATE_USER: &str = "Error when creating the user";
const CREATE_PROFILE_RESULT: &str = "Error when creating the correction profile result";
const NULL_PROFILE_RESULT: &str = "Body of correction profile result to add is null.";
const LIST_USERS: &str = "Error to retrieve some users";
const GET_USER: &str = "Error to retrieve the user";
const GET_PROFILE_RESULTS: &str = "Error to retrieve the user's correction profile results";
const UPDATE_USER: &str = "Error updating the user";
const DELETE_USER: &str = "Error to delete the user";

async fn find_user(state: &AppState, id: i64, context: &'static str) -> Result<User, AppError> {
    state
        .user_repo
        .get_user(id)
        .await
        .map_err(AppError::repository(context, USER))?
        .ok_or(AppError::NotFound(USER))
}

/// Create a user with its profile results (POST /users).
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = json_body(body, CREATE_USER)?;

    let user = state
        .user_repo
        .create_user(&new_user)
        .await
        .map_err(AppError::repository(CREATE_USER, USER))?;

    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, "User successfully created !"))
}

/// Append a profile result to a user (POST /users/{id}/correction-profile-result).
pub async fn add_correction_profile_result(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Option<NewCorrectionProfileResult>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = path_id(path, CREATE_PROFILE_RESULT)?;
    let profile = json_body(body, CREATE_PROFILE_RESULT)?;

    find_user(&state, user_id, CREATE_PROFILE_RESULT).await?;
    let Some(profile) = profile else {
        return Err(AppError::bad_request(
            CREATE_PROFILE_RESULT,
            NULL_PROFILE_RESULT,
        ));
    };

    let created = state
        .user_repo
        .add_correction_profile_result(user_id, &profile)
        .await
        .map_err(AppError::repository(CREATE_PROFILE_RESULT, USER))?;

    tracing::info!(
        user_id,
        correction_profile_result_id = created.id,
        "Correction profile result created"
    );
    Ok((
        StatusCode::CREATED,
        "Correction profile result successfully created !",
    ))
}

/// List every user (GET /users).
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .user_repo
        .list_users()
        .await
        .map_err(AppError::repository(LIST_USERS, USER))?;

    Ok(Json(users))
}

/// Get a user by id (GET /users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let id = path_id(path, GET_USER)?;
    Ok(Json(find_user(&state, id, GET_USER).await?))
}

/// Get a user by email (GET /users/by-email/{email}).
///
/// Every `-dot-` in the segment stands for a `.` of the address.
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<User>, AppError> {
    let email = decode_email_segment(&segment);

    state
        .user_repo
        .get_user_by_email(&email)
        .await
        .map_err(AppError::repository(GET_USER, USER))?
        .map(Json)
        .ok_or(AppError::NotFound(USER))
}

/// List a user's profile results (GET /users/{id}/correction-profile-results).
pub async fn list_user_correction_profile_results(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<CorrectionProfileResult>>, AppError> {
    let id = path_id(path, GET_PROFILE_RESULTS)?;
    let user = find_user(&state, id, GET_PROFILE_RESULTS).await?;

    Ok(Json(user.correction_profile_results))
}

/// Partially update a user (PUT /users/{id}).
///
/// Scalar fields are overwritten only when present. A present
/// `correctionProfileResults` deletes the first stored profile result, then
/// replaces the collection; the other previous results are detached.
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path, UPDATE_USER)?;
    let patch = json_body(body, UPDATE_USER)?;

    let user = state
        .user_repo
        .update_user(id, &patch)
        .await
        .map_err(AppError::repository(UPDATE_USER, USER))?;

    tracing::info!(
        user_id = id,
        correction_profile_results = user.correction_profile_results.len(),
        "User updated"
    );
    Ok((StatusCode::CREATED, "User successfully updated !"))
}

/// Delete a user with its profile results and their filters (DELETE /users/{id}).
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path, DELETE_USER)?;

    state
        .user_repo
        .delete_user(id)
        .await
        .map_err(AppError::repository(DELETE_USER, USER))?;

    tracing::info!(user_id = id, "User deleted");
    Ok((StatusCode::OK, "User successfully deleted !"))
}
