use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        correction_profile_results::{
            add_filter, delete_correction_profile_result, get_correction_profile_result,
            list_correction_profile_results, list_correction_profile_results_by_type,
            list_profile_result_filters, update_correction_profile_result,
        },
        filters::{delete_filter, get_filter, list_filters, list_filters_by_parameter, update_filter},
        root::{index, livez},
        users::{
            add_correction_profile_result, create_user, delete_user, get_user,
            get_user_by_email, list_user_correction_profile_results, list_users, update_user,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-req"),
        ]);

    let request_timeout = state.request_timeout;

    Router::new()
        .route("/", get(index))
        .route("/livez", get(livez))
        // User routes
        .route("/users", get(list_users).post(create_user))
        .route("/users/by-email/{email}", get(get_user_by_email))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/users/{id}/correction-profile-results",
            get(list_user_correction_profile_results),
        )
        .route(
            "/users/{id}/correction-profile-result",
            post(add_correction_profile_result),
        )
        // Correction profile result routes
        .route(
            "/correction-profile-results",
            get(list_correction_profile_results),
        )
        .route(
            "/correction-profile-results/by-type/{type}",
            get(list_correction_profile_results_by_type),
        )
        .route(
            "/correction-profile-results/{id}",
            get(get_correction_profile_result)
                .put(update_correction_profile_result)
                .delete(delete_correction_profile_result),
        )
        .route(
            "/correction-profile-results/{id}/filters",
            get(list_profile_result_filters),
        )
        .route("/correction-profile-results/{id}/filter", post(add_filter))
        // Filter routes
        .route("/filters", get(list_filters))
        .route(
            "/filters/by-parameter/{parameter}",
            get(list_filters_by_parameter),
        )
        .route(
            "/filters/{id}",
            get(get_filter).put(update_filter).delete(delete_filter),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
