//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - everything else -> 400 (Bad Request)
///
/// Store failures are reported to clients as bad requests; the service has
/// no 500 path.
///
/// # Examples
///
/// ```
/// use visionary_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("User", 3);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::ConnectionFailed(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::InvalidData(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::not_found("Filter", 8);
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_store_failures_map_to_400() {
        let errors = [
            RepositoryError::ConnectionFailed("closed".to_string()),
            RepositoryError::QueryFailed("syntax error".to_string()),
            RepositoryError::InvalidData("bad reference".to_string()),
        ];

        for error in &errors {
            assert_eq!(repository_error_to_status_code(error), 400, "{error}");
        }
    }
}
