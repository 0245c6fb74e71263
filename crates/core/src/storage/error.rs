use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shorthand for a missing row identified by its integer id.
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "CorrectionProfileResult",
            id: "12".to_string(),
        };
        assert_eq!(error.to_string(), "CorrectionProfileResult not found: 12");
    }

    #[test]
    fn test_not_found_shorthand() {
        assert_eq!(
            RepositoryError::not_found("User", 4),
            RepositoryError::NotFound {
                entity_type: "User",
                id: "4".to_string(),
            }
        );
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("unable to open database file".to_string());
        assert_eq!(
            error.to_string(),
            "Connection failed: unable to open database file"
        );
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("no such table: filters".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table: filters");
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("foreign key violation".to_string());
        assert_eq!(error.to_string(), "Invalid data: foreign key violation");
    }
}
