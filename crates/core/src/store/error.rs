use thiserror::Error;

/// Errors that can occur during data store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for data store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_connection_failed_display() {
        let error = StoreError::ConnectionFailed("dispatch failure".to_string());
        assert_eq!(error.to_string(), "Connection failed: dispatch failure");
    }

    #[test]
    fn test_store_error_query_failed_display() {
        let error = StoreError::QueryFailed("Table not found".to_string());
        assert_eq!(error.to_string(), "Query failed: Table not found");
    }

    #[test]
    fn test_store_error_invalid_data_display() {
        let error = StoreError::InvalidData("HighScore is not a number".to_string());
        assert_eq!(error.to_string(), "Invalid data: HighScore is not a number");
    }
}
