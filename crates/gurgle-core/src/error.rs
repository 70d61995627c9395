//! Error types for gurgle.

use thiserror::Error;

/// Result type alias using gurgle's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// SQLSTATE class for syntax errors and access rule violations.
///
/// MySQL reports malformed boolean-mode operators (error 1064) under
/// SQLSTATE `42000`.
const SYNTAX_SQLSTATE_CLASS: &str = "42";

/// Core error type for gurgle operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller violated an operation precondition
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The storage engine rejected the full-text predicate
    #[error("Query syntax error: {0}")]
    QuerySyntax(String),

    /// Connectivity or database-level failure
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable machine-readable code for this error kind.
    ///
    /// Codes are safe to expose to clients; the display message may carry
    /// raw engine diagnostics and is meant for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_argument",
            Error::QuerySyntax(_) => "query_syntax_error",
            Error::StorageUnavailable(_) => "storage_unavailable",
            Error::NotFound(_) => "not_found",
            Error::Config(_) => "config_error",
            Error::Serialization(_) => "serialization_error",
            Error::Internal(_) => "internal_error",
            Error::Io(_) => "io_error",
        }
    }

    /// True for the two failure kinds produced by executing a statement.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Error::QuerySyntax(_) | Error::StorageUnavailable(_))
    }
}

/// Returns true when a SQLSTATE belongs to the syntax/access-rule class.
pub fn is_syntax_sqlstate(code: Option<&str>) -> bool {
    code.is_some_and(|c| c.starts_with(SYNTAX_SQLSTATE_CLASS))
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                if is_syntax_sqlstate(db_err.code().as_deref()) {
                    Error::QuerySyntax(db_err.message().to_string())
                } else {
                    Error::StorageUnavailable(err.to_string())
                }
            }
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => Error::Internal(err.to_string()),
            _ => Error::StorageUnavailable(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty query".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty query");
    }

    #[test]
    fn test_error_display_query_syntax() {
        let err = Error::QuerySyntax("unexpected '+'".to_string());
        assert_eq!(err.to_string(), "Query syntax error: unexpected '+'");
    }

    #[test]
    fn test_error_display_storage_unavailable() {
        let err = Error::StorageUnavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: connection refused");
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            Error::InvalidInput(String::new()).code(),
            "invalid_argument"
        );
        assert_eq!(Error::QuerySyntax(String::new()).code(), "query_syntax_error");
        assert_eq!(
            Error::StorageUnavailable(String::new()).code(),
            "storage_unavailable"
        );
        assert_eq!(Error::Config(String::new()).code(), "config_error");
    }

    #[test]
    fn test_is_storage_failure() {
        assert!(Error::QuerySyntax("x".into()).is_storage_failure());
        assert!(Error::StorageUnavailable("x".into()).is_storage_failure());
        assert!(!Error::InvalidInput("x".into()).is_storage_failure());
        assert!(!Error::NotFound("x".into()).is_storage_failure());
    }

    #[test]
    fn test_syntax_sqlstate_detection() {
        assert!(is_syntax_sqlstate(Some("42000")));
        assert!(is_syntax_sqlstate(Some("42S02")));
        assert!(!is_syntax_sqlstate(Some("HY000")));
        assert!(!is_syntax_sqlstate(Some("08S01")));
        assert!(!is_syntax_sqlstate(None));
    }

    #[test]
    fn test_pool_timeout_is_storage_unavailable() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, Error::StorageUnavailable(_)));
    }

    #[test]
    fn test_pool_closed_is_storage_unavailable() {
        let err: Error = sqlx::Error::PoolClosed.into();
        assert_eq!(err.code(), "storage_unavailable");
    }

    #[test]
    fn test_missing_column_is_internal() {
        let err: Error = sqlx::Error::ColumnNotFound("m4r".to_string()).into();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().contains("Serialization error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
