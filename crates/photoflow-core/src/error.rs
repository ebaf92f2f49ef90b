//! Error types module
//!
//! Unified error taxonomy for Photoflow. Validation failures are
//! recovered locally and rendered as structured 4xx responses; upstream
//! (storage/pub-sub) and internal errors are logged in full and surfaced
//! as 500-equivalents. Each variant self-describes its HTTP status,
//! machine-readable code, and log level so the API layer stays a thin
//! mapping.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like validation failures
    Debug,
    /// Recoverable issues like authorization denials
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Missing object metadata: {0}")]
    MissingMetadata(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Pub/sub error: {0}")]
    PubSub(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code to return for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Unauthorized(_) => 403,
            AppError::UnsupportedType(_) => 400,
            AppError::PayloadTooLarge { .. } => 400,
            AppError::MissingMetadata(_) => 400,
            AppError::Storage(_) => 500,
            AppError::PubSub(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    /// Machine-readable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AppError::MissingMetadata(_) => "MISSING_METADATA",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::PubSub(_) => "PUBSUB_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Machine-readable action hint for the client, where one exists.
    ///
    /// Unauthorized uploads carry `join_waitlist` so clients can route
    /// the user to the access-request flow rather than a generic auth
    /// failure screen.
    pub fn action_hint(&self) -> Option<&'static str> {
        match self {
            AppError::Unauthorized(_) => Some("join_waitlist"),
            _ => None,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_)
            | AppError::UnsupportedType(_)
            | AppError::PayloadTooLarge { .. } => LogLevel::Debug,
            AppError::Unauthorized(_) | AppError::MissingMetadata(_) => LogLevel::Warn,
            AppError::Storage(_) | AppError::PubSub(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidInput("x".into()).http_status_code(), 400);
        assert_eq!(AppError::Unauthorized("x".into()).http_status_code(), 403);
        assert_eq!(
            AppError::PayloadTooLarge { size: 2, max: 1 }.http_status_code(),
            400
        );
        assert_eq!(AppError::Storage("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_unauthorized_action_hint() {
        let err = AppError::Unauthorized("not on access list".into());
        assert_eq!(err.action_hint(), Some("join_waitlist"));
        assert_eq!(AppError::InvalidInput("x".into()).action_hint(), None);
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            AppError::PayloadTooLarge { size: 2, max: 1 }.error_code(),
            "PAYLOAD_TOO_LARGE"
        );
        assert_eq!(
            AppError::MissingMetadata("user-email".into()).error_code(),
            "MISSING_METADATA"
        );
    }
}
