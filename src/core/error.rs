//! Typed error handling for generated list routes
//!
//! # Error Categories
//!
//! - [`ConfigError`]: registration-time argument problems (synchronous)
//! - [`RequestError`]: guard rejections on incoming requests
//! - [`StoreError`]: failures surfaced by the model's query execution
//!
//! Every request-time error renders as a structured JSON body with a stable
//! `code`, so a store failure always produces a defined 500 response instead
//! of a dangling request.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for list-route handling.
#[derive(Debug)]
pub enum ListError {
    /// Registration-time configuration errors
    Config(ConfigError),

    /// Guard rejections
    Request(RequestError),

    /// Store query failures
    Store(StoreError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Config(e) => write!(f, "{}", e),
            ListError::Request(e) => write!(f, "{}", e),
            ListError::Store(e) => write!(f, "{}", e),
            ListError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListError::Config(e) => Some(e),
            ListError::Request(e) => Some(e),
            ListError::Store(e) => Some(e),
            ListError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ListError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ListError::Request(e) => e.status_code(),
            ListError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ListError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListError::Config(e) => e.error_code(),
            ListError::Request(e) => e.error_code(),
            ListError::Store(e) => e.error_code(),
            ListError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ListError::Store(StoreError::QueryFailed { model, .. }) => {
                Some(serde_json::json!({ "model": model }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while registering a route
#[derive(Debug)]
pub enum ConfigError {
    /// A required registration argument is missing or empty
    MissingArgument { argument: String },

    /// Failed to parse an options file
    ParseError {
        file: Option<String>,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingArgument { argument } => {
                write!(f, "Missing required argument: {}", argument)
            }
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse options file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse options: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingArgument { .. } => "MISSING_ARGUMENT",
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
        }
    }
}

impl From<ConfigError> for ListError {
    fn from(err: ConfigError) -> Self {
        ListError::Config(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Guard rejections for incoming requests
#[derive(Debug)]
pub enum RequestError {
    /// No usable credential was presented
    Unauthorized { message: String },

    /// The presented credential does not allow this request
    Forbidden { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Unauthorized { message } => {
                write!(f, "Unauthorized: {}", message)
            }
            RequestError::Forbidden { message } => {
                write!(f, "Forbidden: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

impl From<RequestError> for ListError {
    fn from(err: RequestError) -> Self {
        ListError::Request(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Failures surfaced by the model's query execution
#[derive(Debug)]
pub enum StoreError {
    /// The find call rejected
    QueryFailed { model: String, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::QueryFailed { model, message } => {
                write!(f, "Query on model '{}' failed: {}", model, message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::QueryFailed { .. } => "STORE_QUERY_FAILED",
        }
    }
}

impl From<StoreError> for ListError {
    fn from(err: StoreError) -> Self {
        ListError::Store(err)
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for list-route operations
pub type ListResult<T> = Result<T, ListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_status_codes() {
        assert_eq!(
            RequestError::Unauthorized {
                message: "no token".to_string()
            }
            .status_code(),
            StatusCode::UNAUTHORIZED
        );

        assert_eq!(
            RequestError::Forbidden {
                message: "no session".to_string()
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_store_error_becomes_500_with_code() {
        let err: ListError = StoreError::QueryFailed {
            model: "items".to_string(),
            message: "connection refused".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORE_QUERY_FAILED");

        let response = err.to_response();
        assert_eq!(response.code, "STORE_QUERY_FAILED");
        assert!(response.message.contains("items"));
        assert!(response.message.contains("connection refused"));
        assert_eq!(
            response.details,
            Some(serde_json::json!({ "model": "items" }))
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingArgument {
            argument: "route_path".to_string(),
        };
        assert!(err.to_string().contains("route_path"));
        assert_eq!(err.error_code(), "MISSING_ARGUMENT");
    }

    #[test]
    fn test_error_response_serialization_skips_empty_details() {
        let err: ListError = RequestError::Forbidden {
            message: "nope".to_string(),
        }
        .into();
        let json = serde_json::to_value(err.to_response()).unwrap();

        assert_eq!(json["code"], "FORBIDDEN");
        assert!(json.get("details").is_none());
    }
}
