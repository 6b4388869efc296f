//! Error types for txdash-core
//!
//! Every failure of the transaction pipeline is one variant of [`ClientError`].
//! Callers match on it exhaustively; [`ClientError::to_details`] gives the
//! serialisable form returned by the JSON API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Upstream answered with a non-success HTTP status
    TransportFailure,
    /// Upstream envelope reported an error
    ApplicationFailure,
    /// Request could not complete or the body could not be decoded
    NetworkFailure,
    /// Transaction lookup miss
    NotFound,
    /// Lookup failed for an uncategorised reason
    LookupFailure,
    /// Filtering failed for an uncategorised reason
    FilterFailure,
    /// Anything else
    UnknownFailure,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::TransportFailure => write!(f, "TRANSPORT_FAILURE"),
            ErrorCode::ApplicationFailure => write!(f, "APPLICATION_FAILURE"),
            ErrorCode::NetworkFailure => write!(f, "NETWORK_FAILURE"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::LookupFailure => write!(f, "LOOKUP_FAILURE"),
            ErrorCode::FilterFailure => write!(f, "FILTER_FAILURE"),
            ErrorCode::UnknownFailure => write!(f, "UNKNOWN_FAILURE"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// HTTP-style status code, when one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Raw upstream payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            status_code: None,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add the status code
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(status) = self.status_code {
            write!(f, " (status {})", status)?;
        }
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Expected outcome of a lookup
    Info,
    /// Operation failed for a caller-visible reason
    Warning,
    /// Upstream failure
    Error,
    /// Failure with no classification
    Critical,
}

impl ErrorSeverity {
    /// Level used when the error is logged
    pub fn log_level(&self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

/// Main error type for the transaction pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Failed to fetch transactions: {status_text}")]
    Transport { status: u16, status_text: String },

    #[error("API returned error status")]
    Application { response: serde_json::Value },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Transaction with id {id} not found")]
    NotFound { id: String },

    #[error("Failed to get transaction by ID")]
    LookupFailed,

    #[error("Failed to filter transactions by status")]
    StatusFilterFailed,

    #[error("Failed to filter transactions by type")]
    TypeFilterFailed,

    #[error("Unknown error occurred")]
    Unknown,
}

impl ClientError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Transport { .. } => ErrorCode::TransportFailure,
            ClientError::Application { .. } => ErrorCode::ApplicationFailure,
            ClientError::Network { .. } => ErrorCode::NetworkFailure,
            ClientError::NotFound { .. } => ErrorCode::NotFound,
            ClientError::LookupFailed => ErrorCode::LookupFailure,
            ClientError::StatusFilterFailed | ClientError::TypeFilterFailed => {
                ErrorCode::FilterFailure
            }
            ClientError::Unknown => ErrorCode::UnknownFailure,
        }
    }

    /// HTTP-style status code attached to the error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Raw upstream payload attached to the error
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            ClientError::Application { response } => Some(response),
            _ => None,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::Transport { .. } => ErrorSeverity::Error,
            ClientError::Application { .. } => ErrorSeverity::Error,
            ClientError::Network { .. } => ErrorSeverity::Error,
            ClientError::NotFound { .. } => ErrorSeverity::Info,
            ClientError::LookupFailed => ErrorSeverity::Warning,
            ClientError::StatusFilterFailed => ErrorSeverity::Warning,
            ClientError::TypeFilterFailed => ErrorSeverity::Warning,
            ClientError::Unknown => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        if let Some(status) = self.status_code() {
            details = details.with_status_code(status);
        }
        if let Some(payload) = self.payload() {
            details = details.with_detail(payload.clone());
        }

        match self {
            ClientError::Transport { status, .. } if *status >= 500 => {
                details = details.with_suggestion(
                    "The transaction service is unavailable, try again later.".to_string(),
                );
            }
            ClientError::Network { .. } => {
                details = details.with_suggestion(
                    "Check the api.base_url setting and your network connection.".to_string(),
                );
            }
            ClientError::NotFound { .. } => {
                details = details.with_suggestion(
                    "Check if the transaction ID is correct.".to_string(),
                );
                details = details.with_suggestion(
                    "Use the /api/transactions endpoint to list all transactions.".to_string(),
                );
            }
            _ => {}
        }

        details
    }

    /// Normalise a source failure: pipeline errors pass through unchanged,
    /// anything else becomes `fallback`.
    pub fn from_source(error: anyhow::Error, fallback: ClientError) -> ClientError {
        match error.downcast::<ClientError>() {
            Ok(native) => native,
            Err(foreign) => {
                log::debug!(
                    target: "txdash::error",
                    "Wrapping foreign source error as {}: {:#}",
                    fallback.code(),
                    foreign
                );
                fallback
            }
        }
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Load generation the error belongs to
    pub generation: Option<u64>,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            generation: None,
            data: serde_json::json!({}),
        }
    }

    /// Add the load generation
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &ClientError, context: &ErrorContext);
    /// Log debug information
    fn log_debug(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &ClientError, context: &ErrorContext) {
        let severity = error.severity();
        log::log!(
            target: "txdash::error",
            severity.log_level(),
            "[{}] {} ({:?}) - Operation: {} - Generation: {:?}",
            error.code(),
            error,
            severity,
            context.operation,
            context.generation
        );
        if let Some(payload) = error.payload() {
            log::debug!(target: "txdash::error", "Upstream payload: {}", payload);
        }
    }

    fn log_debug(&self, message: &str, context: &ErrorContext) {
        log::debug!(
            target: "txdash::error",
            "{} - Operation: {} - Generation: {:?} - Data: {}",
            message,
            context.operation,
            context.generation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::TransportFailure.to_string(), "TRANSPORT_FAILURE");
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorCode::UnknownFailure.to_string(), "UNKNOWN_FAILURE");
    }

    #[test]
    fn test_error_severity() {
        assert_eq!(ClientError::Unknown.severity(), ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Warning.log_level(), log::Level::Warn);
        assert_eq!(ErrorSeverity::Critical.log_level(), log::Level::Error);
        assert!(ErrorSeverity::Info < ErrorSeverity::Error);
    }

    #[test]
    fn test_transport_error() {
        let error = ClientError::Transport {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::TransportFailure);
        assert_eq!(error.status_code(), Some(500));
        assert!(error.payload().is_none());
        assert_eq!(
            error.to_string(),
            "Failed to fetch transactions: Internal Server Error"
        );
    }

    #[test]
    fn test_application_error_carries_payload() {
        let body = serde_json::json!({"status": "error", "data": {}});
        let error = ClientError::Application { response: body.clone() };
        assert_eq!(error.status_code(), None);
        assert_eq!(error.payload(), Some(&body));

        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::ApplicationFailure);
        assert_eq!(details.details, Some(body));
        assert!(details.status_code.is_none());
    }

    #[test]
    fn test_not_found_details() {
        let error = ClientError::NotFound { id: "TXN-404".to_string() };
        let details = error.to_details();
        assert_eq!(details.status_code, Some(404));
        assert!(details.message.contains("TXN-404"));
        assert!(!details.suggestions.is_empty());
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(ClientError::Unknown.to_string(), "Unknown error occurred");
        assert_eq!(ClientError::LookupFailed.to_string(), "Failed to get transaction by ID");
        assert_eq!(
            ClientError::StatusFilterFailed.to_string(),
            "Failed to filter transactions by status"
        );
        assert_eq!(
            ClientError::TypeFilterFailed.to_string(),
            "Failed to filter transactions by type"
        );
        assert!(ClientError::Unknown.status_code().is_none());
        assert!(ClientError::Unknown.payload().is_none());
    }

    #[test]
    fn test_from_source_keeps_native_errors() {
        let native = ClientError::Network { message: "connection refused".to_string() };
        let wrapped = ClientError::from_source(anyhow::Error::new(native.clone()), ClientError::LookupFailed);
        assert_eq!(wrapped, native);
    }

    #[test]
    fn test_from_source_wraps_foreign_errors() {
        let foreign = anyhow::anyhow!("disk on fire");
        let wrapped = ClientError::from_source(foreign, ClientError::TypeFilterFailed);
        assert_eq!(wrapped, ClientError::TypeFilterFailed);
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("load")
            .with_generation(3)
            .with_data("url", serde_json::json!("http://localhost/transactions/"));

        assert_eq!(context.operation, "load");
        assert_eq!(context.generation, Some(3));
        assert_eq!(context.data["url"], "http://localhost/transactions/");
    }
}
