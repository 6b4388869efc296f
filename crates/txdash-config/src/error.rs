//! Error types for txdash-config

use serde::Serialize;
use thiserror::Error;

/// Machine-readable configuration error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    InvalidYaml,
    InvalidValue,
    IoError,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ConfigErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ConfigErrorCode::InvalidYaml => "INVALID_YAML",
            ConfigErrorCode::InvalidValue => "INVALID_VALUE",
            ConfigErrorCode::IoError => "IO_ERROR",
        };
        f.write_str(code)
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML format: {message}")]
    InvalidYaml { message: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("IO error reading {path}: {message}")]
    IoError { path: String, message: String },
}

impl ConfigError {
    /// Get the error code
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::IoError { .. } => ConfigErrorCode::IoError,
        }
    }

    /// Dotted path of the offending setting, for value errors
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Hints printed under the error at startup
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            ConfigError::FileNotFound { .. } => vec![
                "Use --config to point at the configuration file.",
                "Run with --print-config to get a default configuration.",
            ],
            ConfigError::InvalidYaml { .. } => {
                vec!["Check the indentation and quoting of the configuration file."]
            }
            ConfigError::InvalidValue { field, .. } if field.starts_with("api.") => {
                vec!["api.base_url must look like https://host/path (no /transactions/ suffix)."]
            }
            ConfigError::InvalidValue { .. } => vec![],
            ConfigError::IoError { .. } => vec!["Check the file permissions."],
        }
    }

    /// Multi-line report: `[CODE] message` followed by the suggestions
    pub fn report(&self) -> String {
        let mut report = format!("[{}] {}", self.code(), self);
        for suggestion in self.suggestions() {
            report.push_str("\n  - ");
            report.push_str(suggestion);
        }
        report
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
