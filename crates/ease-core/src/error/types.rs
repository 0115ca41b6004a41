//! Core error type

use thiserror::Error;

/// Result type alias for evaluator operations
pub type EaseResult<T> = Result<T, EaseError>;

/// Main error type for the evaluator and its loaders
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EaseError {
    /// The flow (or one of its steps) cannot be scored
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// A verdict failed schema validation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Deserialization errors for JSON, YAML or TOML input
    #[error("{format} parse error: {message}")]
    Parse { message: String, format: String },
}

impl EaseError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "EASE_INVALID_INPUT",
            Self::Validation { .. } => "EASE_VALIDATION",
            Self::Config { .. } => "EASE_CONFIG",
            Self::Io { .. } => "EASE_IO",
            Self::Parse { .. } => "EASE_PARSE",
        }
    }

    /// Human-readable message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. } => message,
            Self::Validation { message, .. } => message,
            Self::Config { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Parse { message, .. } => message,
        }
    }

    /// The offending field, when the error can be pinned to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } | Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// True for errors caused by the caller's input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::Parse { .. })
    }
}
