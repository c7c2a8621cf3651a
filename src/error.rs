//! Error types and handling for the Krushi dashboard

use thiserror::Error;

/// Main error type for the Krushi dashboard
#[derive(Error, Debug)]
pub enum KrushiError {
    /// A required form field was left empty
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The backend answered with `success: false`
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// Transport failure or an undecodable response body
    #[error("Network error: {message}")]
    Network { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl KrushiError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new rejection carrying the server-supplied text
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The bare message without the variant prefix
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            KrushiError::Validation { message }
            | KrushiError::Rejected { message }
            | KrushiError::Network { message }
            | KrushiError::Config { message } => message.clone(),
            KrushiError::Io { source } => source.to_string(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            KrushiError::Validation { message } => message.clone(),
            KrushiError::Rejected { message } => message.clone(),
            KrushiError::Network { message } => format!("Network error: {message}"),
            KrushiError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            KrushiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for KrushiError {
    fn from(err: reqwest::Error) -> Self {
        KrushiError::network(err.to_string())
    }
}

impl From<serde_json::Error> for KrushiError {
    fn from(err: serde_json::Error) -> Self {
        KrushiError::network(err.to_string())
    }
}
