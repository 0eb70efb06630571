//! Error types and handling for the turfbook service

use thiserror::Error;

/// Main error type for turfbook
#[derive(Error, Debug)]
pub enum TurfbookError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Submitted input failed validation
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The venue catalog could not be acquired
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// A notification could not be relayed
    #[error("Notification error: {message}")]
    Notification { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TurfbookError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a new notification error
    pub fn notification<S: Into<String>>(message: S) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TurfbookError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TurfbookError::Validation { message } => message.clone(),
            TurfbookError::Catalog { .. } => {
                "Unable to load the turf list. Please try again later.".to_string()
            }
            TurfbookError::Notification { .. } => "Email failed".to_string(),
            TurfbookError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TurfbookError::General { message } => message.clone(),
        }
    }
}
