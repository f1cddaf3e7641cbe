//! Error types and handling for picam core

use thiserror::Error;

/// Result type alias for picam operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for picam core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Camera API errors
    #[error("Camera API error: {0}")]
    Api(#[from] ApiError),

    /// View errors (rendering, prompts, saving downloads)
    #[error("View error: {0}")]
    View(#[from] ViewError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Camera API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

/// View errors
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Unknown modal: {id}")]
    UnknownModal { id: String },

    #[error("Failed to save download {name}: {message}")]
    SaveFailed { name: String, message: String },

    #[error("Prompt failed: {message}")]
    Prompt { message: String },
}

impl ApiError {
    /// HTTP status code when the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Error {
    /// Whether the error came back from the camera as a non-success status
    pub fn is_server_rejection(&self) -> bool {
        matches!(self, Error::Api(e) if e.status().is_some())
    }
}
