//! Crate-level error type.
//!
//! Operations that cross configuration and API boundaries, like
//! [`connect`](crate::connect), return [`Error`]. Plain client calls return
//! [`ApiError`] directly.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Any error this crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A short message suitable for showing to end users.
    pub fn user_message(&self) -> String {
        match self {
            Error::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Set JIRA_SDK_CONFIG.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::ProfileNotFound(name) => format!("Profile '{}' not found.", name),
                ConfigError::NoProfiles => {
                    "No profile selected. Name one or set settings.default_profile.".to_string()
                }
            },
            Error::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Please check your username and password.".to_string()
                }
                ApiError::Forbidden => {
                    "Access denied. You don't have permission to access this resource.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(msg) => format!("JIRA rejected the request: {}", msg),
                ApiError::Network(_) => {
                    "Connection failed. Please check your network and JIRA URL.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid JIRA URL in configuration.".to_string(),
                ApiError::Keyring(_) => {
                    "Could not access secure storage. Please store the password again.".to_string()
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from JIRA.".to_string()
                }
                ApiError::UnsupportedResource(name) => {
                    format!("'{}' is not a supported JIRA resource.", name)
                }
                ApiError::MissingPathSegment { .. } => e.to_string(),
            },
            Error::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
        }
    }
}

/// Result type for crate-level operations.
pub type Result<T> = std::result::Result<T, Error>;
