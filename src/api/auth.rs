//! Authentication handling for the JIRA API.
//!
//! JIRA accepts Basic Auth (username + password). Passwords for configured
//! profiles can be kept in the OS keyring instead of the config file.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::error::{ApiError, Result};

/// The keyring service name for stored passwords.
const KEYRING_SERVICE: &str = "jira-sdk";

/// Basic Auth credentials for JIRA.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The username.
    username: String,
    /// The Base64-encoded authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create credentials from a username and password.
    ///
    /// The password is encoded immediately and not stored in clear.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            auth_header: build_auth_header(username, password),
        }
    }

    /// Create credentials for a profile, reading the password from the OS keyring.
    ///
    /// # Errors
    ///
    /// Returns an error if the password cannot be retrieved from the keyring.
    pub fn from_keyring(profile_name: &str, username: &str) -> Result<Self> {
        let password = get_password(profile_name)?;
        Ok(Self::new(username, &password))
    }

    /// The complete "Basic ..." header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

fn build_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}

fn entry(profile_name: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))
}

/// Store a profile's password in the OS keyring.
///
/// # Errors
///
/// Returns an error if the password cannot be stored.
pub fn store_password(profile_name: &str, password: &str) -> Result<()> {
    entry(profile_name)?
        .set_password(password)
        .map_err(|e| ApiError::Keyring(format!("failed to store password: {}", e)))
}

/// Retrieve a profile's password from the OS keyring.
///
/// # Errors
///
/// Returns an error if no password is stored or the keyring is unavailable.
pub fn get_password(profile_name: &str) -> Result<String> {
    entry(profile_name)?
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve password: {}", e)))
}

/// Delete a profile's password from the OS keyring.
///
/// # Errors
///
/// Returns an error if the password cannot be deleted.
pub fn delete_password(profile_name: &str) -> Result<()> {
    entry(profile_name)?
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete password: {}", e)))
}

/// Check whether a password is stored for a profile.
pub fn has_password(profile_name: &str) -> bool {
    get_password(profile_name).is_ok()
}
