//! JIRA profile configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Connection details for one JIRA instance.
///
/// Passwords are stored separately in the OS keyring under the profile name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The JIRA instance URL (e.g., "https://jira.example.com").
    pub url: String,

    /// The username used for Basic Auth.
    pub username: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: String, url: String, username: String) -> Self {
        Self {
            name,
            url,
            username,
        }
    }

    /// Validate this profile.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL cannot be empty",
                self.name
            )));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            )));
        }

        if self.username.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': username cannot be empty",
                self.name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, url: &str, username: &str) -> Profile {
        Profile::new(name.to_string(), url.to_string(), username.to_string())
    }

    #[test]
    fn test_valid_profile() {
        assert!(profile("work", "https://jira.example.com", "alice")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_http_url_accepted() {
        assert!(profile("local", "http://localhost:8080", "admin")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = profile("", "https://jira.example.com", "alice")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("name cannot be empty"));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let err = profile("my work", "https://jira.example.com", "alice")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("cannot contain whitespace"));
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = profile("work", "", "alice").validate().unwrap_err();
        assert!(err.to_string().contains("URL cannot be empty"));
    }

    #[test]
    fn test_invalid_url_scheme_rejected() {
        let err = profile("work", "jira.example.com", "alice")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_empty_username_rejected() {
        let err = profile("work", "https://jira.example.com", " ")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("username cannot be empty"));
    }

    #[test]
    fn test_profile_serialization() {
        let original = profile("work", "https://jira.example.com", "alice");
        let toml_str = toml::to_string(&original).unwrap();
        let parsed: Profile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, original);
    }
}
