//! Configuration management.
//!
//! Profiles and settings are read from a TOML file:
//!
//! ```toml
//! [settings]
//! default_profile = "work"
//! request_timeout_secs = 30
//!
//! [[profiles]]
//! name = "work"
//! url = "https://jira.example.com"
//! username = "alice"
//! ```

mod profile;
mod settings;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use profile::Profile;
pub use settings::{Settings, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "JIRA_SDK_CONFIG";

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The config parsed but is inconsistent.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// No profile with the requested name.
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// No profile was named and none is configured as default.
    #[error("No profile selected and no default profile configured")]
    NoProfiles,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    pub profiles: Vec<Profile>,
}

impl Config {
    /// Load from `$JIRA_SDK_CONFIG`, or the platform default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be located, read, parsed or validated.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        contents.parse()
    }

    /// Check every profile and the default profile reference.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for invalid or duplicate profiles or an
    /// unknown default.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !seen.insert(profile.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        if let Some(default) = &self.settings.default_profile {
            if !seen.contains(default.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "default profile '{}' does not exist",
                    default
                )));
            }
        }

        Ok(())
    }

    /// Find a profile by name.
    ///
    /// # Errors
    ///
    /// Returns `ProfileNotFound` if no profile has that name.
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    /// Pick the named profile, else the default, else the only one.
    ///
    /// # Errors
    ///
    /// Returns `ProfileNotFound` for an unknown name and `NoProfiles` when
    /// nothing can be chosen.
    pub fn select_profile(&self, name: Option<&str>) -> Result<&Profile> {
        match name.or(self.settings.default_profile.as_deref()) {
            Some(name) => self.profile(name),
            None => match self.profiles.as_slice() {
                [only] => Ok(only),
                _ => Err(ConfigError::NoProfiles),
            },
        }
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// The config file path: `$JIRA_SDK_CONFIG`, else `<config dir>/jira-sdk/config.toml`.
///
/// # Errors
///
/// Returns `NoConfigDir` if the platform config directory is unknown.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("jira-sdk").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const SAMPLE: &str = r#"
[settings]
default_profile = "work"
request_timeout_secs = 10

[[profiles]]
name = "work"
url = "https://jira.example.com"
username = "alice"

[[profiles]]
name = "local"
url = "http://localhost:8080"
username = "admin"
"#;

    #[test]
    fn test_parse_sample() {
        let config: Config = SAMPLE.parse().unwrap();
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.settings.request_timeout_secs, 10);
        assert_eq!(config.profile("local").unwrap().username, "admin");
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: Config = "".parse().unwrap();
        assert!(config.profiles.is_empty());
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_duplicate_profile_rejected() {
        let text = r#"
[[profiles]]
name = "work"
url = "https://a.example.com"
username = "a"

[[profiles]]
name = "work"
url = "https://b.example.com"
username = "b"
"#;
        let err = text.parse::<Config>().unwrap_err();
        assert!(err.to_string().contains("duplicate profile name 'work'"));
    }

    #[test]
    fn test_unknown_default_rejected() {
        let text = r#"
[settings]
default_profile = "missing"
"#;
        let err = text.parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = "[[profiles]\nname =".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_select_profile() {
        let config: Config = SAMPLE.parse().unwrap();
        assert_eq!(config.select_profile(None).unwrap().name, "work");
        assert_eq!(config.select_profile(Some("local")).unwrap().name, "local");
        assert!(matches!(
            config.select_profile(Some("nope")),
            Err(ConfigError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn test_select_only_profile_without_default() {
        let mut config: Config = SAMPLE.parse().unwrap();
        config.settings.default_profile = None;
        assert!(matches!(
            config.select_profile(None),
            Err(ConfigError::NoProfiles)
        ));

        config.profiles.truncate(1);
        assert_eq!(config.select_profile(None).unwrap().name, "work");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.profiles[0].url, "https://jira.example.com");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        std::env::set_var(CONFIG_PATH_ENV, &path);
        let resolved = config_path();
        let loaded = Config::load();
        std::env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(resolved.unwrap(), path);
        assert_eq!(loaded.unwrap().profiles.len(), 2);
    }

    #[test]
    #[serial]
    fn test_config_path_default() {
        std::env::remove_var(CONFIG_PATH_ENV);
        if let Ok(path) = config_path() {
            assert!(path.ends_with("jira-sdk/config.toml"));
        }
    }
}
