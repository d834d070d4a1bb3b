//! jira-sdk - a typed client for the JIRA REST and Agile APIs.
//!
//! Each [`JiraClient`] method maps one logical resource plus its parameters
//! onto one HTTP GET and returns the deserialized result.
//!
//! ```no_run
//! # async fn run() -> Result<(), jira_sdk::ApiError> {
//! let client = jira_sdk::JiraClient::new("https://jira.example.com", "alice", "secret")?;
//! let issue = client.get_issue("ABC-1").await?;
//! println!("{}", issue);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;

pub use api::{ApiError, JiraClient, Resource};
pub use config::{Config, Profile, Settings};
pub use error::{Error, Result};

/// Build a client for a profile from the config file.
///
/// Uses the named profile, else the configured default, else the only
/// profile. The password is read from the OS keyring.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, no profile
/// matches, or the password is not in the keyring.
pub fn connect(profile: Option<&str>) -> Result<JiraClient> {
    let config = Config::load()?;
    connect_with(&config, profile)
}

/// Like [`connect`], with an already loaded [`Config`].
///
/// # Errors
///
/// Returns an error if no profile matches or the password is not in the keyring.
pub fn connect_with(config: &Config, profile: Option<&str>) -> Result<JiraClient> {
    let profile = config.select_profile(profile)?;
    Ok(JiraClient::from_profile(profile, &config.settings)?)
}
