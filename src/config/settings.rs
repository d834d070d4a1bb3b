//! Client-wide settings.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings applied to every client built by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The name of the default profile to use.
    pub default_profile: Option<String>,
    /// Timeout for a single request, connect included.
    pub request_timeout_secs: u64,
    /// Overrides the `User-Agent` header.
    pub user_agent: Option<String>,
}

impl Settings {
    /// The `User-Agent` to send.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("jira-sdk/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_profile: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}
