//! JIRA connection settings.

use serde::Deserialize;
use std::fmt;
use url::Url;

/// Contents of the config file. Every key may be overridden, so all are optional here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsFile {
    /// JIRA server URL (e.g. "https://jira.example.com").
    pub url: Option<String>,

    /// User name for basic authentication.
    pub user: Option<String>,

    /// Password or API token for basic authentication.
    pub password: Option<String>,
}

/// Values given on the command line or through the environment.
///
/// Each value set here wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl SettingsOverrides {
    /// Returns true if every setting is present, making the config file optional.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.url.is_some() && self.user.is_some() && self.password.is_some()
    }
}

/// Fully resolved connection settings.
#[derive(Clone)]
pub struct JiraSettings {
    /// JIRA server URL.
    pub url: Url,

    /// User name.
    pub user: String,

    /// Password or API token.
    pub password: String,
}

impl fmt::Debug for JiraSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraSettings")
            .field("url", &self.url.as_str())
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
