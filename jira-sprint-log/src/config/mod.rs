//! JIRA connection settings.
//!
//! Settings come from a TOML file in the user's home directory, with
//! individual values overridable from the command line or environment:
//!
//! ```toml
//! url = "http://jira.example.com:8080"
//! user = "USER123"
//! password = "Password123"
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{JiraSettings, SettingsFile, SettingsOverrides};

use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// File name of the config file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".jira-sprint-log.toml";

/// Example config file shown alongside configuration errors.
pub const CONFIG_EXAMPLE: &str = r#"url = "http://jira.example.com:8080"
user = "USER123"
password = "Password123"
"#;

/// Returns `~/.jira-sprint-log.toml`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the home directory is unknown.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Explains where the config file belongs and what it looks like.
#[must_use]
pub fn config_help(path: &Path) -> String {
    format!(
        "This is config example. Should be in {}.\n\n{}",
        path.display(),
        CONFIG_EXAMPLE
    )
}

/// Reads and parses a config file.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if `path` does not exist,
/// [`ConfigError::IoError`] if it cannot be read, or
/// [`ConfigError::TomlError`] if it is not valid TOML.
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    debug!(path = %path.display(), "Reading config file");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Merges file values with overrides and validates the result.
///
/// # Errors
///
/// Returns [`ConfigError::MissingKey`] for the first setting absent from both
/// sources, or [`ConfigError::InvalidUrl`] if the URL does not parse.
pub fn resolve_settings(
    file: SettingsFile,
    overrides: SettingsOverrides,
) -> Result<JiraSettings, ConfigError> {
    let url = overrides
        .url
        .or(file.url)
        .ok_or(ConfigError::MissingKey { key: "url" })?;
    let user = overrides
        .user
        .or(file.user)
        .ok_or(ConfigError::MissingKey { key: "user" })?;
    let password = overrides
        .password
        .or(file.password)
        .ok_or(ConfigError::MissingKey { key: "password" })?;

    let url = Url::parse(url.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: url.clone(),
        source,
    })?;

    Ok(JiraSettings {
        url,
        user,
        password,
    })
}

/// Loads settings from `path`, applying `overrides` on top.
///
/// The file may be missing when `overrides` already provides every setting.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is required but unreadable or invalid,
/// or if a setting is missing.
pub fn load_settings(
    path: &Path,
    overrides: SettingsOverrides,
) -> Result<JiraSettings, ConfigError> {
    let file = if !path.exists() && overrides.is_complete() {
        debug!(path = %path.display(), "No config file, using overrides only");
        SettingsFile::default()
    } else {
        load_settings_file(path)?
    };

    let settings = resolve_settings(file, overrides)?;
    info!(server = %settings.url, user = %settings.user, "Loaded JIRA settings");
    Ok(settings)
}
