//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while resolving JIRA connection settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Config file is absent and the settings were not given otherwise.
    #[error("Config file {path} not found.")]
    MissingFile { path: String },

    /// A required setting is neither in the file nor given otherwise.
    #[error("Config file does not have '{key}' key.")]
    MissingKey { key: &'static str },

    /// The server URL does not parse.
    #[error("Invalid JIRA URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// No home directory to look for the default config file in.
    #[error("Could not determine the home directory")]
    NoHomeDirectory,
}
