//! JIRA API error types.

use thiserror::Error;

/// Errors that can occur while talking to the JIRA REST API.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Transport or response decoding error.
    #[error("JIRA request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("JIRA returned HTTP {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    /// An endpoint URL could not be built from the server URL.
    #[error("Invalid JIRA URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
