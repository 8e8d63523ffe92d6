//! Selection error types.

use thiserror::Error;

/// Errors that can occur while prompting for a selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The typed text is not a number in the listed range.
    #[error("Invalid {name}.")]
    InvalidSelection {
        /// Kind of item being selected (e.g. "board").
        name: String,
        /// The offending input token.
        input: String,
    },

    /// Failed to write the menu or read the answer.
    #[error("Failed to prompt for {name}: {source}")]
    Io {
        /// Kind of item being selected (e.g. "sprint").
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
