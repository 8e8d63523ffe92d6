//! Runner error types.

use crate::selection::SelectionError;

/// Errors that can occur during a report run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// JIRA API errors.
    #[error(transparent)]
    Jira(#[from] crate::jira::JiraError),

    /// Invalid board or sprint choice, or prompt I/O errors.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Report rendering and output errors.
    #[error(transparent)]
    Report(#[from] crate::report::ReportError),
}

impl RunnerError {
    /// Returns true if the user typed a choice that does not match any listed item.
    #[must_use]
    pub fn is_invalid_selection(&self) -> bool {
        matches!(
            self,
            Self::Selection(SelectionError::InvalidSelection { .. })
        )
    }
}
