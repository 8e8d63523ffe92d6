//! JIRA REST API access.
//!
//! The [`JiraApi`] trait covers the three listing calls the report needs.
//! [`JiraClient`] implements it over HTTP; tests substitute in-memory doubles.

mod client;
mod error;
mod types;

pub use client::JiraClient;
pub use error::JiraError;
pub use types::{Board, Issue, Sprint};

use crate::pagination::PageCursor;

/// Issue fields requested from the search API.
pub const ISSUE_FIELDS: &str = "summary";

/// One-page-at-a-time access to boards, sprints and issues.
///
/// Every call returns at most `cursor.limit` items starting at
/// `cursor.offset`. A page shorter than the limit marks the end of the listing.
pub trait JiraApi {
    /// Lists agile boards visible to the user.
    fn boards(&self, cursor: PageCursor) -> Result<Vec<Board>, JiraError>;

    /// Lists sprints of a board.
    fn sprints(&self, board_id: u64, cursor: PageCursor) -> Result<Vec<Sprint>, JiraError>;

    /// Searches issues with a JQL query, returning only `fields`.
    fn search_issues(
        &self,
        jql: &str,
        fields: &str,
        cursor: PageCursor,
    ) -> Result<Vec<Issue>, JiraError>;
}

impl<A: JiraApi + ?Sized> JiraApi for &A {
    fn boards(&self, cursor: PageCursor) -> Result<Vec<Board>, JiraError> {
        (**self).boards(cursor)
    }

    fn sprints(&self, board_id: u64, cursor: PageCursor) -> Result<Vec<Sprint>, JiraError> {
        (**self).sprints(board_id, cursor)
    }

    fn search_issues(
        &self,
        jql: &str,
        fields: &str,
        cursor: PageCursor,
    ) -> Result<Vec<Issue>, JiraError> {
        (**self).search_issues(jql, fields, cursor)
    }
}

/// Builds the JQL query selecting finished issues of a sprint.
///
/// Format: `sprint={sprint_id} and status=DONE`
#[must_use]
pub fn done_issues_query(sprint_id: u64) -> String {
    format!("sprint={} and status=DONE", sprint_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_issues_query() {
        assert_eq!(done_issues_query(37), "sprint=37 and status=DONE");
    }
}
