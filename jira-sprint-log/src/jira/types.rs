//! Boards, sprints and issues as seen by the report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An agile board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Board {
    /// Board identifier.
    pub id: u64,

    /// Display name.
    pub name: String,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A sprint on an agile board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprint {
    /// Sprint identifier, used in JQL `sprint=<id>` filters.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Board the sprint was listed from.
    pub board_id: u64,
}

impl fmt::Display for Sprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An issue listed in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Issue key (e.g. "ASD-1").
    pub key: String,

    /// Browser URL of the issue.
    pub permalink: String,

    /// Issue summary text.
    pub summary: String,
}
