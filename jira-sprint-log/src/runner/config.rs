//! Runner configuration.

use crate::pagination::DEFAULT_PAGE_SIZE;
use std::num::NonZeroUsize;

/// Configuration for a report run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Items requested per page from JIRA.
    page_size: NonZeroUsize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page_size }
    }

    /// Returns the number of items requested per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }
}
