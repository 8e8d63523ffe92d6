//! Run summary.

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Name of the selected board.
    pub board: String,

    /// Names of the selected sprints, in selection order.
    pub sprints: Vec<String>,

    /// Number of issues written to the report.
    pub issues: usize,
}
