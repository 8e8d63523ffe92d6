//! Orchestrates a sprint report: board, sprints, finished issues, HTML.

mod config;
mod error;
mod summary;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use summary::RunSummary;

use crate::jira::{done_issues_query, Board, Issue, JiraApi, Sprint, ISSUE_FIELDS};
use crate::pagination::paginate;
use crate::report::ReportRenderer;
use crate::selection::Selector;
use std::io::{BufRead, Write};
use tracing::{info, info_span};

/// Runs the interactive report workflow against a JIRA API.
pub struct Runner<A, R, W> {
    api: A,
    selector: Selector<R, W>,
    renderer: ReportRenderer,
    config: RunnerConfig,
}

impl<A, R, W> Runner<A, R, W>
where
    A: JiraApi,
    R: BufRead,
    W: Write,
{
    /// Builds a runner prompting through `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Report`] if the report template fails to load.
    pub fn new(api: A, selector: Selector<R, W>, config: RunnerConfig) -> Result<Self, RunnerError> {
        Ok(Self {
            api,
            selector,
            renderer: ReportRenderer::new()?,
            config,
        })
    }

    /// Executes the full workflow, writing the report to `out`.
    ///
    /// Any error aborts the run before the report is written.
    pub fn run<O: Write>(&mut self, out: O) -> Result<RunSummary, RunnerError> {
        let span = info_span!("run", page_size = self.config.page_size().get());
        let _enter = span.enter();

        let board = self.select_board()?;
        let sprints = self.select_sprints(&board)?;
        let issues = self.fetch_done_issues(&sprints)?;

        let sprint_names: Vec<String> = sprints.into_iter().map(|sprint| sprint.name).collect();
        self.renderer.render(out, &sprint_names, &issues)?;
        info!(issues = issues.len(), "Report written");

        Ok(RunSummary {
            board: board.name,
            sprints: sprint_names,
            issues: issues.len(),
        })
    }

    /// Lists every board and prompts for one.
    pub fn select_board(&mut self) -> Result<Board, RunnerError> {
        let api = &self.api;
        let boards: Vec<Board> = paginate(|cursor| api.boards(cursor))
            .page_size(self.config.page_size())
            .collect::<Result<_, _>>()?;
        info!(count = boards.len(), "Fetched boards");

        let board = self.selector.select_one(&boards, "board")?.clone();
        info!(board_id = board.id, board = %board.name, "Selected board");
        Ok(board)
    }

    /// Lists every sprint of `board` and prompts for one or more.
    pub fn select_sprints(&mut self, board: &Board) -> Result<Vec<Sprint>, RunnerError> {
        let api = &self.api;
        let board_id = board.id;
        let sprints: Vec<Sprint> = paginate(|cursor| api.sprints(board_id, cursor))
            .page_size(self.config.page_size())
            .collect::<Result<_, _>>()?;
        info!(board_id, count = sprints.len(), "Fetched sprints");

        let selected = self
            .selector
            .select_many(&sprints, "sprint")?
            .map(|sprint| sprint.cloned())
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = selected.len(), "Selected sprints");
        Ok(selected)
    }

    /// Fetches the finished issues of each sprint, in sprint order.
    pub fn fetch_done_issues(&self, sprints: &[Sprint]) -> Result<Vec<Issue>, RunnerError> {
        let api = &self.api;
        let page_size = self.config.page_size();

        let issues = sprints
            .iter()
            .flat_map(|sprint| {
                let jql = done_issues_query(sprint.id);
                info!(sprint_id = sprint.id, jql = %jql, "Searching issues");
                paginate(move |cursor| api.search_issues(&jql, ISSUE_FIELDS, cursor))
                    .page_size(page_size)
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = issues.len(), "Fetched issues");
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::JiraError;
    use crate::pagination::PageCursor;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::num::NonZeroUsize;

    fn page<T: Clone>(items: &[T], cursor: PageCursor) -> Vec<T> {
        items
            .iter()
            .skip(cursor.offset)
            .take(cursor.limit)
            .cloned()
            .collect()
    }

    #[derive(Default)]
    struct StubJira {
        boards: Vec<Board>,
        sprints: Vec<Sprint>,
        issues: Vec<(u64, Issue)>,
        queries: RefCell<Vec<(String, String, PageCursor)>>,
        fail_search: bool,
    }

    impl JiraApi for StubJira {
        fn boards(&self, cursor: PageCursor) -> Result<Vec<Board>, JiraError> {
            Ok(page(&self.boards, cursor))
        }

        fn sprints(&self, board_id: u64, cursor: PageCursor) -> Result<Vec<Sprint>, JiraError> {
            let sprints: Vec<Sprint> = self
                .sprints
                .iter()
                .filter(|sprint| sprint.board_id == board_id)
                .cloned()
                .collect();
            Ok(page(&sprints, cursor))
        }

        fn search_issues(
            &self,
            jql: &str,
            fields: &str,
            cursor: PageCursor,
        ) -> Result<Vec<Issue>, JiraError> {
            self.queries
                .borrow_mut()
                .push((jql.to_string(), fields.to_string(), cursor));
            if self.fail_search {
                return Err(JiraError::Status {
                    url: "http://x/rest/api/2/search".to_string(),
                    status: 500,
                    body: String::new(),
                });
            }
            let issues: Vec<Issue> = self
                .issues
                .iter()
                .filter(|(sprint_id, _)| done_issues_query(*sprint_id) == jql)
                .map(|(_, issue)| issue.clone())
                .collect();
            Ok(page(&issues, cursor))
        }
    }

    fn board(id: u64) -> Board {
        Board {
            id,
            name: format!("Board {id}"),
        }
    }

    fn sprint(id: u64, board_id: u64) -> Sprint {
        Sprint {
            id,
            name: format!("Sprint {id}"),
            board_id,
        }
    }

    fn issue(n: u32) -> Issue {
        Issue {
            key: format!("ASD-{n}"),
            permalink: format!("http://x/browse/ASD-{n}"),
            summary: format!("Issue {n}"),
        }
    }

    fn stub() -> StubJira {
        StubJira {
            boards: vec![board(1), board(2), board(3)],
            sprints: vec![sprint(10, 1), sprint(11, 1), sprint(12, 1), sprint(20, 2)],
            issues: vec![(10, issue(1)), (11, issue(2)), (11, issue(3)), (12, issue(4))],
            ..Default::default()
        }
    }

    type TestRunner<'a> = Runner<&'a StubJira, Cursor<Vec<u8>>, Vec<u8>>;

    fn runner<'a>(api: &'a StubJira, input: &str, page_size: usize) -> TestRunner<'a> {
        let selector = Selector::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let config = RunnerConfig::new(NonZeroUsize::new(page_size).unwrap());
        Runner::new(api, selector, config).unwrap()
    }

    #[test]
    fn selects_board_by_number() {
        let api = stub();
        let board = runner(&api, "2\n", 2).select_board().unwrap();
        assert_eq!(board, self::board(2));
    }

    #[test]
    fn selects_sprints_of_board_only() {
        let api = stub();
        let sprints = runner(&api, "3,1\n", 2)
            .select_sprints(&board(1))
            .unwrap();
        assert_eq!(sprints, vec![sprint(12, 1), sprint(10, 1)]);
    }

    #[test]
    fn fetches_issues_with_done_query_per_sprint() {
        let api = stub();
        let issues = runner(&api, "", 50)
            .fetch_done_issues(&[sprint(11, 1), sprint(10, 1)])
            .unwrap();

        assert_eq!(issues, vec![issue(2), issue(3), issue(1)]);
        let queries = api.queries.borrow();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].0, "sprint=11 and status=DONE");
        assert_eq!(queries[0].1, "summary");
        assert_eq!(queries[1].0, "sprint=10 and status=DONE");
    }

    #[test]
    fn fetches_issues_across_pages() {
        let api = stub();
        let issues = runner(&api, "", 1)
            .fetch_done_issues(&[sprint(11, 1)])
            .unwrap();

        assert_eq!(issues, vec![issue(2), issue(3)]);
        let offsets: Vec<usize> = api.queries.borrow().iter().map(|q| q.2.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
    }

    #[test]
    fn run_renders_selected_sprints_and_issues() {
        let api = stub();
        let mut out = Vec::new();

        let summary = runner(&api, "1\n1,2\n", 2).run(&mut out).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                board: "Board 1".to_string(),
                sprints: vec!["Sprint 10".to_string(), "Sprint 11".to_string()],
                issues: 3,
            }
        );
        let html = String::from_utf8(out).unwrap();
        assert!(html.contains("<h2>Sprint 10, Sprint 11</h2>"));
        assert!(html.contains(r#"<a href="http://x/browse/ASD-1">ASD-1</a> - Issue 1"#));
        assert!(html.contains("ASD-3"));
        assert!(!html.contains("ASD-4"));
    }

    #[test]
    fn invalid_board_choice_aborts_without_output() {
        let api = stub();
        let mut out = Vec::new();

        let error = runner(&api, "4\n", 50).run(&mut out).unwrap_err();

        assert!(error.is_invalid_selection());
        assert_eq!(error.to_string(), "Invalid board.");
        assert!(out.is_empty());
        assert!(api.queries.borrow().is_empty());
    }

    #[test]
    fn invalid_sprint_choice_aborts_before_searching() {
        let api = stub();
        let mut out = Vec::new();

        let error = runner(&api, "1\n1,9\n", 50).run(&mut out).unwrap_err();

        assert!(error.is_invalid_selection());
        assert!(out.is_empty());
        assert!(api.queries.borrow().is_empty());
    }

    #[test]
    fn input_ending_at_sprint_prompt_is_invalid_sprint() {
        let api = stub();
        let mut out = Vec::new();

        let error = runner(&api, "1\n", 50).run(&mut out).unwrap_err();

        assert!(error.is_invalid_selection());
        assert_eq!(error.to_string(), "Invalid sprint.");
        assert!(out.is_empty());
        assert!(api.queries.borrow().is_empty());
    }

    #[test]
    fn search_failure_propagates() {
        let api = StubJira {
            fail_search: true,
            ..stub()
        };
        let mut out = Vec::new();

        let error = runner(&api, "1\n1\n", 50).run(&mut out).unwrap_err();

        assert!(matches!(
            error,
            RunnerError::Jira(JiraError::Status { status: 500, .. })
        ));
        assert!(!error.is_invalid_selection());
        assert!(out.is_empty());
        assert_eq!(api.queries.borrow().len(), 1);
    }
}
