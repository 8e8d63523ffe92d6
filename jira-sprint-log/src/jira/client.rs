//! Blocking JIRA REST client.

use super::{Board, Issue, JiraApi, JiraError, Sprint};
use crate::pagination::PageCursor;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

const BOARDS_PATH: &str = "rest/agile/1.0/board";
const SEARCH_PATH: &str = "rest/api/2/search";

/// JIRA client authenticated with HTTP basic credentials.
pub struct JiraClient {
    http: Client,
    base_url: Url,
    user: String,
    password: String,
}

impl JiraClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: Url,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, JiraError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = with_trailing_slash(base_url);
        info!(server = %base_url, "Created JIRA client");

        Ok(Self {
            http,
            base_url,
            user: user.into(),
            password: password.into(),
        })
    }

    /// Returns the server URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends an authenticated GET and decodes the JSON response.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, JiraError> {
        let url = self.base_url.join(path)?;
        debug!(url = %url, ?query, "GET");

        let response = self
            .http
            .get(url.clone())
            .basic_auth(&self.user, Some(&self.password))
            .header(ACCEPT, "application/json")
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = body_text(response.text());
            return Err(JiraError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json()?)
    }
}

impl JiraApi for JiraClient {
    fn boards(&self, cursor: PageCursor) -> Result<Vec<Board>, JiraError> {
        let page: ValuesPage<Board> = self.get_json(BOARDS_PATH, &cursor_query(cursor))?;
        Ok(page.values)
    }

    fn sprints(&self, board_id: u64, cursor: PageCursor) -> Result<Vec<Sprint>, JiraError> {
        let path = format!("{BOARDS_PATH}/{board_id}/sprint");
        let page: ValuesPage<RawSprint> = self.get_json(&path, &cursor_query(cursor))?;
        Ok(page
            .values
            .into_iter()
            .map(|raw| raw.into_sprint(board_id))
            .collect())
    }

    fn search_issues(
        &self,
        jql: &str,
        fields: &str,
        cursor: PageCursor,
    ) -> Result<Vec<Issue>, JiraError> {
        let mut query = vec![("jql", jql.to_string()), ("fields", fields.to_string())];
        query.extend(cursor_query(cursor));

        let page: SearchPage = self.get_json(SEARCH_PATH, &query)?;
        page.issues
            .into_iter()
            .map(|raw| raw.into_issue(&self.base_url))
            .collect()
    }
}

/// Agile API page envelope (`/board`, `/board/{id}/sprint`).
#[derive(Debug, Deserialize)]
struct ValuesPage<T> {
    #[serde(default = "Vec::new")]
    values: Vec<T>,
}

/// Search API page envelope.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    issues: Vec<RawIssue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSprint {
    id: u64,
    name: String,
    origin_board_id: Option<u64>,
}

impl RawSprint {
    fn into_sprint(self, listed_board_id: u64) -> Sprint {
        Sprint {
            id: self.id,
            name: self.name,
            board_id: self.origin_board_id.unwrap_or(listed_board_id),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    key: String,
    #[serde(default)]
    fields: RawIssueFields,
}

#[derive(Debug, Default, Deserialize)]
struct RawIssueFields {
    #[serde(default)]
    summary: String,
}

impl RawIssue {
    fn into_issue(self, base_url: &Url) -> Result<Issue, JiraError> {
        let permalink = permalink(base_url, &self.key)?;
        Ok(Issue {
            key: self.key,
            permalink,
            summary: self.fields.summary,
        })
    }
}

/// Browser URL of an issue: `<server>/browse/<key>`.
fn permalink(base_url: &Url, key: &str) -> Result<String, JiraError> {
    Ok(base_url.join(&format!("browse/{key}"))?.to_string())
}

fn cursor_query(cursor: PageCursor) -> [(&'static str, String); 2] {
    [
        ("startAt", cursor.offset.to_string()),
        ("maxResults", cursor.limit.to_string()),
    ]
}

/// Body of an error response, or a note saying why it could not be read.
fn body_text<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}

/// Makes relative joins append to the server path instead of replacing its
/// last segment (e.g. `https://host/jira` + `rest/...`).
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn keeps_server_context_path() {
        let base = with_trailing_slash(url("https://jira.example.com/jira"));
        assert_eq!(base.as_str(), "https://jira.example.com/jira/");
        assert_eq!(
            base.join(BOARDS_PATH).unwrap().as_str(),
            "https://jira.example.com/jira/rest/agile/1.0/board"
        );

        let root = with_trailing_slash(url("http://webvrt59:8080"));
        assert_eq!(root.as_str(), "http://webvrt59:8080/");
    }

    #[test]
    fn builds_issue_permalink() {
        let base = with_trailing_slash(url("http://x"));
        assert_eq!(permalink(&base, "ASD-1").unwrap(), "http://x/browse/ASD-1");
    }

    #[test]
    fn builds_cursor_query() {
        let query = cursor_query(PageCursor {
            offset: 100,
            limit: 50,
        });
        assert_eq!(
            query,
            [
                ("startAt", "100".to_string()),
                ("maxResults", "50".to_string())
            ]
        );
    }

    #[test]
    fn parses_board_page() {
        let json = r#"{
            "maxResults": 2, "startAt": 0, "isLast": false,
            "values": [
                {"id": 84, "self": "http://x/rest/agile/1.0/board/84", "name": "scrum board", "type": "scrum"},
                {"id": 92, "self": "http://x/rest/agile/1.0/board/92", "name": "kanban board", "type": "kanban"}
            ]
        }"#;

        let page: ValuesPage<Board> = serde_json::from_str(json).unwrap();

        assert_eq!(
            page.values,
            vec![
                Board { id: 84, name: "scrum board".to_string() },
                Board { id: 92, name: "kanban board".to_string() },
            ]
        );
    }

    #[test]
    fn parses_sprint_page_and_fills_board() {
        let json = r#"{
            "maxResults": 50, "startAt": 0, "isLast": true,
            "values": [
                {"id": 37, "state": "closed", "name": "Sprint 7", "originBoardId": 5},
                {"id": 72, "state": "future", "name": "Sprint 8"}
            ]
        }"#;

        let page: ValuesPage<RawSprint> = serde_json::from_str(json).unwrap();
        let sprints: Vec<Sprint> = page.values.into_iter().map(|s| s.into_sprint(9)).collect();

        assert_eq!(sprints[0], Sprint { id: 37, name: "Sprint 7".to_string(), board_id: 5 });
        assert_eq!(sprints[1], Sprint { id: 72, name: "Sprint 8".to_string(), board_id: 9 });
    }

    #[test]
    fn parses_search_page() {
        let json = r#"{
            "expand": "names,schema", "startAt": 0, "maxResults": 50, "total": 1,
            "issues": [
                {"id": "10001", "key": "ASD-1", "self": "http://x/rest/api/2/issue/10001",
                 "fields": {"summary": "Fix bug"}}
            ]
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        let base = with_trailing_slash(url("http://x"));
        let issues: Vec<Issue> = page
            .issues
            .into_iter()
            .map(|raw| raw.into_issue(&base))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            issues,
            vec![Issue {
                key: "ASD-1".to_string(),
                permalink: "http://x/browse/ASD-1".to_string(),
                summary: "Fix bug".to_string(),
            }]
        );
    }

    #[test]
    fn empty_page_has_no_items() {
        let page: ValuesPage<Board> = serde_json::from_str(r#"{"isLast": true}"#).unwrap();
        assert!(page.values.is_empty());

        let page: SearchPage = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(page.issues.is_empty());
    }

    #[test]
    fn error_body_keeps_read_failures_visible() {
        assert_eq!(body_text::<String>(Ok("boom".to_string())), "boom");
        assert_eq!(
            body_text(Err("connection closed")),
            "<unreadable body: connection closed>"
        );
    }

    #[test]
    fn client_normalizes_base_url() {
        let client = JiraClient::new(url("https://jira.example.com/jira"), "root", "root").unwrap();
        assert_eq!(client.base_url().as_str(), "https://jira.example.com/jira/");
    }
}
