#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod jira;
pub mod pagination;
pub mod report;
pub mod runner;
pub mod selection;

pub use config::{
    config_help, default_config_path, load_settings, load_settings_file, resolve_settings,
    ConfigError, JiraSettings, SettingsFile, SettingsOverrides,
};
pub use jira::{done_issues_query, Board, Issue, JiraApi, JiraClient, JiraError, Sprint};
pub use pagination::{paginate, PageCursor, Paginated, DEFAULT_PAGE_SIZE};
pub use report::{ReportError, ReportRenderer};
pub use runner::{RunSummary, Runner, RunnerConfig, RunnerError};
pub use selection::{MultiSelection, SelectionError, Selector};
