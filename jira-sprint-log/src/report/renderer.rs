//! HTML report renderer.

use super::ReportError;
use crate::jira::Issue;
use handlebars::Handlebars;
use serde_json::json;
use std::io::Write;
use tracing::debug;

/// Name the report template is registered under.
const REPORT_TEMPLATE_NAME: &str = "report";

/// The embedded report template.
pub const REPORT_TEMPLATE: &str = include_str!("../../templates/report.html.hbs");

/// Creates a Handlebars registry for HTML output.
///
/// The registry is configured with:
/// - HTML escaping of every interpolated value
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::html_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders the sprint report.
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
}

impl ReportRenderer {
    /// Creates a renderer with the embedded report template.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::RegistrationError`] if the template does not parse.
    pub fn new() -> Result<Self, ReportError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Writes the HTML report for `sprint_names` and `issues` to `out`.
    ///
    /// Sprint names are joined with commas in the heading; each issue becomes
    /// one list item linking its key to its permalink, followed by its summary.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if writing to `out` fails.
    pub fn render<S, W>(
        &self,
        mut out: W,
        sprint_names: &[S],
        issues: &[Issue],
    ) -> Result<(), ReportError>
    where
        S: AsRef<str>,
        W: Write,
    {
        let sprints: Vec<&str> = sprint_names.iter().map(|name| name.as_ref()).collect();
        debug!(sprints = sprints.len(), issues = issues.len(), "Rendering report");

        let data = json!({
            "sprints": sprints,
            "issues": issues,
        });

        self.handlebars
            .render_to_write(REPORT_TEMPLATE_NAME, &data, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Renders the report into a string.
    pub fn render_to_string<S: AsRef<str>>(
        &self,
        sprint_names: &[S],
        issues: &[Issue],
    ) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        self.render(&mut buffer, sprint_names, issues)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
