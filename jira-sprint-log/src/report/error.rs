//! Report rendering error types.

/// Report rendering error.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Handlebars rendering error, including failures writing to the output.
    #[error("Report rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Template registration error.
    #[error("Report template error: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),

    /// Failed to flush the output.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
