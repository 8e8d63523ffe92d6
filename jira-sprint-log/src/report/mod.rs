//! HTML report rendering using Handlebars.
//!
//! This module turns the selected sprint names and their finished issues into
//! a static HTML document.

mod error;
mod renderer;

pub use error::ReportError;
pub use renderer::{create_handlebars_registry, ReportRenderer, REPORT_TEMPLATE};
