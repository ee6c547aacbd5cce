//! HTML report generator
//!
//! Produces a self-contained, print-friendly page with embedded CSS.

use super::ReportView;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "report.html")]
struct HtmlReportTemplate {
    view: ReportView,
}

/// HTML report generator
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let template = HtmlReportTemplate {
            view: ReportView::from_context(ctx),
        };
        Ok(template.render()?)
    }
}
