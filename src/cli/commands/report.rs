//! Report command handler
//!
//! Renders the session's results as a printable HTML page or a Markdown summary.

use super::fail;
use gpa_calculator::config::Config;
use gpa_calculator::core::report::{
    HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use gpa_calculator::core::{Catalog, Session};
use gpa_calculator::info;
use std::path::{Path, PathBuf};

/// Run the report command.
///
/// # Arguments
/// * `format` - Output format
/// * `output_file` - Optional output path; defaults to a dated file in `reports_dir`
/// * `config` - Configuration holding the reports directory and heading
pub fn run(
    catalog: &Catalog,
    session: &Session,
    format: ReportFormat,
    output_file: Option<&Path>,
    config: &Config,
) {
    let output_path = output_file.map_or_else(
        || default_output_path(&config.paths.reports_dir, format),
        Path::to_path_buf,
    );

    let result = session.compute(catalog);
    let ctx = ReportContext::new(catalog, session, &result)
        .with_institution(&config.report.institution);

    let reporter: Box<dyn ReportGenerator> = match format {
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    };

    if let Err(e) = reporter.generate(&ctx, &output_path) {
        fail(&format!("Failed to generate {format} report: {e}"));
    }

    info!("Report exported to: {}", output_path.display());
    println!("✓ Report generated: {}", output_path.display());
    println!(
        "  Final GPA {} ({})",
        gpa_calculator::core::engine::format_points(result.final_gpa),
        result.classification
    );
}

/// `<reports_dir>/gpa_results_<date>.<ext>`, or the current directory when
/// no reports directory is configured
fn default_output_path(reports_dir: &str, format: ReportFormat) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    let filename = format!("gpa_results_{date}.{}", format.extension());
    if reports_dir.is_empty() {
        PathBuf::from(filename)
    } else {
        PathBuf::from(reports_dir).join(filename)
    }
}
