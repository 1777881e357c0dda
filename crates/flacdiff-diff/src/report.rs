//! Change report rendering.
//!
//! The text report has four fixed sections:
//!
//! ```text
//! BASE DIRECTORY
//!
//! /m
//!
//! DELETED FILES:
//!
//! A/2.flac
//!
//! ADDED FILES:
//!
//! A/3.flac
//!
//! MOVED FILES:
//!
//! A/1.flac
//!  ↳ B/1.flac
//! ```
//!
//! Paths under the base directory are shown relative to it; any other path
//! is shown unmodified. The stripped prefix is always the base plus `/`, so
//! with a base of `/` (which would strip `//`) paths stay absolute.

use flacdiff_types::Move;
use serde::Serialize;

use crate::config::{OutputFormat, ReportConfig};
use crate::error::{DiffError, DiffResult};
use crate::session::DiffReport;

/// A [`DiffReport`] with display paths already shortened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub base: String,
    pub deleted: Vec<String>,
    pub added: Vec<String>,
    pub moved: Vec<Move>,
}

impl ReportView {
    /// Shorten every path in `report` according to `config`.
    pub fn new(report: &DiffReport, config: &ReportConfig) -> Self {
        let base = report.base_dir();
        let root = format!("{base}/");
        let show = |path: &str| -> String {
            if config.strip_base {
                path.strip_prefix(root.as_str()).unwrap_or(path).to_string()
            } else {
                path.to_string()
            }
        };

        Self {
            deleted: report.deleted.iter().map(|p| show(p.as_str())).collect(),
            added: report.added.iter().map(|p| show(p.as_str())).collect(),
            moved: report
                .moved
                .iter()
                .map(|m| Move::new(show(m.from.as_str()), show(m.to.as_str())))
                .collect(),
            base,
        }
    }
}

/// Render the report in the format selected by `config`.
pub fn render(report: &DiffReport, config: &ReportConfig) -> DiffResult<String> {
    match config.format {
        OutputFormat::Text => Ok(render_text(report, config)),
        OutputFormat::Json => render_json(report, config),
    }
}

/// Render the sectioned plain text report.
pub fn render_text(report: &DiffReport, config: &ReportConfig) -> String {
    let view = ReportView::new(report, config);
    let mut out = String::new();

    out.push_str("BASE DIRECTORY\n\n");
    push_line(&mut out, &view.base);

    out.push_str("\nDELETED FILES:\n\n");
    for path in &view.deleted {
        push_line(&mut out, path);
    }

    out.push_str("\nADDED FILES:\n\n");
    for path in &view.added {
        push_line(&mut out, path);
    }

    out.push_str("\nMOVED FILES:\n\n");
    for m in &view.moved {
        push_line(&mut out, &m.from);
        out.push_str(&config.continuation_marker);
        push_line(&mut out, &m.to);
    }

    out
}

/// Render the shortened view as pretty-printed JSON.
pub fn render_json(report: &DiffReport, config: &ReportConfig) -> DiffResult<String> {
    let view = ReportView::new(report, config);
    let mut json =
        serde_json::to_string_pretty(&view).map_err(|e| DiffError::Serialization(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
