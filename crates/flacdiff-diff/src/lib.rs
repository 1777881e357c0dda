//! Reconciliation engine for flacdiff.
//!
//! Takes two catalogs of the same file collection, an old one and a new one,
//! and classifies every file as deleted, added or moved by matching content
//! checksums. The finished [`DiffReport`] is rendered as a plain text change
//! report with paths shortened relative to the directory all files share.
//!
//! # Key Types
//!
//! - [`ReconcileSession`] -- Ingests the old catalog, then the new one
//! - [`DiffReport`] / [`DiffStats`] -- Classified result of one diff run
//! - [`CommonPrefix`] -- Running longest common prefix of every path seen
//! - [`ReportConfig`] -- Rendering options, loadable from TOML
//! - [`render`] / [`render_text`] / [`render_json`] -- Report output

pub mod config;
pub mod error;
pub mod prefix;
pub mod report;
pub mod session;

pub use config::{OutputFormat, ReportConfig};
pub use error::{DiffError, DiffResult};
pub use prefix::{containing_dir, CommonPrefix};
pub use report::{render, render_json, render_text, ReportView};
pub use session::{diff_catalogs, DiffReport, DiffStats, Phase, ReconcileSession};
