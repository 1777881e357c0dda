use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use flacdiff_catalog::CatalogReader;
use flacdiff_diff::{render, DiffReport, ReconcileSession, ReportConfig};
use tracing::{debug, info};

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.format = format.into();
    }

    let report = reconcile(&cli.old_catalog, &cli.new_catalog)?;
    let rendered = render(&report, &config)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .context("unable to write report")?;

    if cli.summary {
        print_summary(&report);
    }
    Ok(())
}

/// Ingest the old catalog, then the new one. Both files are opened before
/// any record is classified, so a missing catalog fails the run up front.
fn reconcile(old: &Path, new: &Path) -> anyhow::Result<DiffReport> {
    let old_reader = CatalogReader::open(old)?;
    let new_reader = CatalogReader::open(new)?;

    let mut session = ReconcileSession::new();
    for record in old_reader {
        session.observe_old(record?)?;
    }
    debug!(catalog = %old.display(), records = session.stats().old_records, "old catalog done");

    for record in new_reader {
        session.observe_new(record?);
    }
    debug!(catalog = %new.display(), records = session.stats().new_records, "new catalog done");

    Ok(session.finish())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ReportConfig> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to read config {}", path.display()))?;
    let config = ReportConfig::from_toml_str(&text)
        .with_context(|| format!("bad config file {}", path.display()))?;
    info!(config = %path.display(), "loaded report config");
    Ok(config)
}

fn print_summary(report: &DiffReport) {
    eprintln!(
        "{} deleted, {} added, {} moved, {} unchanged",
        report.deleted.len().to_string().red(),
        report.added.len().to_string().green(),
        report.moved.len().to_string().yellow(),
        report.stats.unchanged,
    );
}
