use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "flacdiff",
    about = "Compare two FLAC catalogs and report deleted, added and moved files",
    version
)]
pub struct Cli {
    /// Catalog produced before the changes
    pub old_catalog: PathBuf,

    /// Catalog produced after the changes
    pub new_catalog: PathBuf,

    /// Log to stderr; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Report format, overriding the config file
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// TOML file with report options
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print a one-line change count to stderr after the report
    #[arg(long)]
    pub summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for flacdiff_diff::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}
