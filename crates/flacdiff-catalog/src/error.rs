use std::io;
use std::path::{Path, PathBuf};

use flacdiff_types::TypeError;

/// Why a single catalog line could not be split into checksum and path.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LineError {
    /// The line has no space separating checksum from path.
    #[error("missing space between checksum and path")]
    MissingSeparator,

    /// The separator is the first character, leaving no checksum.
    #[error("separator at start of line, checksum is empty")]
    EmptyChecksum,

    /// Nothing follows the separator.
    #[error("path is empty")]
    EmptyPath,

    /// The checksum token was rejected.
    #[error("invalid checksum: {0}")]
    InvalidChecksum(#[from] TypeError),
}

/// Errors produced while reading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be opened.
    #[error("unable to open catalog {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading failed part-way through (I/O failure or invalid UTF-8).
    #[error("unable to read catalog {path} at line {line}: {source}")]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A line does not follow the `<checksum> <path>` format.
    #[error("bad input in {path} line {line}: {reason} in '{text}'")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        text: String,
        #[source]
        reason: LineError,
    },
}

impl CatalogError {
    /// The catalog file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } | Self::MalformedLine { path, .. } => {
                path
            }
        }
    }
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;
