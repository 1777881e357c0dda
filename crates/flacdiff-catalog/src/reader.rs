//! Catalog file reading.
//!
//! [`CatalogReader`] owns its underlying reader, so the file handle opened by
//! [`CatalogReader::open`] is released as soon as the reader is dropped,
//! whether the pass completed or stopped at the first error.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use flacdiff_types::CatalogRecord;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::parse::parse_line;

/// Streaming parser over the lines of one catalog.
///
/// Yields one `CatalogResult<CatalogRecord>` per line. After the first error
/// the iterator is exhausted.
pub struct CatalogReader<R> {
    /// Name used in error messages (normally the catalog's file path).
    name: PathBuf,
    lines: Lines<R>,
    /// 1-based number of the last line read.
    line: usize,
    failed: bool,
}

impl<R> std::fmt::Debug for CatalogReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogReader")
            .field("name", &self.name)
            .field("line", &self.line)
            .field("failed", &self.failed)
            .finish()
    }
}

impl CatalogReader<BufReader<File>> {
    /// Open a catalog file for reading.
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(catalog = %path.display(), "opened catalog");
        Ok(Self::new(path, BufReader::new(file)))
    }
}

impl<R: BufRead> CatalogReader<R> {
    /// Wrap an already-open reader. `name` is only used for error reporting.
    pub fn new(name: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            name: name.into(),
            lines: reader.lines(),
            line: 0,
            failed: false,
        }
    }

    /// The catalog name attached to errors.
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    fn read_error(&self, source: io::Error) -> CatalogError {
        CatalogError::Read {
            path: self.name.clone(),
            line: self.line,
            source,
        }
    }
}

impl<R: BufRead> Iterator for CatalogReader<R> {
    type Item = CatalogResult<CatalogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let text = self.lines.next()?;
        self.line += 1;

        let result = match text {
            Ok(text) => parse_line(&text).map_err(|reason| CatalogError::MalformedLine {
                path: self.name.clone(),
                line: self.line,
                text,
                reason,
            }),
            Err(e) => Err(self.read_error(e)),
        };
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

/// Read and parse a whole catalog file.
///
/// Fails on the first unreadable or malformed line; no partial catalog is
/// returned.
pub fn read_catalog(path: impl AsRef<Path>) -> CatalogResult<Vec<CatalogRecord>> {
    let reader = CatalogReader::open(path)?;
    let records = reader.collect::<CatalogResult<Vec<_>>>()?;
    debug!(records = records.len(), "catalog parsed");
    Ok(records)
}
