//! Catalog parsing for flacdiff.
//!
//! A catalog is a UTF-8 text file with one `<checksum> <path>` line per
//! catalogued file. The checksum runs up to the first space; everything after
//! that space, further spaces included, is the path.
//!
//! # Key Types
//!
//! - [`parse_line`] / [`LineError`] -- Split a single line into a record
//! - [`CatalogReader`] -- Lazily parse a catalog file, line by line
//! - [`CatalogError`] -- Failures carrying the catalog name and offending line

pub mod error;
pub mod parse;
pub mod reader;

pub use error::{CatalogError, CatalogResult, LineError};
pub use parse::parse_line;
pub use reader::{read_catalog, CatalogReader};
