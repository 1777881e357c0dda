//! Foundation types for flacdiff.
//!
//! A catalog is a snapshot of a file collection: one line per file, holding a
//! content checksum and the file's path. These types are shared by the
//! catalog parser, the reconciliation engine and the report renderer.
//!
//! # Key Types
//!
//! - [`Checksum`] -- Opaque content digest, compared only for equality
//! - [`CatalogRecord`] -- One (checksum, path) pair from a catalog line
//! - [`Move`] -- Same content found under a different path

pub mod checksum;
pub mod error;
pub mod record;

pub use checksum::Checksum;
pub use error::TypeError;
pub use record::{CatalogRecord, Move};
