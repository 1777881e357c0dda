use serde::{Deserialize, Serialize};

use crate::checksum::Checksum;
use crate::error::TypeError;

/// One line of a catalog: the content checksum of a file and its path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub checksum: Checksum,
    pub path: String,
}

impl CatalogRecord {
    /// Create a record, rejecting an empty path.
    pub fn new(checksum: Checksum, path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.is_empty() {
            return Err(TypeError::EmptyPath);
        }
        Ok(Self { checksum, path })
    }
}

/// Content that exists in both catalogs under different paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Path recorded in the old catalog.
    pub from: String,
    /// Path recorded in the new catalog.
    pub to: String,
}

impl Move {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
