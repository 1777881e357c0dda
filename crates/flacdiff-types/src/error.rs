use thiserror::Error;

/// Errors produced when constructing foundation types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("checksum must not be empty")]
    EmptyChecksum,

    #[error("path must not be empty")]
    EmptyPath,
}
