use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Report output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The sectioned plain text report.
    #[default]
    Text,
    /// The same shortened view as pretty-printed JSON.
    Json,
}

/// Rendering options for the change report.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// format = "json"
/// continuation_marker = "  -> "
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: OutputFormat,
    /// Printed before the destination line of each moved file.
    pub continuation_marker: String,
    /// Strip the base directory from displayed paths.
    pub strip_base: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            continuation_marker: " ↳ ".to_string(),
            strip_base: true,
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> DiffResult<Self> {
        toml::from_str(text).map_err(|e| DiffError::Config(e.to_string()))
    }
}
