//! Longest common prefix over every path seen during a diff run.
//!
//! The prefix is compared byte by byte, so it can end in the middle of a
//! path component (`/m/A/1.flac` and `/m/Ab/2.flac` share `/m/A`). Report
//! paths are shortened by the prefix's containing directory instead, which
//! always ends on a component boundary.

use serde::{Deserialize, Serialize};

/// Running longest common prefix.
///
/// Starts unset. The first observed path becomes the prefix unconditionally;
/// every later path shortens it to the bytes both share.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonPrefix(Option<String>);

impl CommonPrefix {
    /// Create an unset prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one more path into the prefix.
    pub fn observe(&mut self, path: &str) {
        match &mut self.0 {
            Some(current) => {
                let len = common_prefix_len(current, path);
                current.truncate(len);
            }
            None => self.0 = Some(path.to_string()),
        }
    }

    /// The current prefix, or `None` if no path has been observed.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `true` once at least one path has been observed.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// The directory containing the prefix, used as the report's base.
    pub fn base_dir(&self) -> String {
        containing_dir(self.0.as_deref().unwrap_or(""))
    }
}

/// Length in bytes of the longest common prefix of `a` and `b`, backed off
/// to a UTF-8 character boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    // Both strings agree on every byte before `len`, so a boundary in `a` is
    // a boundary in `b` as well.
    while !a.is_char_boundary(len) {
        len -= 1;
    }
    len
}

/// Everything before the last `/` of `path`, with trailing slashes removed.
///
/// Returns `/` when only the root remains and `.` when `path` has no `/`.
///
/// ```
/// use flacdiff_diff::containing_dir;
///
/// assert_eq!(containing_dir("/x/y/"), "/x/y");
/// assert_eq!(containing_dir("/x/y/one.flac"), "/x/y");
/// assert_eq!(containing_dir("/one.flac"), "/");
/// assert_eq!(containing_dir("one.flac"), ".");
/// ```
pub fn containing_dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => {
            let dir = path[..idx].trim_end_matches('/');
            if dir.is_empty() {
                "/".to_string()
            } else {
                dir.to_string()
            }
        }
        None => ".".to_string(),
    }
}
