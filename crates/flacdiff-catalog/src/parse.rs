//! Single-line catalog parsing.

use flacdiff_types::{CatalogRecord, Checksum};

use crate::error::LineError;

/// Split one catalog line into a [`CatalogRecord`].
///
/// The checksum is everything before the first space and the path is
/// everything after it. A trailing `\r` is ignored so catalogs written with
/// CRLF line endings parse the same as LF ones.
///
/// # Examples
///
/// ```
/// use flacdiff_catalog::parse_line;
///
/// let rec = parse_line("a1 /music/Some Artist/01 Intro.flac").unwrap();
/// assert_eq!(rec.checksum.as_str(), "a1");
/// assert_eq!(rec.path, "/music/Some Artist/01 Intro.flac");
///
/// assert!(parse_line("onlyhashnopath").is_err());
/// assert!(parse_line(" /leading/space.flac").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<CatalogRecord, LineError> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    let sep = line.find(' ').ok_or(LineError::MissingSeparator)?;
    if sep == 0 {
        return Err(LineError::EmptyChecksum);
    }

    let (checksum, rest) = line.split_at(sep);
    let path = &rest[1..];
    if path.is_empty() {
        return Err(LineError::EmptyPath);
    }

    let checksum = Checksum::new(checksum)?;
    Ok(CatalogRecord {
        checksum,
        path: path.to_string(),
    })
}
