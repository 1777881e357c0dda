//! Two-phase reconciliation of an old catalog against a new one.
//!
//! The old catalog is ingested completely first, building an index from
//! checksum to path. Each new-catalog record then either consumes its
//! checksum from the index (unchanged or moved) or is classified as added.
//! Whatever remains in the index once the new catalog is exhausted was
//! deleted.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use flacdiff_types::{CatalogRecord, Checksum, Move};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DiffError, DiffResult};
use crate::prefix::CommonPrefix;

/// Which catalog a session is currently ingesting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Old,
    New,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
        }
    }
}

/// Counters collected while reconciling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Records read from the old catalog.
    pub old_records: usize,
    /// Records read from the new catalog.
    pub new_records: usize,
    /// New records whose checksum and path both matched the old catalog.
    pub unchanged: usize,
    /// Old records whose checksum had already been seen in the old catalog.
    pub duplicate_checksums: usize,
}

/// The classified outcome of one diff run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Paths present only in the old catalog, sorted.
    pub deleted: BTreeSet<String>,
    /// Paths whose content is new, in new-catalog order.
    pub added: Vec<String>,
    /// Content found under a different path, in new-catalog order.
    pub moved: Vec<Move>,
    /// Longest common prefix of every path in both catalogs.
    pub common_prefix: CommonPrefix,
    pub stats: DiffStats,
}

impl DiffReport {
    /// Returns `true` if nothing was deleted, added or moved.
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.added.is_empty() && self.moved.is_empty()
    }

    /// Total number of reported changes.
    pub fn len(&self) -> usize {
        self.deleted.len() + self.added.len() + self.moved.len()
    }

    /// The directory every displayed path is shortened against.
    pub fn base_dir(&self) -> String {
        self.common_prefix.base_dir()
    }
}

/// State of a single diff run.
///
/// Feed every old-catalog record through [`observe_old`](Self::observe_old),
/// then every new-catalog record through [`observe_new`](Self::observe_new),
/// then call [`finish`](Self::finish). Returning to the old catalog once the
/// new one has started is rejected, since classification depends on the old
/// index being complete.
#[derive(Debug)]
pub struct ReconcileSession {
    /// Old-catalog content not yet matched by the new catalog.
    index: HashMap<Checksum, String>,
    prefix: CommonPrefix,
    added: Vec<String>,
    moved: Vec<Move>,
    stats: DiffStats,
    phase: Phase,
}

impl Default for ReconcileSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconcileSession {
    /// Start a new session in the old phase.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            prefix: CommonPrefix::new(),
            added: Vec::new(),
            moved: Vec::new(),
            stats: DiffStats::default(),
            phase: Phase::Old,
        }
    }

    /// The catalog currently being ingested.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Running statistics.
    pub fn stats(&self) -> &DiffStats {
        &self.stats
    }

    /// Ingest one record of the old catalog.
    ///
    /// A checksum that already appeared earlier in the old catalog is
    /// replaced: the later path wins.
    pub fn observe_old(&mut self, record: CatalogRecord) -> DiffResult<()> {
        if self.phase != Phase::Old {
            return Err(DiffError::PhaseOrder {
                attempted: Phase::Old,
                phase: self.phase,
            });
        }
        self.record_old(record);
        Ok(())
    }

    /// Ingest one record of the new catalog. Ends the old phase.
    pub fn observe_new(&mut self, record: CatalogRecord) {
        if self.phase == Phase::Old {
            debug!(
                indexed = self.index.len(),
                records = self.stats.old_records,
                "old catalog ingested"
            );
            self.phase = Phase::New;
        }
        self.record_new(record);
    }

    /// Classify everything left in the index as deleted and return the
    /// finished report.
    pub fn finish(self) -> DiffReport {
        let deleted: BTreeSet<String> = self.index.into_values().collect();
        info!(
            deleted = deleted.len(),
            added = self.added.len(),
            moved = self.moved.len(),
            unchanged = self.stats.unchanged,
            "reconciliation complete"
        );
        DiffReport {
            deleted,
            added: self.added,
            moved: self.moved,
            common_prefix: self.prefix,
            stats: self.stats,
        }
    }

    fn record_old(&mut self, record: CatalogRecord) {
        self.stats.old_records += 1;
        self.prefix.observe(&record.path);
        if let Some(previous) = self.index.insert(record.checksum.clone(), record.path) {
            self.stats.duplicate_checksums += 1;
            warn!(
                checksum = %record.checksum,
                replaced = %previous,
                "duplicate checksum in old catalog, keeping the later path"
            );
        }
    }

    fn record_new(&mut self, record: CatalogRecord) {
        self.stats.new_records += 1;
        self.prefix.observe(&record.path);
        match self.index.remove(&record.checksum) {
            None => self.added.push(record.path),
            Some(old) if old == record.path => self.stats.unchanged += 1,
            Some(old) => self.moved.push(Move {
                from: old,
                to: record.path,
            }),
        }
    }
}

/// Reconcile two in-memory catalogs in one call.
pub fn diff_catalogs<O, N>(old: O, new: N) -> DiffReport
where
    O: IntoIterator<Item = CatalogRecord>,
    N: IntoIterator<Item = CatalogRecord>,
{
    let mut session = ReconcileSession::new();
    // Still in the old phase, so the phase check in `observe_old` cannot fail.
    for record in old {
        session.record_old(record);
    }
    for record in new {
        session.observe_new(record);
    }
    session.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rec(sum: &str, path: &str) -> CatalogRecord {
        CatalogRecord::new(Checksum::new(sum).unwrap(), path).unwrap()
    }

    fn catalog(lines: &[(&str, &str)]) -> Vec<CatalogRecord> {
        lines.iter().map(|(s, p)| rec(s, p)).collect()
    }

    #[test]
    fn concrete_scenario() {
        let old = catalog(&[("h1", "/m/A/1.flac"), ("h2", "/m/A/2.flac")]);
        let new = catalog(&[("h1", "/m/B/1.flac"), ("h3", "/m/A/3.flac")]);

        let report = diff_catalogs(old, new);
        assert_eq!(report.deleted.iter().collect::<Vec<_>>(), vec!["/m/A/2.flac"]);
        assert_eq!(report.added, vec!["/m/A/3.flac".to_string()]);
        assert_eq!(report.moved, vec![Move::new("/m/A/1.flac", "/m/B/1.flac")]);
        assert_eq!(report.len(), 3);
        assert_eq!(report.base_dir(), "/m");
    }

    #[test]
    fn identical_catalogs_produce_no_changes() {
        let cat = catalog(&[("a1", "/x/y/one.flac"), ("a2", "/x/y/z/two.flac")]);
        let report = diff_catalogs(cat.clone(), cat);
        assert!(report.is_empty());
        assert_eq!(report.stats.unchanged, 2);
        assert_eq!(report.base_dir(), "/x/y");
    }

    #[test]
    fn empty_old_catalog_adds_everything() {
        let new = catalog(&[("a1", "/x/1.flac"), ("a2", "/x/2.flac")]);
        let report = diff_catalogs(Vec::new(), new);
        assert_eq!(report.added, vec!["/x/1.flac".to_string(), "/x/2.flac".to_string()]);
        assert!(report.deleted.is_empty());
        assert!(report.moved.is_empty());
    }

    #[test]
    fn empty_new_catalog_deletes_everything() {
        let old = catalog(&[("a1", "/x/1.flac"), ("a2", "/x/2.flac")]);
        let report = diff_catalogs(old, Vec::new());
        assert_eq!(report.deleted.len(), 2);
        assert!(report.added.is_empty());
    }

    #[test]
    fn both_empty() {
        let report = diff_catalogs(Vec::new(), Vec::new());
        assert!(report.is_empty());
        assert!(!report.common_prefix.is_set());
        assert_eq!(report.base_dir(), ".");
    }

    #[test]
    fn duplicate_old_checksum_last_wins() {
        let old = catalog(&[("h1", "/m/P1.flac"), ("h1", "/m/P2.flac")]);
        let new = catalog(&[("h1", "/m/P3.flac")]);

        let report = diff_catalogs(old, new);
        assert_eq!(report.moved, vec![Move::new("/m/P2.flac", "/m/P3.flac")]);
        assert!(report.deleted.is_empty());
        assert_eq!(report.stats.duplicate_checksums, 1);
    }

    #[test]
    fn duplicate_old_checksum_matching_last_path_is_unchanged() {
        let old = catalog(&[("h1", "/m/P1.flac"), ("h1", "/m/P2.flac")]);
        let new = catalog(&[("h1", "/m/P2.flac")]);
        assert!(diff_catalogs(old, new).is_empty());
    }

    #[test]
    fn duplicate_new_checksum_second_copy_is_added() {
        let old = catalog(&[("h1", "/m/a.flac")]);
        let new = catalog(&[("h1", "/m/a.flac"), ("h1", "/m/copy.flac")]);
        let report = diff_catalogs(old, new);
        assert_eq!(report.added, vec!["/m/copy.flac".to_string()]);
        assert!(report.moved.is_empty());
    }

    #[test]
    fn added_and_moved_keep_new_catalog_order() {
        let old = catalog(&[("m1", "/r/old/1.flac"), ("m2", "/r/old/2.flac")]);
        let new = catalog(&[
            ("z9", "/r/z.flac"),
            ("m2", "/r/new/2.flac"),
            ("a1", "/r/a.flac"),
            ("m1", "/r/new/1.flac"),
        ]);
        let report = diff_catalogs(old, new);
        assert_eq!(report.added, vec!["/r/z.flac".to_string(), "/r/a.flac".to_string()]);
        assert_eq!(
            report.moved,
            vec![
                Move::new("/r/old/2.flac", "/r/new/2.flac"),
                Move::new("/r/old/1.flac", "/r/new/1.flac"),
            ]
        );
    }

    #[test]
    fn deleted_paths_are_sorted() {
        let old = catalog(&[("c", "/m/c.flac"), ("a", "/m/a.flac"), ("b", "/m/b.flac")]);
        let report = diff_catalogs(old, Vec::new());
        let deleted: Vec<_> = report.deleted.iter().map(String::as_str).collect();
        assert_eq!(deleted, vec!["/m/a.flac", "/m/b.flac", "/m/c.flac"]);
    }

    #[test]
    fn prefix_covers_both_catalogs() {
        let old = catalog(&[("a1", "/lib/x/1.flac")]);
        let new = catalog(&[("a2", "/lib/y/2.flac")]);
        let report = diff_catalogs(old, new);
        assert_eq!(report.common_prefix.as_str(), Some("/lib/"));
        assert_eq!(report.base_dir(), "/lib");
    }

    #[test]
    fn old_after_new_is_rejected() {
        let mut session = ReconcileSession::new();
        session.observe_old(rec("a1", "/x/1.flac")).unwrap();
        assert_eq!(session.phase(), Phase::Old);
        session.observe_new(rec("a1", "/x/1.flac"));
        assert_eq!(session.phase(), Phase::New);

        let err = session.observe_old(rec("a2", "/x/2.flac")).unwrap_err();
        assert_eq!(
            err,
            DiffError::PhaseOrder {
                attempted: Phase::Old,
                phase: Phase::New
            }
        );
        assert_eq!(session.stats().old_records, 1);
    }

    #[test]
    fn diff_catalogs_matches_observe_calls() {
        let old = catalog(&[("h1", "/m/A/1.flac"), ("h2", "/m/A/2.flac"), ("h1", "/m/A/9.flac")]);
        let new = catalog(&[("h1", "/m/B/1.flac"), ("h3", "/m/A/3.flac")]);

        let mut session = ReconcileSession::new();
        for record in old.clone() {
            session.observe_old(record).unwrap();
        }
        for record in new.clone() {
            session.observe_new(record);
        }
        assert_eq!(session.finish(), diff_catalogs(old, new));
    }

    #[test]
    fn stats_count_records() {
        let old = catalog(&[("a", "/1"), ("b", "/2"), ("a", "/3")]);
        let new = catalog(&[("b", "/2")]);
        let report = diff_catalogs(old, new);
        assert_eq!(report.stats.old_records, 3);
        assert_eq!(report.stats.new_records, 1);
        assert_eq!(report.stats.unchanged, 1);
        assert_eq!(report.stats.duplicate_checksums, 1);
    }

    fn arb_catalog() -> impl Strategy<Value = Vec<CatalogRecord>> {
        // Unique checksums per catalog keep the properties free of the
        // last-wins rule, which has its own tests above. Embedding the
        // checksum in the file name keeps paths unique across content.
        prop::collection::btree_map("[a-f]{1,3}", "[a-d]{1,2}", 0..12).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(sum, dir)| rec(&sum, &format!("/lib/{dir}/{sum}.flac")))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn diff_against_itself_is_empty(cat in arb_catalog()) {
            let report = diff_catalogs(cat.clone(), cat.clone());
            prop_assert!(report.is_empty());
            prop_assert_eq!(report.stats.unchanged, cat.len());
        }

        #[test]
        fn every_checksum_lands_in_exactly_one_place(old in arb_catalog(), new in arb_catalog()) {
            let old_map: HashMap<_, _> = old.iter().map(|r| (r.checksum.clone(), r.path.clone())).collect();
            let new_map: HashMap<_, _> = new.iter().map(|r| (r.checksum.clone(), r.path.clone())).collect();
            let report = diff_catalogs(old.clone(), new.clone());

            for (sum, path) in &old_map {
                match new_map.get(sum) {
                    None => {
                        prop_assert!(report.deleted.contains(path));
                        prop_assert!(!report.moved.iter().any(|m| &m.from == path));
                    }
                    Some(new_path) if new_path == path => {
                        prop_assert!(!report.moved.iter().any(|m| &m.to == new_path));
                    }
                    Some(new_path) => {
                        let hits = report
                            .moved
                            .iter()
                            .filter(|m| &m.from == path && &m.to == new_path)
                            .count();
                        prop_assert_eq!(hits, 1);
                        prop_assert!(!report.added.contains(new_path));
                    }
                }
            }
            for (sum, path) in &new_map {
                if !old_map.contains_key(sum) {
                    prop_assert!(report.added.contains(path));
                    prop_assert!(!report.moved.iter().any(|m| &m.to == path));
                }
            }

            let only_old = old_map.keys().filter(|k| !new_map.contains_key(*k)).count();
            let only_new = new_map.keys().filter(|k| !old_map.contains_key(*k)).count();
            prop_assert_eq!(report.added.len(), only_new);
            prop_assert_eq!(report.deleted.len(), only_old);
        }
    }
}
