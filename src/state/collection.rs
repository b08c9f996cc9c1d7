/// Live collection view
///
/// Mirrors the remote collection as pushed by the store's live feed and
/// derives the filtered, date-sorted display list from it. The store is
/// the sole source of truth: every push replaces the whole mirror, and
/// nothing is shown optimistically before the store confirms it.

use crate::store::{Snapshot, SnapshotEvent};

use super::photo::PhotoRecord;

/// The client's mirror of one namespace's document set
#[derive(Debug, Default)]
pub struct LiveCollection {
    mirror: Snapshot,
    /// Last feed failure, kept alongside the last-known-good mirror
    last_error: Option<String>,
}

impl LiveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mirror with a freshly pushed snapshot. Never a
    /// diff: any record absent from the snapshot is gone, including
    /// records this client committed moments ago that the push has not
    /// caught up with yet.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.mirror = snapshot;
        self.last_error = None;
    }

    /// Feed one subscription delivery into the mirror. Failures keep
    /// the last successfully received snapshot visible.
    pub fn apply_event(&mut self, event: SnapshotEvent) {
        match event {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(e) => {
                eprintln!("⚠️  Live feed error: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Message of the most recent feed failure, if the mirror is stale
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The filtered, sorted list the gallery renders
    pub fn display_list(&self, query: &str) -> Vec<PhotoRecord> {
        derive_display_list(&self.mirror, query)
    }

    /// "No photos yet" empty-state signal
    pub fn is_empty(&self) -> bool {
        self.mirror.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mirror.len()
    }

    pub fn get(&self, id: &str) -> Option<&PhotoRecord> {
        self.mirror.get(id)
    }
}

/// Derive the display list from a mirror and a search query.
///
/// Pure function of its two inputs. Filtering keeps records whose date
/// contains the query as a case-sensitive substring (empty query keeps
/// everything). Sorting is newest-first: date descending — lexicographic
/// comparison is correct for zero-padded YYYY-MM-DD — with the commit
/// timestamp breaking ties between equal dates, and the id breaking any
/// remaining ties so the result never depends on map iteration order.
pub fn derive_display_list(mirror: &Snapshot, query: &str) -> Vec<PhotoRecord> {
    let mut records: Vec<PhotoRecord> = mirror
        .values()
        .filter(|record| record.date.contains(query))
        .cloned()
        .collect();
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
            .then_with(|| b.id.cmp(&a.id))
    });
    records
}
