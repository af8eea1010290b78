use std::collections::HashMap;
use std::io::{self, BufRead};

use serde::Serialize;
use tracing::debug;

use super::source::{parse_row, SourceRow};
use super::{RowError, TagRecord};

/// Where a stored record came from. Primary-column records always win
/// over alternate-column records for the same (case-insensitive) tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Primary,
    Alternate,
}

#[derive(Debug, Clone)]
struct StoredTag {
    record: TagRecord,
    origin: Origin,
}

/// Counters collected while loading a tag source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Lines read from the source, including skipped ones.
    pub rows: usize,
    /// Lines skipped as malformed or empty.
    pub skipped_rows: usize,
    /// Rows whose weight field was missing or non-numeric (weight 0).
    pub malformed_weights: usize,
    /// Primary tags stored (later rows replacing earlier ones count again).
    pub primary_tags: usize,
    /// Alternate tags added as their own records.
    pub alternate_tags: usize,
    /// Alternate names dropped because the tag was already known.
    pub alternates_ignored: usize,
}

/// Mutable accumulator of tag records, keyed case-insensitively.
///
/// Only the loader touches this; once converted into a `TagIndex` the
/// vocabulary is immutable.
#[derive(Debug, Default)]
pub struct TagStore {
    tags: HashMap<String, StoredTag>,
    stats: LoadStats,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every line of `reader`, skipping malformed rows.
    ///
    /// Only I/O errors from the reader itself are returned.
    pub fn read_from<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut store = Self::new();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let parsed = std::str::from_utf8(&buf)
                .map_err(|_| RowError::InvalidUtf8)
                .and_then(parse_row);
            match parsed {
                Ok(row) => store.add_row(row),
                Err(e) => store.skip_row(line_no, &e),
            }
        }

        debug!(
            rows = store.stats.rows,
            skipped = store.stats.skipped_rows,
            tags = store.tags.len(),
            "tag source read"
        );
        Ok(store)
    }

    fn skip_row(&mut self, line_no: usize, err: &RowError) {
        self.stats.rows += 1;
        self.stats.skipped_rows += 1;
        if *err != RowError::EmptyRow {
            debug!(line_no, "skipping row: {err}");
        }
    }

    /// Add one parsed row: its primary tag, then any alternates.
    pub fn add_row(&mut self, row: SourceRow) {
        self.stats.rows += 1;
        let weight = row.weight.unwrap_or_else(|| {
            self.stats.malformed_weights += 1;
            0
        });

        if !row.tag.is_empty() {
            self.insert_primary(row.tag, weight);
        }

        let alt_weight = (weight / 2).max(1);
        for alt in row.alternates {
            self.insert_alternate(alt, alt_weight);
        }
    }

    /// Insert or replace a primary-column tag.
    pub fn insert_primary(&mut self, tag: String, weight: u64) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        self.stats.primary_tags += 1;
        self.tags.insert(
            tag.to_lowercase(),
            StoredTag {
                record: TagRecord::new(tag, weight),
                origin: Origin::Primary,
            },
        );
    }

    /// Insert an alternate-column tag unless the tag is already known.
    ///
    /// An alternate stored earlier is still replaced by a later primary
    /// row for the same tag.
    pub fn insert_alternate(&mut self, tag: String, weight: u64) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        let key = tag.to_lowercase();
        if self.tags.contains_key(&key) {
            self.stats.alternates_ignored += 1;
            return;
        }
        self.stats.alternate_tags += 1;
        self.tags.insert(
            key,
            StoredTag {
                record: TagRecord::new(tag, weight),
                origin: Origin::Alternate,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Whether the stored record for `tag` came from a primary column.
    pub fn is_primary(&self, tag: &str) -> bool {
        self.tags
            .get(&tag.to_lowercase())
            .is_some_and(|t| t.origin == Origin::Primary)
    }

    /// Consume the store, yielding its records in arbitrary order.
    pub fn into_records(self) -> impl Iterator<Item = TagRecord> {
        self.tags.into_values().map(|t| t.record)
    }
}
