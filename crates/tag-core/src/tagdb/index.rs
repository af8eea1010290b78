use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug_span, info};

use super::store::{LoadStats, TagStore};
use super::{LoadError, TagRecord};

/// A tag in the index with its precomputed lowercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedTag {
    pub tag: String,
    pub lower: String,
    pub weight: u64,
}

/// Immutable, frequency-sorted tag vocabulary.
///
/// Entries are ordered by descending weight, then case-insensitively by
/// tag. Each lowercase tag appears at most once.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    entries: Vec<IndexedTag>,
    by_lower: HashMap<String, usize>,
}

impl TagIndex {
    /// An index with no tags. Ranking against it yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from records. Case-insensitive duplicates keep the first record.
    pub fn from_records(records: impl IntoIterator<Item = TagRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut entries: Vec<IndexedTag> = Vec::new();
        for rec in records {
            let tag = rec.tag.trim();
            if tag.is_empty() {
                continue;
            }
            let lower = tag.to_lowercase();
            if !seen.insert(lower.clone()) {
                continue;
            }
            entries.push(IndexedTag {
                tag: tag.to_string(),
                lower,
                weight: rec.weight,
            });
        }

        entries.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.lower.cmp(&b.lower)));

        let by_lower = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.lower.clone(), i))
            .collect();
        Self { entries, by_lower }
    }

    pub fn from_store(store: TagStore) -> Self {
        Self::from_records(store.into_records())
    }

    /// Parse a tag source from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<(Self, LoadStats)> {
        let store = TagStore::read_from(reader)?;
        let stats = store.stats();
        Ok((Self::from_store(store), stats))
    }

    /// Load a tag source file.
    pub fn load(path: &Path) -> Result<(Self, LoadStats), LoadError> {
        let _span = debug_span!("load_tag_index", path = %path.display()).entered();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::SourceNotFound(path.to_path_buf()),
            _ => LoadError::SourceUnreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let (index, stats) =
            Self::from_reader(BufReader::new(file)).map_err(|e| LoadError::SourceUnreadable {
                path: path.to_path_buf(),
                source: e,
            })?;
        info!(
            tags = index.len(),
            rows = stats.rows,
            skipped = stats.skipped_rows,
            "loaded tag index from {}",
            path.display()
        );
        Ok((index, stats))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order (highest weight first).
    pub fn entries(&self) -> &[IndexedTag] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexedTag> {
        self.entries.iter()
    }

    /// Look up a tag case-insensitively.
    pub fn get(&self, tag: &str) -> Option<&IndexedTag> {
        self.get_lower(&tag.to_lowercase())
    }

    /// Look up by an already-lowercased tag.
    pub fn get_lower(&self, lower: &str) -> Option<&IndexedTag> {
        self.position_lower(lower).map(|i| &self.entries[i])
    }

    /// Index position of an already-lowercased tag.
    pub fn position_lower(&self, lower: &str) -> Option<usize> {
        self.by_lower.get(lower).copied()
    }

    /// Weight of a tag, 0 if unknown.
    pub fn weight(&self, tag: &str) -> u64 {
        self.get(tag).map_or(0, |e| e.weight)
    }

    /// The `n` most popular tags.
    pub fn top(&self, n: usize) -> &[IndexedTag] {
        &self.entries[..n.min(self.entries.len())]
    }
}

impl<'a> IntoIterator for &'a TagIndex {
    type Item = &'a IndexedTag;
    type IntoIter = std::slice::Iter<'a, IndexedTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
