//! Weighted tag vocabulary.
//!
//! `TagStore` accumulates `TagRecord`s from rows of the delimited tag source
//! (`tag, category, weight, alternates`). `TagIndex` is the immutable,
//! frequency-sorted view the ranker scans.

mod index;
mod source;
mod store;
#[cfg(test)]
mod tests;

pub use index::{IndexedTag, TagIndex};
pub use source::{parse_row, split_fields, SourceRow};
pub use store::{LoadStats, TagStore};

use std::io;
use std::path::PathBuf;

use serde::Serialize;

/// A known tag and its popularity weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub tag: String,
    pub weight: u64,
}

impl TagRecord {
    pub fn new(tag: impl Into<String>, weight: u64) -> Self {
        Self {
            tag: tag.into(),
            weight,
        }
    }
}

/// Failure to open or read the tag source.
///
/// Neither variant is fatal to a host: callers degrade to an empty index.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("tag source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("tag source unreadable: {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single source row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("row is empty")]
    EmptyRow,

    #[error("row has {0} fields, at least 3 required")]
    TooFewFields(usize),

    #[error("row is not valid UTF-8")]
    InvalidUtf8,
}
