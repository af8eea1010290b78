use std::io;
use std::path::PathBuf;

use serde::Serialize;

use tag_core::ranker::MatchTier;
use tag_core::settings::SettingsError;
use tag_core::tag_list::TagCategory;
use tag_core::tagdb::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("IO error: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One completion candidate, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Tag in storage form; pass this back to `apply_suggestion`.
    pub tag: String,
    /// Tag in display form.
    pub display: String,
    pub weight: u64,
    pub tier: MatchTier,
    pub category: TagCategory,
}
