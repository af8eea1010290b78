use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug_span, info, warn};

use tag_core::cache::{CacheStats, SuggestionCache};
use tag_core::format::{to_display_form, to_storage_form};
use tag_core::fragment::Fragment;
use tag_core::insert::{Insertion, InsertionEngine};
use tag_core::ranker::{normalize_query, rank, RankedTag};
use tag_core::settings::Settings;
use tag_core::tag_list::TagCategory;
use tag_core::tagdb::{LoadError, LoadStats, TagIndex, TagRecord};

use crate::types::{EngineError, Suggestion};

/// One loaded vocabulary and the cache scoped to it.
#[derive(Debug, Default)]
struct Vocabulary {
    index: TagIndex,
    cache: SuggestionCache,
    stats: LoadStats,
}

impl Vocabulary {
    fn new(index: TagIndex, stats: LoadStats) -> Self {
        Self {
            index,
            cache: SuggestionCache::new(),
            stats,
        }
    }
}

/// Suggestion engine bound to one vocabulary at a time.
///
/// Queries take a snapshot of the current vocabulary, so a concurrent reload
/// never exposes a half-built index: callers see either the old index with
/// its cache or the new one with a fresh cache.
#[derive(Debug)]
pub struct TagEngine {
    settings: Settings,
    inserter: InsertionEngine,
    vocab: RwLock<Arc<Vocabulary>>,
}

impl TagEngine {
    /// An engine with an empty vocabulary. Autocomplete stays disabled until
    /// `load_index` succeeds.
    pub fn new(settings: Settings) -> Self {
        Self::with_index(TagIndex::empty(), settings)
    }

    pub fn with_index(index: TagIndex, settings: Settings) -> Self {
        let inserter =
            InsertionEngine::new(settings.insertion.separator, settings.insertion.display_case);
        Self {
            settings,
            inserter,
            vocab: RwLock::new(Arc::new(Vocabulary::new(index, LoadStats::default()))),
        }
    }

    /// An engine configured from a settings TOML file.
    pub fn from_settings_file(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings = tag_core::settings::parse_settings_toml(&content)?;
        Ok(Self::new(settings))
    }

    /// An engine configured from the process-wide settings singleton.
    pub fn from_global_settings() -> Self {
        Self::new(tag_core::settings::settings().clone())
    }

    /// Load a tag source and swap it in.
    ///
    /// On failure the engine is left with an empty vocabulary (autocomplete
    /// disabled) and the error is returned for the host to report.
    pub fn load_index(&self, path: &Path) -> Result<LoadStats, LoadError> {
        let _span = debug_span!("engine_load_index", path = %path.display()).entered();
        match TagIndex::load(path) {
            Ok((index, stats)) => {
                self.swap(Vocabulary::new(index, stats));
                Ok(stats)
            }
            Err(e) => {
                warn!("autocomplete disabled: {e}");
                self.swap(Vocabulary::default());
                Err(e)
            }
        }
    }

    /// Load the source named by `[source] path` in the settings.
    pub fn load_default_source(&self) -> Result<LoadStats, LoadError> {
        let path = self.settings.source.path.clone();
        self.load_index(Path::new(&path))
    }

    /// Swap in an already-built index with a fresh cache.
    pub fn replace_index(&self, index: TagIndex) {
        self.swap(Vocabulary::new(index, LoadStats::default()));
    }

    fn swap(&self, vocab: Vocabulary) {
        let tags = vocab.index.len();
        let mut guard = self.vocab.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(vocab);
        info!(tags, "tag vocabulary replaced");
    }

    fn snapshot(&self) -> Arc<Vocabulary> {
        let guard = self.vocab.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Whether a non-empty vocabulary is loaded.
    pub fn is_enabled(&self) -> bool {
        !self.snapshot().index.is_empty()
    }

    pub fn tag_count(&self) -> usize {
        self.snapshot().index.len()
    }

    /// The `n` heaviest tags in the current vocabulary.
    pub fn top_tags(&self, n: usize) -> Vec<TagRecord> {
        self.snapshot()
            .index
            .top(n)
            .iter()
            .map(|e| TagRecord::new(e.tag.clone(), e.weight))
            .collect()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Stats from the last successful `load_index`; all zero otherwise.
    pub fn load_stats(&self) -> LoadStats {
        self.snapshot().stats
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.snapshot().cache.stats()
    }

    pub fn resolve_fragment(&self, buffer: &str, cursor: usize) -> Fragment {
        self.inserter.resolver().resolve(buffer, cursor)
    }

    /// Rank the vocabulary against a bare query.
    ///
    /// Queries shorter than `min_query_chars` yield nothing. Results for
    /// limits up to `max_results` come from the cache; larger limits are
    /// ranked directly.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let normalized = normalize_query(query);
        if normalized.chars().count() < self.settings.suggestions.min_query_chars.max(1) {
            return Vec::new();
        }
        let vocab = self.snapshot();
        let max_results = self.settings.suggestions.max_results;

        let ranked: Arc<[RankedTag]> = if limit <= max_results {
            vocab
                .cache
                .get_or_compute(&normalized, |q| rank(q, &vocab.index, max_results))
        } else {
            rank(&normalized, &vocab.index, limit).into()
        };

        ranked
            .iter()
            .take(limit)
            .map(|r| self.suggestion(r))
            .collect()
    }

    /// Suggestions for the fragment under `cursor`.
    pub fn get_suggestions(&self, buffer: &str, cursor: usize, limit: usize) -> Vec<Suggestion> {
        let fragment = self.resolve_fragment(buffer, cursor);
        self.suggest(fragment.query(), limit)
    }

    /// Replace the fragment under `cursor` with `tag` (storage form).
    pub fn apply_suggestion(&self, buffer: &str, cursor: usize, tag: &str) -> Insertion {
        self.inserter.insert(buffer, cursor, tag)
    }

    /// Append a comma-separated tag list to the end of `buffer`.
    /// `None` when the list holds no tags.
    pub fn append_tag_list(&self, buffer: &str, tags: &str) -> Option<Insertion> {
        self.inserter.append_list(buffer, tags)
    }

    pub fn to_display_form(&self, tag: &str) -> String {
        to_display_form(tag, self.settings.insertion.display_case)
    }

    pub fn to_storage_form(&self, display: &str) -> String {
        to_storage_form(display)
    }

    fn suggestion(&self, ranked: &RankedTag) -> Suggestion {
        Suggestion {
            display: self.to_display_form(&ranked.tag),
            category: TagCategory::classify(&ranked.tag),
            tag: ranked.tag.clone(),
            weight: ranked.weight,
            tier: ranked.tier,
        }
    }
}

impl Default for TagEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
