//! Tag suggestion engine.
//!
//! `TagEngine` owns one loaded tag vocabulary with its suggestion cache and
//! answers completion requests for a text buffer and cursor. The pure pieces
//! live in `tag_core`.

mod engine;
mod trace_init;
mod types;


pub use engine::TagEngine;
pub use trace_init::{init_tracing, TRACE_FILE_NAME};
pub use types::{EngineError, Suggestion};

pub use tag_core::cache::CacheStats;
pub use tag_core::fragment::Fragment;
pub use tag_core::insert::Insertion;
pub use tag_core::ranker::MatchTier;
pub use tag_core::settings::{DisplayCase, SeparatorMode, Settings};
pub use tag_core::tag_list::TagCategory;
pub use tag_core::tagdb::{LoadError, LoadStats, TagIndex, TagRecord};
