//! Splicing an accepted suggestion into the edited buffer.
//!
//! Pure text-and-offset logic: the fragment under the cursor is replaced by
//! the tag's display form, its leading whitespace is kept, and a separator is
//! added so the cursor lands after a complete token.

use serde::Serialize;

use crate::format::to_display_form;
use crate::fragment::{char_to_byte, FragmentResolver};
use crate::settings::{DisplayCase, SeparatorMode};
use crate::tag_list::join_tags;

/// Result of inserting a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insertion {
    pub buffer: String,
    /// Char offset just past the inserted tag and any added separator.
    pub cursor: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionEngine {
    mode: SeparatorMode,
    case: DisplayCase,
}

impl InsertionEngine {
    pub fn new(mode: SeparatorMode, case: DisplayCase) -> Self {
        Self { mode, case }
    }

    pub fn resolver(&self) -> FragmentResolver {
        FragmentResolver::new(self.mode.delimiters())
    }

    /// Replace the fragment at `cursor` with `tag` (given in storage form).
    ///
    /// The fragment ends at the next delimiter, so whatever follows it is
    /// either nothing but whitespace, in which case the configured separator
    /// is appended, or already starts with a delimiter and is kept as is.
    pub fn insert(&self, buffer: &str, cursor: usize, tag: &str) -> Insertion {
        let fragment = self.resolver().resolve(buffer, cursor);
        let prefix = &buffer[..char_to_byte(buffer, fragment.start)];
        let suffix = &buffer[char_to_byte(buffer, fragment.end)..];
        let leading = fragment.leading_whitespace();
        let display = to_display_form(tag, self.case);

        let separator = if suffix.trim().is_empty() {
            self.mode.separator()
        } else {
            ""
        };

        let mut out =
            String::with_capacity(buffer.len() + display.len() + separator.len() + leading.len());
        out.push_str(prefix);
        out.push_str(leading);
        out.push_str(&display);
        out.push_str(separator);
        out.push_str(suffix);

        let cursor = fragment.start
            + leading.chars().count()
            + display.chars().count()
            + separator.chars().count();
        Insertion {
            buffer: out,
            cursor,
        }
    }

    /// Append a comma-separated list of tags (storage form) to the end of
    /// `buffer`, as when a saved tag set is pasted in.
    ///
    /// A blank buffer is replaced by the list. Otherwise `", "` joins the
    /// list to the existing text, or just `" "` when the text already ends
    /// with a comma. Returns `None` when the list holds no tags.
    pub fn append_list(&self, buffer: &str, tags: &str) -> Option<Insertion> {
        let display: Vec<String> = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| to_display_form(t, self.case))
            .collect();
        if display.is_empty() {
            return None;
        }
        let joined = join_tags(&display);

        let out = if buffer.trim().is_empty() {
            joined
        } else if buffer.trim_end().ends_with(',') {
            format!("{buffer} {joined}")
        } else {
            format!("{buffer}, {joined}")
        };
        let cursor = out.chars().count();
        Some(Insertion {
            buffer: out,
            cursor,
        })
    }
}

/// Append a tag list using the default title-cased display form.
pub fn insert_tag_list(buffer: &str, tags: &str) -> Option<Insertion> {
    InsertionEngine::default().append_list(buffer, tags)
}

/// Insert with comma separators and title-cased display form.
pub fn apply_suggestion(buffer: &str, cursor: usize, tag: &str) -> Insertion {
    InsertionEngine::default().insert(buffer, cursor, tag)
}
