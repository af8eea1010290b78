//! Locating the delimited fragment under the cursor.
//!
//! Offsets are counted in `char`s, matching what text widgets report as a
//! cursor position. Cursors past the end of the buffer are clamped.

use serde::Serialize;

/// The slice of a buffer between the delimiters surrounding the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    /// Raw, untrimmed fragment text.
    pub text: String,
    /// Char offset of the first fragment character (just past the left delimiter).
    pub start: usize,
    /// Char offset one past the last fragment character (at the right delimiter).
    pub end: usize,
}

impl Fragment {
    /// Fragment text with surrounding whitespace removed, used for matching.
    pub fn query(&self) -> &str {
        self.text.trim()
    }

    /// Leading whitespace run, preserved verbatim on insertion.
    pub fn leading_whitespace(&self) -> &str {
        let trimmed = self.text.trim_start();
        &self.text[..self.text.len() - trimmed.len()]
    }

    pub fn is_blank(&self) -> bool {
        self.query().is_empty()
    }
}

/// Finds fragment boundaries for a fixed set of delimiter characters.
#[derive(Debug, Clone, Copy)]
pub struct FragmentResolver {
    delimiters: &'static [char],
}

impl Default for FragmentResolver {
    fn default() -> Self {
        Self::new(&[','])
    }
}

impl FragmentResolver {
    pub fn new(delimiters: &'static [char]) -> Self {
        Self { delimiters }
    }

    pub fn delimiters(&self) -> &'static [char] {
        self.delimiters
    }

    /// Resolve the fragment containing `cursor`.
    ///
    /// The left boundary is the nearest delimiter strictly before the cursor,
    /// the right boundary the nearest delimiter at or after it; both are
    /// excluded from the fragment.
    pub fn resolve(&self, buffer: &str, cursor: usize) -> Fragment {
        let cursor_byte = char_to_byte(buffer, cursor);
        let (before, after) = buffer.split_at(cursor_byte);

        let start_byte = before
            .rfind(self.delimiters)
            .map_or(0, |i| i + before[i..].chars().next().map_or(1, char::len_utf8));
        let end_byte = after
            .find(self.delimiters)
            .map_or(buffer.len(), |i| cursor_byte + i);

        let start = before[..start_byte].chars().count();
        let text = &buffer[start_byte..end_byte];
        Fragment {
            text: text.to_string(),
            start,
            end: start + text.chars().count(),
        }
    }
}

/// Resolve a comma-delimited fragment.
pub fn resolve_fragment(buffer: &str, cursor: usize) -> Fragment {
    FragmentResolver::default().resolve(buffer, cursor)
}

/// Byte offset of the `cursor`-th char, clamped to the buffer length.
pub fn char_to_byte(buffer: &str, cursor: usize) -> usize {
    buffer
        .char_indices()
        .nth(cursor)
        .map_or(buffer.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_between_commas() {
        let f = resolve_fragment("safe, rai, solo", 9);
        assert_eq!(f.text, " rai");
        assert_eq!((f.start, f.end), (5, 9));
        assert_eq!(f.query(), "rai");
        assert_eq!(f.leading_whitespace(), " ");
    }

    #[test]
    fn cursor_mid_token_takes_whole_fragment() {
        let f = resolve_fragment("safe, rainbow, solo", 8);
        assert_eq!(f.text, " rainbow");
        assert_eq!((f.start, f.end), (5, 13));
    }

    #[test]
    fn no_delimiters_spans_buffer() {
        let f = resolve_fragment("pony", 2);
        assert_eq!(f.text, "pony");
        assert_eq!((f.start, f.end), (0, 4));
    }

    #[test]
    fn cursor_right_after_comma() {
        let f = resolve_fragment("safe,solo", 5);
        assert_eq!(f.text, "solo");
        assert_eq!(f.start, 5);
    }

    #[test]
    fn cursor_right_before_comma() {
        let f = resolve_fragment("safe,solo", 4);
        assert_eq!(f.text, "safe");
        assert_eq!((f.start, f.end), (0, 4));
    }

    #[test]
    fn trailing_separator_gives_blank_fragment() {
        let f = resolve_fragment("safe, ", 6);
        assert_eq!(f.text, " ");
        assert!(f.is_blank());
        assert_eq!((f.start, f.end), (5, 6));
    }

    #[test]
    fn empty_buffer() {
        let f = resolve_fragment("", 0);
        assert_eq!(f.text, "");
        assert_eq!((f.start, f.end), (0, 0));
    }

    #[test]
    fn cursor_past_end_is_clamped() {
        let f = resolve_fragment("safe, so", 100);
        assert_eq!(f.text, " so");
        assert_eq!(f.end, 8);
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let f = resolve_fragment("ポニー, épée", 10);
        assert_eq!(f.text, " épée");
        assert_eq!((f.start, f.end), (4, 9));
    }

    #[test]
    fn space_delimited_resolver() {
        let r = FragmentResolver::new(&[',', ' ']);
        let f = r.resolve("safe solo pon", 13);
        assert_eq!(f.text, "pon");
        assert_eq!((f.start, f.end), (10, 13));
    }

    #[test]
    fn char_to_byte_clamps() {
        assert_eq!(char_to_byte("aé", 1), 1);
        assert_eq!(char_to_byte("aé", 2), 3);
        assert_eq!(char_to_byte("aé", 9), 3);
    }
}
