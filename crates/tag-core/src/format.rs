//! Conversions between storage form (`rainbow_dash`) and display form
//! (`Rainbow Dash`), plus suggestion-list text formatting.
//!
//! Display → storage is lossy: `+` and `_` both become spaces, and storage
//! form is always lowercase with `_` for spaces. `to_storage_form` inverts
//! `to_display_form` only for tags made of lowercase letters, digits and `_`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::settings::DisplayCase;

/// Minimum width of a formatted suggestion line, in terminal columns.
const MIN_LINE_WIDTH: usize = 20;
/// Columns reserved for the right-aligned weight.
const WEIGHT_COLUMNS: usize = 8;
const ELLIPSIS: &str = "...";

/// Convert a stored tag to human-facing text.
pub fn to_display_form(tag: &str, case: DisplayCase) -> String {
    let spaced: String = tag
        .chars()
        .map(|c| if c == '_' || c == '+' { ' ' } else { c })
        .collect();
    match case {
        DisplayCase::Preserve => spaced,
        DisplayCase::Title => title_case(&spaced),
    }
}

/// Convert display text back to storage form: lowercase, spaces to `_`.
pub fn to_storage_form(display: &str) -> String {
    display.to_lowercase().replace(' ', "_")
}

/// Uppercase the first character of each space-separated word.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c == ' ';
    }
    out
}

/// Abbreviate a weight: `2204259` → `"2.2M"`, `50000` → `"50.0K"`.
pub fn format_weight(weight: u64) -> String {
    if weight >= 1_000_000 {
        format!("{:.1}M", weight as f64 / 1_000_000.0)
    } else if weight >= 1_000 {
        format!("{:.1}K", weight as f64 / 1_000.0)
    } else {
        weight.to_string()
    }
}

/// Lay out one suggestion row: the tag left-aligned, its weight right-aligned
/// within `width` columns. Tags that would collide with the weight column
/// are cut with `...`.
pub fn format_suggestion_line(display: &str, weight: u64, width: usize) -> String {
    let width = width.max(MIN_LINE_WIDTH);
    let tag_columns = width - WEIGHT_COLUMNS;
    let weight_text = format_weight(weight);

    let tag = if display.width() > tag_columns {
        truncate_to_width(display, tag_columns - ELLIPSIS.len()) + ELLIPSIS
    } else {
        display.to_string()
    };

    let padding = width
        .saturating_sub(tag.width() + weight_text.width())
        .max(1);
    format!("{tag}{}{weight_text}", " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_columns: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_columns {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn display_form_title_case() {
        assert_eq!(
            to_display_form("rainbow_dash", DisplayCase::Title),
            "Rainbow Dash"
        );
        assert_eq!(
            to_display_form("rainbow+dash", DisplayCase::Title),
            "Rainbow Dash"
        );
        assert_eq!(to_display_form("safe", DisplayCase::Title), "Safe");
    }

    #[test]
    fn display_form_preserve() {
        assert_eq!(
            to_display_form("rainbow_dash", DisplayCase::Preserve),
            "rainbow dash"
        );
        assert_eq!(
            to_display_form("artist:Some_One", DisplayCase::Preserve),
            "artist:Some One"
        );
    }

    #[test]
    fn storage_form() {
        assert_eq!(to_storage_form("Rainbow Dash"), "rainbow_dash");
        assert_eq!(to_storage_form("safe"), "safe");
    }

    #[test]
    fn plus_does_not_survive_round_trip() {
        let display = to_display_form("a+b", DisplayCase::Title);
        assert_eq!(to_storage_form(&display), "a_b");
    }

    #[test]
    fn weight_abbreviation() {
        assert_eq!(format_weight(2_204_259), "2.2M");
        assert_eq!(format_weight(50_000), "50.0K");
        assert_eq!(format_weight(1_500), "1.5K");
        assert_eq!(format_weight(999), "999");
        assert_eq!(format_weight(0), "0");
    }

    #[test]
    fn suggestion_line_right_aligns_weight() {
        let line = format_suggestion_line("Safe", 2_204_259, 30);
        assert_eq!(line.width(), 30);
        assert!(line.starts_with("Safe "));
        assert!(line.ends_with(" 2.2M"));
    }

    #[test]
    fn suggestion_line_truncates_long_tags() {
        let tag = "A Very Long Tag Name That Will Not Fit";
        let line = format_suggestion_line(tag, 5, 20);
        assert!(line.starts_with("A Very Lo..."));
        assert!(line.ends_with(" 5"));
        assert_eq!(line.width(), 20);
    }

    #[test]
    fn suggestion_line_uses_minimum_width() {
        let line = format_suggestion_line("Safe", 1, 0);
        assert_eq!(line.width(), MIN_LINE_WIDTH);
    }

    #[test]
    fn suggestion_line_measures_wide_chars() {
        let line = format_suggestion_line("ポニー", 10, 20);
        assert_eq!(line.width(), 20);
    }

    proptest! {
        #[test]
        fn storage_inverts_display(tag in "[a-z0-9_]{1,24}") {
            let display = to_display_form(&tag, DisplayCase::Title);
            prop_assert_eq!(to_storage_form(&display), tag.clone());
            let display = to_display_form(&tag, DisplayCase::Preserve);
            prop_assert_eq!(to_storage_form(&display), tag);
        }

        #[test]
        fn display_has_no_storage_separators(tag in "[a-z_+]{0,24}") {
            let display = to_display_form(&tag, DisplayCase::Title);
            prop_assert!(!display.contains('_') && !display.contains('+'));
            prop_assert_eq!(display.chars().count(), tag.chars().count());
        }
    }
}
