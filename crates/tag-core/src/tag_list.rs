//! Operations over a whole comma-separated tag list.

use std::collections::HashSet;

use serde::Serialize;

/// Pixel count at or above which an image is "high res" (2000×2000).
pub const HIGH_RES_PIXELS: u64 = 4_000_000;
/// Pixel count at or above which an image is "absurd resolution" (4000×4000).
pub const ABSURD_RES_PIXELS: u64 = 16_000_000;

const QUANTITY_TAGS: &[&str] = &["solo", "duo", "trio", "group", "crowd"];

const SPECIES_TAGS: &[&str] = &[
    "pony",
    "earth pony",
    "pegasus",
    "unicorn",
    "alicorn",
    "bat pony",
    "dragon",
    "griffon",
    "griffin",
    "changeling",
    "zebra",
    "donkey",
    "mule",
    "hippogriff",
    "seapony",
    "sea pony",
    "kirin",
    "yak",
    "buffalo",
    "minotaur",
    "anthro",
    "human",
    "humanized",
    "robot",
    "cyborg",
];

/// Coarse tag class used for highlighting and list ordering.
///
/// Variants are declared in promotion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Artist,
    OriginalCharacter,
    Quantity,
    Species,
    General,
}

impl TagCategory {
    /// Classify a tag in either storage or display form.
    pub fn classify(tag: &str) -> Self {
        let lower = tag.trim().to_lowercase();
        if lower.starts_with("artist:") {
            TagCategory::Artist
        } else if lower.starts_with("oc:") {
            TagCategory::OriginalCharacter
        } else if QUANTITY_TAGS.contains(&lower.as_str()) {
            TagCategory::Quantity
        } else if is_species(&lower) {
            TagCategory::Species
        } else {
            TagCategory::General
        }
    }

    pub fn is_priority(self) -> bool {
        self != TagCategory::General
    }
}

fn is_species(lower: &str) -> bool {
    let spaced = lower.replace(['_', '+'], " ");
    SPECIES_TAGS.contains(&spaced.as_str())
}

/// Split a comma-separated list, trimming and dropping empty entries.
/// Case-insensitive duplicates keep their first occurrence.
pub fn parse_tags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .map(str::to_string)
        .collect()
}

pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    let mut out = String::new();
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(tag.as_ref());
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "text", rename_all = "snake_case")]
pub enum Reorder {
    /// The list has no tags.
    Empty,
    /// Fewer than two tags; nothing to reorder.
    TooFew,
    /// Priority tags already lead the list.
    AlreadyOrdered,
    /// The rewritten list.
    Reordered(String),
}

/// Move artist, OC, quantity and species tags (in that order) to the front,
/// keeping everything else in its original order.
pub fn promote_priority_tags(text: &str) -> Reorder {
    let tags = parse_tags(text);
    match tags.len() {
        0 => return Reorder::Empty,
        1 => return Reorder::TooFew,
        _ => {}
    }

    let mut keyed: Vec<(TagCategory, &String)> =
        tags.iter().map(|t| (TagCategory::classify(t), t)).collect();
    keyed.sort_by_key(|&(category, _)| category);
    let reordered: Vec<&String> = keyed.into_iter().map(|(_, t)| t).collect();

    if reordered.iter().zip(&tags).all(|(a, b)| *a == b) {
        Reorder::AlreadyOrdered
    } else {
        Reorder::Reordered(join_tags(&reordered))
    }
}

/// The resolution tag an image of `width`×`height` pixels deserves, if any.
pub fn resolution_tag(width: u32, height: u32) -> Option<&'static str> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels >= ABSURD_RES_PIXELS {
        Some("absurd resolution")
    } else if pixels >= HIGH_RES_PIXELS {
        Some("high res")
    } else {
        None
    }
}

/// Append `tag` to the list unless it is already present (case-insensitive).
/// Returns the rewritten list, or `None` when nothing changed.
pub fn add_tag_if_missing(text: &str, tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }
    let mut tags: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    let lower = tag.to_lowercase();
    if tags.iter().any(|t| t.to_lowercase() == lower) {
        return None;
    }
    tags.push(tag.to_string());
    Some(join_tags(&tags))
}
