//! Tiered relevance ranking of tags against a typed query.
//!
//! Every tag matching the query falls into exactly one tier:
//!
//! 1. **Exact**: the lowercase tag equals the query.
//! 2. **Prefix**: the lowercase tag starts with the query.
//! 3. **Word boundary**: the first occurrence of the query starts a word
//!    inside the tag, i.e. it is preceded by one of `_ - space :`.
//! 4. **Substring**: the query first occurs mid-word.
//!
//! Tiers are concatenated in that order. Inside a tier tags sort by weight
//! (descending), then match position, then length, then index order. There
//! is no fuzzy fallback: a query that matches nothing yields nothing.


use std::cmp::Reverse;
use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::tagdb::TagIndex;

/// Characters after which a match counts as starting a word.
const WORD_SEPARATORS: &[char] = &['_', '-', ' ', ':'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Prefix,
    WordBoundary,
    Substring,
}

/// A ranked suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTag {
    pub tag: String,
    pub weight: u64,
    pub tier: MatchTier,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// Position in the index; also the final tie-break.
    idx: usize,
    weight: u64,
    tier: MatchTier,
    /// Char offset of the match inside the lowercase tag.
    pos: usize,
    /// Tag length in chars.
    len: usize,
}

impl Candidate {
    fn sort_key(&self) -> (MatchTier, Reverse<u64>, usize, usize, usize) {
        (self.tier, Reverse(self.weight), self.pos, self.len, self.idx)
    }
}

/// Lowercase and trim a raw query. Also used as the cache key.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Classify a lowercase tag against a normalized, non-empty query.
///
/// Returns the tier and the char offset of the match.
pub fn classify(lower: &str, query: &str) -> Option<(MatchTier, usize)> {
    if lower == query {
        return Some((MatchTier::Exact, 0));
    }
    if lower.starts_with(query) {
        return Some((MatchTier::Prefix, 0));
    }
    let first = lower.find(query)?;
    let tier = if lower[..first].ends_with(WORD_SEPARATORS) {
        MatchTier::WordBoundary
    } else {
        MatchTier::Substring
    };
    Some((tier, lower[..first].chars().count()))
}

/// Whether no tag at or after the current scan position can enter the
/// result. The index is sorted by descending weight, so once the top
/// `need` prefix matches all outweigh the current tag, nothing later can
/// displace them and lower tiers only ever rank after them.
fn prefix_tier_settled(prefix: &[Candidate], need: usize, weight: u64) -> bool {
    need == 0 || (prefix.len() >= need && weight < prefix[need - 1].weight)
}

/// Rank `index` against `query`, returning at most `limit` tags.
///
/// An empty or whitespace-only query, an empty index, or a zero limit all
/// yield an empty list.
pub fn rank(query: &str, index: &TagIndex, limit: usize) -> Vec<RankedTag> {
    let q = normalize_query(query);
    if q.is_empty() || index.is_empty() || limit == 0 {
        return Vec::new();
    }
    let _span = debug_span!("rank", query = %q, limit).entered();

    let entries = index.entries();
    let exact = index.position_lower(&q).map(|idx| Candidate {
        idx,
        weight: entries[idx].weight,
        tier: MatchTier::Exact,
        pos: 0,
        len: entries[idx].tag.chars().count(),
    });
    let need = limit - usize::from(exact.is_some());

    let mut prefix: Vec<Candidate> = Vec::new();
    let mut rest: Vec<Candidate> = Vec::new();
    let mut scanned = 0usize;

    for (idx, entry) in entries.iter().enumerate() {
        if prefix_tier_settled(&prefix, need, entry.weight) {
            break;
        }
        scanned += 1;
        let Some((tier, pos)) = classify(&entry.lower, &q) else {
            continue;
        };
        let candidate = Candidate {
            idx,
            weight: entry.weight,
            tier,
            pos,
            len: entry.tag.chars().count(),
        };
        match tier {
            MatchTier::Exact => {}
            MatchTier::Prefix => prefix.push(candidate),
            MatchTier::WordBoundary | MatchTier::Substring => {
                if prefix.len() < need {
                    rest.push(candidate);
                }
            }
        }
    }

    prefix.sort_by_key(Candidate::sort_key);
    rest.sort_by_key(Candidate::sort_key);

    let mut seen = HashSet::new();
    let mut ranked = Vec::with_capacity(limit.min(entries.len()));
    for c in exact.into_iter().chain(prefix).chain(rest) {
        let entry = &entries[c.idx];
        if !seen.insert(entry.lower.as_str()) {
            continue;
        }
        ranked.push(RankedTag {
            tag: entry.tag.clone(),
            weight: entry.weight,
            tier: c.tier,
        });
        if ranked.len() == limit {
            break;
        }
    }

    debug!(
        scanned,
        total = entries.len(),
        results = ranked.len(),
        "ranked"
    );
    ranked
}
