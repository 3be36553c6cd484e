//! Tiered relevance classification of a normalized name against a normalized query.
//!
//! Tiers are checked strictly in order and the first one that applies wins,
//! even when a later tier would score higher.

use super::fuzzy_matcher::FuzzyMatcher;
use std::ops::Range;

/// Relevance of a name that starts with the query.
pub const PREFIX_RELEVANCE: i32 = 100;

/// Relevance of a name containing the query right after a space.
pub const WORD_BOUNDARY_RELEVANCE: i32 = 50;

/// Relevance of a name containing the query anywhere else.
pub const SUBSTRING_RELEVANCE: i32 = 4;

/// Upper bound on the edit distance tolerated by the fuzzy tier.
pub const MAX_FUZZY_LIMIT: usize = 4;

/// Outcome of classifying one candidate.
///
/// Offsets and lengths are byte offsets into the normalized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// No tier applies
    NoMatch,

    /// Name starts with the query
    ExactPrefix { len: usize },

    /// Name contains `" " + query`; `len` includes the leading space
    WordBoundary { start: usize, len: usize },

    /// Name contains the query at a non-boundary position
    Substring { start: usize, len: usize },

    /// Name is within `limit` edits of the query
    Fuzzy { distance: usize, limit: usize },
}

impl MatchTier {
    /// Classify `name` against `query`; both must already be normalized.
    pub fn classify(query: &str, name: &str) -> Self {
        if name.starts_with(query) {
            return Self::ExactPrefix { len: query.len() };
        }

        let query_with_space = format!(" {}", query);
        if let Some(start) = name.find(&query_with_space) {
            return Self::WordBoundary {
                start,
                len: query_with_space.len(),
            };
        }

        if let Some(start) = name.find(query) {
            return Self::Substring {
                start,
                len: query.len(),
            };
        }

        Self::classify_fuzzy(query, name)
    }

    fn classify_fuzzy(query: &str, name: &str) -> Self {
        let name_len = name.chars().count();
        let query_len = query.chars().count();
        let limit = fuzzy_limit(name_len);

        // Cheap gate before running the edit distance at all.
        if name_len.abs_diff(query_len) >= limit {
            return Self::NoMatch;
        }

        match FuzzyMatcher::distance_within(name, query, limit) {
            // A distance equal to the limit scores zero, which is not a match.
            Some(distance) if distance < limit => Self::Fuzzy { distance, limit },
            _ => Self::NoMatch,
        }
    }

    /// Relevance score for this tier; `0` means no match.
    pub fn relevance(&self) -> i32 {
        match self {
            Self::NoMatch => 0,
            Self::ExactPrefix { .. } => PREFIX_RELEVANCE,
            Self::WordBoundary { .. } => WORD_BOUNDARY_RELEVANCE,
            Self::Substring { .. } => SUBSTRING_RELEVANCE,
            Self::Fuzzy { distance, limit } => (*limit as i32) - (*distance as i32),
        }
    }

    /// Highlight region in the normalized name; fuzzy matches never have one.
    pub fn highlight(&self) -> Option<Range<usize>> {
        match self {
            Self::ExactPrefix { len } => Some(0..*len),
            Self::WordBoundary { start, len } | Self::Substring { start, len } => {
                Some(*start..*start + *len)
            }
            Self::NoMatch | Self::Fuzzy { .. } => None,
        }
    }

    /// Whether this tier counts as a match.
    pub fn is_match(&self) -> bool {
        self.relevance() > 0
    }

    /// Short label used in logs and tool responses.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoMatch => "none",
            Self::ExactPrefix { .. } => "prefix",
            Self::WordBoundary { .. } => "word",
            Self::Substring { .. } => "substring",
            Self::Fuzzy { .. } => "fuzzy",
        }
    }
}

/// Maximum edit distance tolerated for a name of `name_len` characters:
/// half the length rounded half-up, capped at [`MAX_FUZZY_LIMIT`].
pub fn fuzzy_limit(name_len: usize) -> usize {
    ((name_len + 1) / 2).min(MAX_FUZZY_LIMIT)
}
