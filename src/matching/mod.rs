//! Matching primitives for launcher search.
//!
//! - `fuzzy_matcher`: bounded edit distance between normalized strings
//! - `tier`: the ordered relevance tiers applied to every candidate

pub mod fuzzy_matcher;
pub mod tier;

pub use fuzzy_matcher::FuzzyMatcher;
pub use tier::{
    fuzzy_limit, MatchTier, MAX_FUZZY_LIMIT, PREFIX_RELEVANCE, SUBSTRING_RELEVANCE,
    WORD_BOUNDARY_RELEVANCE,
};
