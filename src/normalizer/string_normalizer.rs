//! Lowercasing, accent-stripping normalizer with an offset map.
//!
//! Policy:
//! - canonical decomposition (NFD), then non-spacing marks (`Mn`) are
//!   dropped; spacing marks such as Indic vowel signs are letters and stay
//! - the remaining characters are lowercased
//! - punctuation and whitespace pass through untouched
//!
//! All offsets are byte offsets. The position map holds one entry per byte
//! of the normalized text, each pointing at the start of the raw character
//! that produced it, so any normalized offset maps onto a char boundary of
//! the raw string.

use crate::error::{NormalizeError, NormalizeResult};
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Normalized text together with its mapping back to the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    /// Canonical form: lowercase, accents stripped
    pub text: String,

    /// `position_map[i]` is the raw byte offset that produced normalized byte `i`
    pub position_map: Vec<usize>,

    /// Byte length of the raw string, returned for out-of-range lookups
    pub raw_len: usize,
}

impl NormalizedText {
    /// Map a normalized byte offset to a raw byte offset.
    ///
    /// Offsets past the end of the map resolve to the raw string's length.
    pub fn map_position(&self, position: usize) -> usize {
        self.position_map
            .get(position)
            .copied()
            .unwrap_or(self.raw_len)
    }
}

fn is_accent(c: char) -> bool {
    get_general_category(c) == GeneralCategory::NonspacingMark
}

/// Fold a single raw character into `out`.
fn fold_char_into(c: char, out: &mut String) {
    for base in std::iter::once(c).nfd().filter(|d| !is_accent(*d)) {
        for lower in base.to_lowercase() {
            // Lowercasing can reintroduce a decomposable character (e.g. U+0130).
            out.extend(std::iter::once(lower).nfd().filter(|d| !is_accent(*d)));
        }
    }
}

/// Normalize text into its canonical search form.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        fold_char_into(c, &mut out);
    }
    out
}

/// Normalize text and record where each normalized byte came from.
///
/// A raw character that folds to nothing contributes no entries; one that
/// folds to several characters maps all of them to its own start offset.
pub fn normalize_with_map(text: &str) -> NormalizedText {
    let mut normalized = String::with_capacity(text.len());
    let mut position_map = Vec::with_capacity(text.len());

    for (raw_offset, c) in text.char_indices() {
        let before = normalized.len();
        fold_char_into(c, &mut normalized);
        let produced = normalized.len() - before;
        position_map.extend(std::iter::repeat(raw_offset).take(produced));
    }

    NormalizedText {
        text: normalized,
        position_map,
        raw_len: text.len(),
    }
}

/// Digits of a phone number, everything else dropped.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Phone form of a normalized query.
///
/// Only queries made of digits and dialing punctuation (`+ - ( ) .` and
/// spaces) with at least one digit qualify.
pub fn phone_query(query: &str) -> Option<String> {
    let dialable = query
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));
    let digits = normalize_phone(query);
    (dialable && !digits.is_empty()).then_some(digits)
}

/// Normalize possibly-absent text.
///
/// # Errors
///
/// Returns `NormalizeError::InvalidInput` when `text` is `None`. An empty
/// string is valid and normalizes to an empty string.
pub fn try_normalize(text: Option<&str>) -> NormalizeResult<String> {
    text.map(normalize).ok_or(NormalizeError::InvalidInput)
}

/// Normalize user-typed query text; an absent query is treated as empty.
pub fn normalize_query(text: Option<&str>) -> String {
    try_normalize(text).unwrap_or_else(|_| {
        tracing::trace!("Absent query text treated as empty");
        String::new()
    })
}

/// Map a normalized offset back to `raw` using an optional position map.
///
/// Without a map the identity mapping applies. Either way, offsets past the
/// end resolve to `raw.len()`, and the result is always a char boundary.
pub fn map_position(position_map: Option<&[usize]>, position: usize, raw: &str) -> usize {
    let mapped = match position_map {
        Some(map) => map.get(position).copied().unwrap_or(raw.len()),
        None => position.min(raw.len()),
    };
    floor_char_boundary(raw, mapped)
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
