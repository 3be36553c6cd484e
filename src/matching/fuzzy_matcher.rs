//! Bounded edit distance between normalized strings.
//!
//! Unit-cost Levenshtein (insert, delete, substitute) over `char`s. Callers
//! that only need to know whether a candidate is within a limit use
//! [`FuzzyMatcher::distance_within`], which stops as soon as the limit is
//! provably exceeded.

/// Stateless edit-distance matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher;

impl FuzzyMatcher {
    /// Exact edit distance between `a` and `b`.
    pub fn distance(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        Self::levenshtein(&a, &b, usize::MAX).unwrap_or(usize::MAX)
    }

    /// Edit distance between `a` and `b`, or `None` once it exceeds `limit`.
    ///
    /// The exact value is only computed for candidates within the limit.
    pub fn distance_within(a: &str, b: &str, limit: usize) -> Option<usize> {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        // The distance is at least the length difference.
        if a.len().abs_diff(b.len()) > limit {
            return None;
        }

        Self::levenshtein(&a, &b, limit)
    }

    /// Two-row Levenshtein with a per-row abort once every cell exceeds `limit`.
    fn levenshtein(s1: &[char], s2: &[char], limit: usize) -> Option<usize> {
        if s1.is_empty() {
            return (s2.len() <= limit).then_some(s2.len());
        }
        if s2.is_empty() {
            return (s1.len() <= limit).then_some(s1.len());
        }

        let mut previous: Vec<usize> = (0..=s2.len()).collect();
        let mut current: Vec<usize> = vec![0; s2.len() + 1];

        for (i, c1) in s1.iter().enumerate() {
            current[0] = i + 1;
            let mut row_min = current[0];

            for (j, c2) in s2.iter().enumerate() {
                let cost = if c1 == c2 { 0 } else { 1 };
                current[j + 1] = (previous[j + 1] + 1)
                    .min(current[j] + 1)
                    .min(previous[j] + cost);
                row_min = row_min.min(current[j + 1]);
            }

            // Row minima never decrease, so nothing later can get back under the limit.
            if row_min > limit {
                return None;
            }

            std::mem::swap(&mut previous, &mut current);
        }

        let distance = previous[s2.len()];
        (distance <= limit).then_some(distance)
    }
}
