//! Exact Jaccard verification of candidate pairs.
use std::hash::Hash;

use hashbrown::HashSet;

/// Computes the exact Jaccard similarity `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets are identical (`1.0`); an empty set against a non-empty one
/// is `0.0`.
///
/// # Examples
///
/// ```
/// use hashbrown::HashSet;
/// use fuzzy_dedup::jaccard::jaccard_similarity;
///
/// let a: HashSet<_> = ["a b", "b c"].into_iter().collect();
/// let b: HashSet<_> = ["b c", "c d"].into_iter().collect();
/// assert_eq!(jaccard_similarity(&a, &b), 1. / 3.);
/// ```
pub fn jaccard_similarity<T>(lhs: &HashSet<T>, rhs: &HashSet<T>) -> f64
where
    T: Hash + Eq,
{
    match (lhs.is_empty(), rhs.is_empty()) {
        (true, true) => return 1.,
        (true, false) | (false, true) => return 0.,
        _ => {}
    }
    let (small, large) = if lhs.len() <= rhs.len() {
        (lhs, rhs)
    } else {
        (rhs, lhs)
    };
    let intersection = small.iter().filter(|x| large.contains(*x)).count();
    let union = lhs.len() + rhs.len() - intersection;
    intersection as f64 / union as f64
}

/// Checks if the similarity reaches `threshold` (inclusive).
pub fn is_duplicate<T>(lhs: &HashSet<T>, rhs: &HashSet<T>, threshold: f64) -> bool
where
    T: Hash + Eq,
{
    jaccard_similarity(lhs, rhs) >= threshold
}
