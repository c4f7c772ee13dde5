//! Turning verified candidate pairs into retention decisions.
use rayon::prelude::*;

/// Outcome of cluster resolution over `num_documents` documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    removed: Vec<bool>,
    duplicate_pairs: Vec<(usize, usize)>,
    num_candidates: usize,
    num_verified: usize,
    num_skipped: usize,
}

impl Resolution {
    /// Iterates ids of surviving documents in ascending order.
    pub fn retained(&self) -> impl Iterator<Item = usize> + '_ {
        self.removed
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| (!r).then(|| i))
    }

    /// Iterates ids of removed documents in ascending order.
    pub fn removed(&self) -> impl Iterator<Item = usize> + '_ {
        self.removed
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| r.then(|| i))
    }

    /// Gets the number of documents resolved.
    pub fn num_documents(&self) -> usize {
        self.removed.len()
    }

    /// Gets the number of removed documents.
    pub fn num_removed(&self) -> usize {
        self.removed.iter().filter(|&&r| r).count()
    }

    /// Gets the number of surviving documents.
    pub fn num_retained(&self) -> usize {
        self.num_documents() - self.num_removed()
    }

    /// Gets the verified pairs at or above the threshold, in processing order.
    pub fn duplicate_pairs(&self) -> &[(usize, usize)] {
        &self.duplicate_pairs
    }

    /// Gets the number of unique candidate pairs.
    pub const fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    /// Gets the number of candidate pairs whose similarity was computed.
    pub const fn num_verified(&self) -> usize {
        self.num_verified
    }

    /// Gets the number of candidate pairs skipped because the right side was already removed.
    pub const fn num_skipped(&self) -> usize {
        self.num_skipped
    }
}

/// Sorts pairs as `(min, max)` in ascending order without duplicates or self-pairs.
fn canonical_pairs(candidates: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut pairs: Vec<_> = candidates
        .iter()
        .filter(|(i, j)| i != j)
        .map(|&(i, j)| if i < j { (i, j) } else { (j, i) })
        .collect();
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

/// Resolves candidates greedily.
///
/// Pairs are visited in ascending `(i, j)` order. A pair whose `j` is already
/// removed is skipped without verification; otherwise `j` is removed when
/// `is_duplicate(i, j)` holds. The lower id of a pair is never removed by that
/// pair, but it may be removed by an earlier one, so chains `i-j`, `j-k` drop
/// both `j` and `k` even if `i-k` is never compared.
///
/// # Panics
///
/// It will panic if a candidate holds an id not less than `num_documents`.
pub fn resolve_greedy<F>(
    num_documents: usize,
    candidates: &[(usize, usize)],
    mut is_duplicate: F,
) -> Resolution
where
    F: FnMut(usize, usize) -> bool,
{
    let pairs = canonical_pairs(candidates);
    let mut removed = vec![false; num_documents];
    let mut duplicate_pairs = vec![];
    let mut num_verified = 0;
    let mut num_skipped = 0;
    for &(i, j) in &pairs {
        if removed[j] {
            num_skipped += 1;
            continue;
        }
        num_verified += 1;
        if is_duplicate(i, j) {
            removed[j] = true;
            duplicate_pairs.push((i, j));
        }
    }
    Resolution {
        removed,
        duplicate_pairs,
        num_candidates: pairs.len(),
        num_verified,
        num_skipped,
    }
}

/// Resolves candidates into connected components of verified pairs.
///
/// Every candidate is verified (in parallel), and only the smallest id of each
/// component survives.
///
/// # Panics
///
/// It will panic if a candidate holds an id not less than `num_documents`.
pub fn resolve_transitive<F>(
    num_documents: usize,
    candidates: &[(usize, usize)],
    is_duplicate: F,
) -> Resolution
where
    F: Fn(usize, usize) -> bool + Sync,
{
    let pairs = canonical_pairs(candidates);
    let duplicate_pairs: Vec<_> = pairs
        .par_iter()
        .copied()
        .filter(|&(i, j)| is_duplicate(i, j))
        .collect();

    let mut components = UnionFind::new(num_documents);
    for &(i, j) in &duplicate_pairs {
        components.union(i, j);
    }
    let removed = (0..num_documents).map(|i| components.find(i) != i).collect();

    Resolution {
        removed,
        duplicate_pairs,
        num_candidates: pairs.len(),
        num_verified: pairs.len(),
        num_skipped: 0,
    }
}

/// Disjoint sets whose representative is always the smallest member.
struct UnionFind {
    parents: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parents: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parents[x] != x {
            self.parents[x] = self.parents[self.parents[x]];
            x = self.parents[x];
        }
        x
    }

    fn union(&mut self, x: usize, y: usize) {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx < ry {
            self.parents[ry] = rx;
        } else if ry < rx {
            self.parents[rx] = ry;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &'static [(usize, usize)]) -> impl Fn(usize, usize) -> bool + Sync {
        move |i, j| pairs.contains(&(i, j))
    }

    #[test]
    fn test_chain_keeps_only_head() {
        // 0-1 and 1-2 are duplicates; 0-2 is never a candidate.
        let resolution = resolve_greedy(3, &[(0, 1), (1, 2)], edges(&[(0, 1), (1, 2)]));
        assert_eq!(resolution.retained().collect::<Vec<_>>(), vec![0]);
        assert_eq!(resolution.removed().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(resolution.num_verified(), 2);
        assert_eq!(resolution.num_skipped(), 0);
    }

    #[test]
    fn test_chain_is_order_independent() {
        let expected = resolve_greedy(3, &[(0, 1), (1, 2)], edges(&[(0, 1), (1, 2)]));
        for candidates in [
            vec![(1, 2), (0, 1)],
            vec![(2, 1), (1, 0)],
            vec![(1, 2), (0, 1), (1, 2)],
        ] {
            let resolution = resolve_greedy(3, &candidates, edges(&[(0, 1), (1, 2)]));
            assert_eq!(resolution, expected);
        }
    }

    #[test]
    fn test_skips_removed() {
        let mut calls = vec![];
        let resolution = resolve_greedy(3, &[(0, 2), (1, 2)], |i, j| {
            calls.push((i, j));
            true
        });
        assert_eq!(calls, vec![(0, 2)]);
        assert_eq!(resolution.num_candidates(), 2);
        assert_eq!(resolution.num_verified(), 1);
        assert_eq!(resolution.num_skipped(), 1);
        assert_eq!(resolution.retained().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(resolution.duplicate_pairs(), &[(0, 2)]);
    }

    #[test]
    fn test_below_threshold_keeps_both() {
        let resolution = resolve_greedy(2, &[(0, 1)], |_, _| false);
        assert_eq!(resolution.num_removed(), 0);
        assert_eq!(resolution.num_retained(), 2);
        assert!(resolution.duplicate_pairs().is_empty());
    }

    #[test]
    fn test_no_candidates() {
        let resolution = resolve_greedy(4, &[], |_, _| unreachable!());
        assert_eq!(resolution.num_retained(), 4);
        assert_eq!(resolution.num_candidates(), 0);
    }

    #[test]
    fn test_transitive_closes_components() {
        // 2 is a duplicate of both 0 and 1, so 0, 1, 2 form one component.
        let candidates = [(0, 2), (1, 2), (3, 4)];
        let duplicates = edges(&[(0, 2), (1, 2), (3, 4)]);

        let greedy = resolve_greedy(5, &candidates, &duplicates);
        assert_eq!(greedy.retained().collect::<Vec<_>>(), vec![0, 1, 3]);

        let transitive = resolve_transitive(5, &candidates, &duplicates);
        assert_eq!(transitive.retained().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(transitive.num_verified(), 3);
        assert_eq!(transitive.num_skipped(), 0);
    }

    #[test]
    fn test_transitive_chain() {
        let resolution = resolve_transitive(3, &[(0, 1), (1, 2)], edges(&[(0, 1), (1, 2)]));
        assert_eq!(resolution.retained().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_union_find_keeps_min() {
        let mut uf = UnionFind::new(5);
        uf.union(4, 3);
        uf.union(3, 1);
        uf.union(2, 4);
        assert_eq!(uf.find(4), 1);
        assert_eq!(uf.find(2), 1);
        assert_eq!(uf.find(0), 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_id() {
        resolve_greedy(2, &[(0, 2)], |_, _| true);
    }
}
