//! Word n-gram extraction.
use hashbrown::HashSet;

/// Set of unique word n-grams of a document.
pub type ShingleSet = HashSet<String>;

/// Sliding window of `window_size` consecutive tokens.
pub(crate) struct ShingleIter<'a, T> {
    tokens: &'a [T],
    window_size: usize,
    position: usize,
}

impl<'a, T> ShingleIter<'a, T> {
    pub fn new(tokens: &'a [T], window_size: usize) -> Self {
        debug_assert!(window_size >= 1);
        Self {
            tokens,
            window_size,
            position: 0,
        }
    }
}

impl<'a, T> Iterator for ShingleIter<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.tokens.len() < self.position + self.window_size {
            return None;
        }
        let window = &self.tokens[self.position..self.position + self.window_size];
        self.position += 1;
        Some(window)
    }
}

/// Extracts the set of word n-grams from normalized text.
///
/// Words are split on whitespace and every window of `n` words is joined with
/// single spaces. Text with fewer than `n` words yields an empty set.
///
/// # Panics
///
/// It will panic if `n` is 0.
pub fn shingles<S>(normalized_text: S, n: usize) -> ShingleSet
where
    S: AsRef<str>,
{
    assert!(n >= 1, "n-gram length must not be 0");
    let words: Vec<&str> = normalized_text.as_ref().split_whitespace().collect();
    ShingleIter::new(&words, n)
        .map(|window| window.join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q1() {
        let tokens = vec!["a", "b", "c"];
        let mut iter = ShingleIter::new(&tokens, 1);
        assert_eq!(iter.next(), Some(&tokens[0..1]));
        assert_eq!(iter.next(), Some(&tokens[1..2]));
        assert_eq!(iter.next(), Some(&tokens[2..3]));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_q3() {
        let tokens = vec!["a", "b", "c"];
        let mut iter = ShingleIter::new(&tokens, 3);
        assert_eq!(iter.next(), Some(&tokens[0..3]));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_q4() {
        let tokens = vec!["a", "b", "c"];
        let mut iter = ShingleIter::new(&tokens, 4);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_word_bigrams() {
        let expected: ShingleSet = ["a b", "b c", "c d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(shingles("a b c d", 2), expected);
    }

    #[test]
    fn test_repeated_shingles_collapse() {
        let set = shingles("to be or not to be", 2);
        assert_eq!(set.len(), 4);
        assert!(set.contains("to be"));
        assert!(set.contains("not to"));
    }

    #[test]
    fn test_too_few_words() {
        assert!(shingles("only four words here", 5).is_empty());
        assert!(shingles("", 1).is_empty());
    }

    #[test]
    #[should_panic]
    fn test_zero_length() {
        shingles("a b c", 0);
    }
}
