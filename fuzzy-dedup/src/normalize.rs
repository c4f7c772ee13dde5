//! Text canonicalization applied before shingling.
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{P}+").unwrap())
}

/// Canonicalizes raw text into a comparison-stable form.
///
/// The steps are, in order: lowercasing, NFD decomposition, (optionally) dropping
/// combining marks, removing Unicode punctuation, and collapsing whitespace runs
/// into single ASCII spaces without leading or trailing ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct Normalizer {
    strips_accents: bool,
}

impl Normalizer {
    /// Creates an instance.
    pub const fn new() -> Self {
        Self {
            strips_accents: false,
        }
    }

    /// Drops combining marks after decomposition, e.g., `"é"` becomes `"e"`.
    pub const fn strips_accents(mut self, yes: bool) -> Self {
        self.strips_accents = yes;
        self
    }

    /// Normalizes the text.
    pub fn normalize<S>(&self, text: S) -> String
    where
        S: AsRef<str>,
    {
        let lowered = text.as_ref().to_lowercase();
        let decomposed: String = if self.strips_accents {
            lowered.nfd().filter(|&c| !is_combining_mark(c)).collect()
        } else {
            lowered.nfd().collect()
        };
        let stripped = punctuation_re().replace_all(&decomposed, "");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Normalizes the text with the default [`Normalizer`].
pub fn normalize<S>(text: S) -> String
where
    S: AsRef<str>,
{
    Normalizer::new().normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("«Quoted» — text…"), "quoted text");
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(normalize("  a\tb\n\n c\u{3000}d  "), "a b c d");
        assert_eq!(normalize("\n\t  "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_nfd() {
        assert_eq!(normalize("Café"), "cafe\u{301}");
        // Precomposed and decomposed inputs agree.
        assert_eq!(normalize("caf\u{e9}"), normalize("cafe\u{301}"));
    }

    #[test]
    fn test_strips_accents() {
        let normalizer = Normalizer::new().strips_accents(true);
        assert_eq!(normalizer.normalize("Crème Brûlée"), "creme brulee");
    }

    #[test]
    fn test_punctuation_inside_words() {
        assert_eq!(normalize("don't re-crawl"), "dont recrawl");
    }
}
