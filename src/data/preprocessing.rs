//! # Text Preprocessing
//!
//! Normalization of free review text before scoring.
//!
//! Tag stripping is a single non-greedy `<.*?>` pass, not an HTML parser.
//! Nested or unbalanced angle brackets can leave fragments behind; any
//! stray `<` is removed later by the alphabetic filter.
//!
//! Whitespace follows the regex crate's Unicode `\s`, which excludes the
//! ASCII separators `\x1c`..=`\x1f`; those are dropped rather than turned
//! into a space.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());
static NON_ALPHA_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s]").unwrap());
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Text preprocessor for review text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPreprocessor;

impl TextPreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Normalize review text
    ///
    /// Steps:
    /// 1. Lowercase and trim outer whitespace
    /// 2. Replace angle-bracket tags with a space
    /// 3. Drop everything outside `[a-z\s]`
    /// 4. Collapse whitespace runs to one space
    pub fn preprocess(&self, text: &str) -> String {
        let lowercase = text.to_lowercase();
        let trimmed = lowercase.trim();
        let no_tags = TAG_REGEX.replace_all(trimmed, " ");
        let alpha = NON_ALPHA_REGEX.replace_all(&no_tags, "");
        WHITESPACE_REGEX.replace_all(&alpha, " ").into_owned()
    }

    /// Preprocess a batch, keeping the first occurrence of each result
    ///
    /// Returns the indices of the kept inputs alongside their cleaned text.
    pub fn preprocess_unique<'a, I>(&self, texts: I) -> Vec<(usize, String)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        texts
            .into_iter()
            .enumerate()
            .filter_map(|(i, text)| {
                let clean = self.preprocess(text);
                seen.insert(clean.clone()).then_some((i, clean))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_basic() {
        let preprocessor = TextPreprocessor::new();
        assert_eq!(
            preprocessor.preprocess("This movie was AMAZING!!! <br> Loved it."),
            "this movie was amazing loved it"
        );
        assert_eq!(
            preprocessor.preprocess("It was okay, nothing special..."),
            "it was okay nothing special"
        );
    }

    #[test]
    fn test_tags_replaced_by_space() {
        let preprocessor = TextPreprocessor::new();
        assert_eq!(preprocessor.preprocess("good<br/>fun"), "good fun");
        assert_eq!(preprocessor.preprocess("<i>Great</i> film"), " great film");
    }

    #[test]
    fn test_ascii_separators_are_dropped() {
        let preprocessor = TextPreprocessor::new();
        assert_eq!(preprocessor.preprocess("a\u{1c}b"), "ab");
        assert_eq!(preprocessor.preprocess("a\u{1f}\tb"), "a b");
    }

    #[test]
    fn test_no_trailing_trim_after_collapse() {
        let preprocessor = TextPreprocessor::new();
        assert_eq!(preprocessor.preprocess("the end <b>"), "the end ");
    }

    #[test]
    fn test_malformed_markup_is_best_effort() {
        let preprocessor = TextPreprocessor::new();
        // A '>' inside an attribute ends the match early and leaks a fragment
        assert_eq!(preprocessor.preprocess("<a title='x>y'>text"), " ytext");
        // An unclosed bracket is not a tag, its text survives
        assert_eq!(preprocessor.preprocess("a < b"), "a b");
    }

    #[test]
    fn test_digits_and_unicode_removed() {
        let preprocessor = TextPreprocessor::new();
        assert_eq!(preprocessor.preprocess("10/10 café\ttime"), " caf time");
    }

    #[test]
    fn test_preprocess_unique_keeps_first() {
        let preprocessor = TextPreprocessor::new();
        let kept = preprocessor.preprocess_unique(["Great!", "great", "Bad", "GREAT."]);
        assert_eq!(kept, vec![(0, "great".to_string()), (2, "bad".to_string())]);
    }
}
