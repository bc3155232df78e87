//! Sentence-level noise filtering.
//!
//! Each sentence goes through four steps, in order:
//!
//! 1. a leading all-digit token is dropped (`"7 hello there"` → `"hello there"`)
//! 2. a leading special character is dropped (`"- item one two"` → `"item one two"`)
//! 3. sentences where any single special character occurs too often are rejected
//! 4. sentences with too few whitespace tokens are rejected
//!
//! Steps 1 and 2 only apply to sentences with more than one token. Survivors
//! keep their relative order.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Characters counted as "special" by the strip and noise steps.
pub const SPECIAL_CHARS: &[char] = &[
    ',', '?', ';', '.', ':', '/', '=', '+', '%', '`', '¨', '^', '*', '$', '€', '-', '_', '(',
    ')', '°', '!', '§', '\'', '"', '&', '@', '#', '~', '®', '†', 'º', 'π', '‡', '¬', '≈', '©',
    '◊', '∞', 'µ', '…', '÷', '≠', '<', '>',
];

pub fn is_special(c: char) -> bool {
    SPECIAL_CHARS.contains(&c)
}

/// Thresholds for the two rejection steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Reject when one special character occurs at least this many times.
    pub special_char_limit: usize,
    /// Reject when the sentence has fewer whitespace tokens than this.
    pub min_tokens: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            special_char_limit: 15,
            min_tokens: 3,
        }
    }
}

/// What the filter decided for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    /// Kept, possibly with a leading number or special character removed.
    Keep(&'a str),
    Noisy,
    TooShort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub sentences: usize,
    pub kept: usize,
    pub rejected_noisy: usize,
    pub rejected_short: usize,
}

impl FilterStats {
    fn record(&mut self, verdict: &Verdict<'_>) {
        self.sentences += 1;
        match verdict {
            Verdict::Keep(_) => self.kept += 1,
            Verdict::Noisy => self.rejected_noisy += 1,
            Verdict::TooShort => self.rejected_short += 1,
        }
    }
}

impl AddAssign for FilterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.sentences += rhs.sentences;
        self.kept += rhs.kept;
        self.rejected_noisy += rhs.rejected_noisy;
        self.rejected_short += rhs.rejected_short;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceFilter {
    config: FilterConfig,
}

impl SentenceFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Run the four steps on one sentence.
    pub fn judge<'a>(&self, sentence: &'a str) -> Verdict<'a> {
        let mut s = sentence;

        if let Some((first, rest)) = split_first_token(s)
            && first.chars().all(|c| c.is_ascii_digit())
        {
            s = rest;
        }

        if split_first_token(s).is_some()
            && let Some(c) = s.chars().next()
            && is_special(c)
        {
            s = s[c.len_utf8()..].trim_start();
        }

        if max_special_count(s) >= self.config.special_char_limit {
            return Verdict::Noisy;
        }
        if s.split_whitespace().count() < self.config.min_tokens {
            return Verdict::TooShort;
        }
        Verdict::Keep(s)
    }

    /// Filter a document's sentences, preserving order.
    pub fn filter<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<String> {
        let mut stats = FilterStats::default();
        self.filter_with_stats(sentences, &mut stats)
    }

    pub fn filter_with_stats<S: AsRef<str>>(
        &self,
        sentences: &[S],
        stats: &mut FilterStats,
    ) -> Vec<String> {
        sentences
            .iter()
            .filter_map(|sentence| {
                let verdict = self.judge(sentence.as_ref());
                stats.record(&verdict);
                match verdict {
                    Verdict::Keep(s) => Some(s.to_string()),
                    Verdict::Noisy | Verdict::TooShort => None,
                }
            })
            .collect()
    }
}

/// First token and the rest (leading whitespace removed), if there are at
/// least two tokens.
fn split_first_token(s: &str) -> Option<(&str, &str)> {
    let (first, rest) = s.trim_start().split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    (!rest.is_empty()).then_some((first, rest))
}

/// Highest occurrence count of any single special character.
fn max_special_count(s: &str) -> usize {
    SPECIAL_CHARS
        .iter()
        .map(|&c| s.matches(c).count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge(s: &str) -> Verdict<'_> {
        SentenceFilter::default().judge(s)
    }

    #[test]
    fn special_set_has_no_duplicates() {
        let mut chars = SPECIAL_CHARS.to_vec();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), SPECIAL_CHARS.len());
        assert_eq!(SPECIAL_CHARS.len(), 44);
    }

    #[test]
    fn leading_number_is_stripped() {
        assert_eq!(judge("7 hello there world"), Verdict::Keep("hello there world"));
        assert_eq!(judge("12   spaced out words"), Verdict::Keep("spaced out words"));
    }

    #[test]
    fn lone_number_is_left_alone_then_rejected() {
        assert_eq!(judge("42"), Verdict::TooShort);
    }

    #[test]
    fn mixed_token_is_not_a_number() {
        assert_eq!(judge("7a hello world"), Verdict::Keep("7a hello world"));
    }

    #[test]
    fn leading_special_char_is_stripped() {
        assert_eq!(judge("- item one two"), Verdict::Keep("item one two"));
        assert_eq!(judge("(see the notes"), Verdict::Keep("see the notes"));
        assert_eq!(judge("3 * bullet point here"), Verdict::Keep("bullet point here"));
    }

    #[test]
    fn only_one_special_char_is_stripped() {
        assert_eq!(judge("-- two dashes here"), Verdict::Keep("- two dashes here"));
    }

    #[test]
    fn dense_special_chars_are_noise() {
        let dots = format!("word {} more words", ".".repeat(20));
        assert_eq!(judge(&dots), Verdict::Noisy);
        let fourteen = format!("a b c {}", "=".repeat(14));
        assert!(matches!(judge(&fourteen), Verdict::Keep(_)));
        let fifteen = format!("a b c {}", "=".repeat(15));
        assert_eq!(judge(&fifteen), Verdict::Noisy);
    }

    #[test]
    fn short_sentences_are_rejected() {
        assert_eq!(judge("ok fine"), Verdict::TooShort);
        assert_eq!(judge("1 ok fine"), Verdict::TooShort);
        assert_eq!(judge(""), Verdict::TooShort);
    }

    #[test]
    fn thresholds_are_configurable() {
        let filter = SentenceFilter::new(FilterConfig {
            special_char_limit: 3,
            min_tokens: 2,
        });
        assert_eq!(filter.judge("ok fine"), Verdict::Keep("ok fine"));
        assert_eq!(filter.judge("a, b, c, d"), Verdict::Noisy);
    }

    #[test]
    fn stats_add_up() {
        let filter = SentenceFilter::default();
        let mut stats = FilterStats::default();
        let dots = ".".repeat(20);
        let kept = filter.filter_with_stats(
            &["7 hello there world", "ok fine", dots.as_str()],
            &mut stats,
        );
        assert_eq!(kept, vec!["hello there world"]);
        assert_eq!(
            stats,
            FilterStats {
                sentences: 3,
                kept: 1,
                rejected_noisy: 1,
                rejected_short: 1,
            }
        );
    }
}
