//! Sentence segmentation.
//!
//! The cleaning pipeline only needs one capability from a segmenter: turn a
//! document into an ordered list of sentences. [`SentenceSegmenter`] is that
//! seam. A segmenter is built once by the caller and handed to the pipeline,
//! so an expensive model (if an implementation uses one) is loaded exactly
//! once and never hides in global state.
//!
//! [`RuleSegmenter`] is the built-in implementation: punctuation boundaries
//! with an abbreviation list, tuned for the lowercased ASCII text the
//! normalizer produces.

use std::collections::HashSet;

/// Split natural-language text into an ordered sequence of sentences.
///
/// Implementations must be deterministic for a given input and configuration.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

impl<F> SentenceSegmenter for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn segment(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Abbreviations whose trailing period never ends a sentence.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "vs", "etc", "cf", "al",
    "approx", "est", "dept", "inc", "ltd", "co", "corp", "gen", "gov", "sen", "rep", "rev",
    "ed", "eds", "resp", "viz", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec",
];

/// Abbreviations that only hold before a number (`no. 5`, `fig. 3`).
pub const NUMERIC_ABBREVIATIONS: &[&str] = &[
    "no", "nos", "vol", "vols", "p", "pp", "fig", "figs", "art", "sec", "ch", "eq", "eqs",
    "ref", "refs", "op",
];

const ROMAN_MARKERS: &[&str] = &["i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];

const OPENERS: &[char] = &['(', '[', '{', '"', '\''];
const CLOSERS: &[u8] = b"\"')]}";

/// Punctuation-driven segmenter with abbreviation handling.
///
/// A sentence ends after a run of `.`, `!` or `?` (plus closing quotes and
/// brackets) that is followed by whitespace or the end of the text. A lone
/// period does not end a sentence after a known abbreviation, a single-letter
/// initial, a dotted abbreviation (`e.g.`, `u.s.`), or a leading enumeration
/// marker (`1.`, `iv.`). A blank line always ends a sentence.
#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    abbreviations: HashSet<String>,
    numeric_abbreviations: HashSet<String>,
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            numeric_abbreviations: NUMERIC_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RuleSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add abbreviations (with or without the trailing period, any case).
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations.extend(
            extra
                .into_iter()
                .map(|s| s.as_ref().trim_end_matches('.').to_lowercase()),
        );
        self
    }

    /// Whether the period ending `head` (the sentence so far, period excluded)
    /// belongs to the last word rather than ending the sentence.
    fn period_is_internal(&self, head: &str, tail: &str) -> bool {
        let word = head
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(OPENERS);
        if word.is_empty() {
            return false;
        }
        let lower = word.to_lowercase();

        if self.abbreviations.contains(&lower) {
            return true;
        }
        if self.numeric_abbreviations.contains(&lower)
            && tail
                .trim_start()
                .starts_with(|c: char| c.is_ascii_digit())
        {
            return true;
        }
        if is_initial(&lower) || is_dotted_abbreviation(&lower) {
            return true;
        }

        let first_word = !head.trim_start().contains(char::is_whitespace);
        first_word && is_enumeration_marker(&lower)
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let bytes = text.as_bytes();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    let mut j = i + 1;
                    let mut newlines = 1;
                    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                        newlines += usize::from(bytes[j] == b'\n');
                        j += 1;
                    }
                    if newlines >= 2 {
                        push_trimmed(&mut sentences, &text[start..i]);
                        start = j;
                    }
                    i = j;
                }
                b'.' | b'!' | b'?' => {
                    let mut run_end = i + 1;
                    while run_end < bytes.len() && matches!(bytes[run_end], b'.' | b'!' | b'?') {
                        run_end += 1;
                    }
                    let mut end = run_end;
                    while end < bytes.len() && CLOSERS.contains(&bytes[end]) {
                        end += 1;
                    }

                    let tail = &text[end..];
                    let at_gap = tail.chars().next().is_none_or(char::is_whitespace);
                    let lone_period = bytes[i] == b'.' && run_end == i + 1;
                    let internal = lone_period && self.period_is_internal(&text[start..i], tail);

                    if at_gap && !internal {
                        push_trimmed(&mut sentences, &text[start..end]);
                        start = end;
                    }
                    i = end;
                }
                _ => i += 1,
            }
        }
        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn push_trimmed(out: &mut Vec<String>, sentence: &str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        out.push(sentence.to_string());
    }
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// `e.g`, `i.e`, `u.s.a`, `ph.d`: short alphabetic pieces joined by periods.
fn is_dotted_abbreviation(word: &str) -> bool {
    word.contains('.')
        && word
            .split('.')
            .all(|piece| (1..=2).contains(&piece.len()) && piece.chars().all(char::is_alphabetic))
}

fn is_enumeration_marker(word: &str) -> bool {
    (!word.is_empty() && word.chars().all(|c| c.is_ascii_digit())) || ROMAN_MARKERS.contains(&word)
}
