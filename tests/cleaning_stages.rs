//! Property-style tests for the individual cleaning stages.

use ironcorpus::corpus::filter::{FilterConfig, SPECIAL_CHARS, Verdict};
use ironcorpus::corpus::{
    SentenceFilter, SentenceSegmenter, RuleSegmenter, join_documents, join_sentences, normalize,
};
use ironcorpus::testing::*;

const NORMALIZE_SAMPLES: &[&str] = &[
    "",
    " ",
    "Plain ASCII text.",
    "  Leading and trailing  ",
    "Tabs\tand\nnewlines\r\nmixed",
    "Ünïcödé wörds äre strïpped",
    "a \u{e9} b \u{2003} c",
    "\u{feff}BOM and \u{a0}nbsp",
    "日本語 only",
    "MiXeD CaSe 123 !?",
];

#[test]
fn test_normalize_is_idempotent() {
    for sample in NORMALIZE_SAMPLES {
        let once = normalize(sample);
        let twice = normalize(&once);
        assert_eq!(once, twice, "not idempotent for {sample:?}");
    }
}

#[test]
fn test_normalize_output_shape() {
    for sample in NORMALIZE_SAMPLES {
        let out = normalize(sample);
        assert!(out.is_ascii(), "{out:?}");
        assert!(!out.chars().any(|c| c.is_ascii_uppercase()), "{out:?}");
        assert!(!out.contains("  "), "{out:?}");
        assert!(!out.contains(['\t', '\n', '\r']), "{out:?}");
    }
}

#[test]
fn test_filter_preserves_order() {
    let (input, expected) = filter_cases();
    let kept = SentenceFilter::default().filter(&input);
    assert_collections_equal(&kept, &expected);
}

#[test]
fn test_filter_outputs_are_substrings_of_inputs() {
    let (input, _) = filter_cases();
    let filter = SentenceFilter::default();
    for sentence in &input {
        if let Verdict::Keep(kept) = filter.judge(sentence) {
            assert!(sentence.ends_with(kept), "{kept:?} is not a suffix of {sentence:?}");
        }
    }
}

#[test]
fn test_filter_named_examples() {
    let filter = SentenceFilter::default();
    assert_eq!(filter.judge("7 hello there world"), Verdict::Keep("hello there world"));
    assert_eq!(filter.judge("ok fine"), Verdict::TooShort);
    let dots = format!("this has {} many dots", ".".repeat(20));
    assert_eq!(filter.judge(&dots), Verdict::Noisy);
}

#[test]
fn test_every_special_char_counts_toward_noise() {
    let filter = SentenceFilter::new(FilterConfig {
        special_char_limit: 3,
        min_tokens: 1,
    });
    for &c in SPECIAL_CHARS {
        let sentence = format!("word {c}{c}{c} word");
        assert_eq!(filter.judge(&sentence), Verdict::Noisy, "{c:?}");
    }
}

#[test]
fn test_kept_sentences_meet_thresholds() {
    let config = FilterConfig::default();
    let filter = SentenceFilter::new(config);
    let segmenter = RuleSegmenter::new();
    let text = normalize(
        "1. Intro to the topic. Ok. - a dash led line here. \
         ***************** stars ***************** everywhere. \
         Mr. Brown said hi to everyone in the room!",
    );

    let kept = filter.filter(&segmenter.segment(&text));
    assert!(!kept.is_empty());
    assert_all(&kept, |s| s.split_whitespace().count() >= config.min_tokens);
    assert_all(&kept, |s| {
        SPECIAL_CHARS
            .iter()
            .all(|&c| s.matches(c).count() < config.special_char_limit)
    });
    assert!(kept.contains(&"mr. brown said hi to everyone in the room!".to_string()));
}

#[test]
fn test_joiner_shape() {
    let docs = [join_sentences(&["s1", "s2"]), join_sentences(&["s3"])];
    assert_eq!(join_documents(&docs), "s1\ns2\n\ns3");
}

#[test]
fn test_filter_keeps_a_subsequence_of_segments() {
    let segmenter = RuleSegmenter::new();
    let text = normalize(
        "The first sentence is fine. Ok. Mr. Smith went home early. \
         ............................ noise here. \
         Another good one here! Last sentence stays put.",
    );

    let segmented = segmenter.segment(&text);
    let kept = SentenceFilter::default().filter(&segmented);

    assert!(kept.len() < segmented.len());
    assert_subsequence(&kept, &segmented);
    assert!(kept.contains(&"mr. smith went home early.".to_string()));
}
