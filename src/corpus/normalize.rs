use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalize a raw document before segmentation.
///
/// 1. every run of (Unicode) whitespace becomes one space
/// 2. non-ASCII code points are dropped
/// 3. the result is lowercased
///
/// Dropping a code point can leave two spaces side by side (`"a é b"`); such
/// runs are collapsed again, which keeps the function idempotent.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let ascii: String = collapsed.chars().filter(char::is_ascii).collect();
    let mut out = if ascii.len() == collapsed.len() {
        ascii
    } else {
        WHITESPACE.replace_all(&ascii, " ").into_owned()
    };
    out.make_ascii_lowercase();
    out
}
