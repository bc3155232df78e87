//! Assertion functions for pipeline outputs.

use std::fmt::Debug;
use std::fs;
use std::path::Path;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// ```
/// use ironcorpus::testing::assert_collections_equal;
///
/// assert_collections_equal(&["a", "b"], &["a", "b"]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that `sub` is an order-preserving subsequence of `full`.
///
/// # Panics
///
/// Panics naming the first element of `sub` that cannot be matched in order.
///
/// ```
/// use ironcorpus::testing::assert_subsequence;
///
/// assert_subsequence(&[1, 3], &[1, 2, 3]);
/// ```
pub fn assert_subsequence<T: Debug + PartialEq>(sub: &[T], full: &[T]) {
    let mut rest = full.iter();
    for (i, item) in sub.iter().enumerate() {
        assert!(
            rest.any(|f| f == item),
            "Element {i} ({item:?}) is missing or out of order:\n  Subsequence: {sub:?}\n  Sequence: {full:?}"
        );
    }
}

/// Assert that every element satisfies `predicate`.
///
/// # Panics
///
/// Panics on the first element that fails.
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}

/// Assert that the file at `path` consists of exactly `expected` lines.
///
/// # Panics
///
/// Panics if the file cannot be read or its lines differ.
pub fn assert_file_lines<S: AsRef<str> + Debug>(path: impl AsRef<Path>, expected: &[S]) {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    let actual: Vec<&str> = contents.lines().collect();
    let expected: Vec<&str> = expected.iter().map(AsRef::as_ref).collect();
    assert_collections_equal(&actual, &expected);
}
