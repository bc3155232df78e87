/// Separator between sentences of one document.
pub const SENTENCE_SEPARATOR: &str = "\n";
/// Separator between documents (a blank line).
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// One sentence per line.
pub fn join_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    join(sentences, SENTENCE_SEPARATOR)
}

/// Documents separated by a blank line.
pub fn join_documents<S: AsRef<str>>(documents: &[S]) -> String {
    join(documents, DOCUMENT_SEPARATOR)
}

fn join<S: AsRef<str>>(parts: &[S], sep: &str) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(sep)
}
