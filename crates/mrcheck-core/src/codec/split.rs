/// Literal separator between documents in one payload
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Split multi-document text on the literal separator
///
/// Empty fragments, including a leading or trailing one, are dropped.
/// Whitespace-only fragments are kept and rejected later by the decoder.
pub fn split_documents(text: &str) -> impl Iterator<Item = &str> {
    text.split(DOCUMENT_SEPARATOR).filter(|doc| !doc.is_empty())
}
