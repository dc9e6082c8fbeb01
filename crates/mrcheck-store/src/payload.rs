//! Encoding helpers shared by the store writers

use crate::errors::Result;
use mrcheck_core::codec::{compress, is_compressed_key, DOCUMENT_SEPARATOR};

/// Join documents into one payload, compressing when `key` asks for it
///
/// Each document is terminated with a newline so the separator always starts
/// a line.
pub fn encode_documents<S: AsRef<str>>(key: &str, documents: &[S]) -> Result<Vec<u8>> {
    let text = documents
        .iter()
        .map(|doc| {
            let doc = doc.as_ref();
            if doc.ends_with('\n') {
                doc.to_string()
            } else {
                format!("{}\n", doc)
            }
        })
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR);

    if is_compressed_key(key) {
        compress(text.as_bytes())
    } else {
        Ok(text.into_bytes())
    }
}
