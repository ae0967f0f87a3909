//! Judgment export in TREC qrel format.
//!
//! One line per judged document, space-separated, newline-terminated:
//!
//! ```text
//! <query-id> <assessor-id> <doc-id> <grade>
//! ```
//!
//! Ungraded documents are filtered out; the remaining lines keep the result
//! list's current order. Encoding never fails: an empty or fully-ungraded
//! list yields an empty payload.

#[cfg(test)]
mod tests;

use crate::model::Document;

/// Filename the export is delivered under.
pub const QREL_FILENAME: &str = "qrel.txt";

/// MIME type of the export payload.
pub const QREL_MIME: &str = "text/plain";

/// Serializes judged documents into a qrel byte payload.
///
/// The encoder performs no I/O; delivery of the payload is the caller's
/// concern.
pub fn encode(query_id: &str, assessor_id: &str, documents: &[Document]) -> Vec<u8> {
    let mut out = String::new();
    for doc in documents.iter().filter(|d| d.grade.is_judged()) {
        out.push_str(query_id);
        out.push(' ');
        out.push_str(assessor_id);
        out.push(' ');
        out.push_str(&doc.id);
        out.push(' ');
        out.push_str(&doc.grade.to_string());
        out.push('\n');
    }
    out.into_bytes()
}
