use super::{encode, QREL_FILENAME, QREL_MIME};
use crate::model::{Document, Grade};

fn graded(id: &str, level: u8) -> Document {
    Document::new(id).with_grade(Grade::level(level).unwrap())
}

#[test]
fn test_encode_single_judged_document() {
    let docs = vec![graded("http://a", 2)];
    let payload = encode("q1", "ann", &docs);
    assert_eq!(payload, b"q1 ann http://a 2\n");
}

#[test]
fn test_encode_filters_ungraded() {
    let docs = vec![
        graded("http://a", 1),
        Document::new("http://b"),
        graded("http://c", 0),
    ];
    let payload = String::from_utf8(encode("q1", "ann", &docs)).unwrap();
    assert_eq!(payload, "q1 ann http://a 1\nq1 ann http://c 0\n");
}

#[test]
fn test_encode_preserves_result_order() {
    // Not re-sorted by grade or id.
    let docs = vec![graded("http://z", 0), graded("http://a", 2)];
    let payload = String::from_utf8(encode("q1", "ann", &docs)).unwrap();
    assert_eq!(payload, "q1 ann http://z 0\nq1 ann http://a 2\n");
}

#[test]
fn test_encode_empty_inputs_yield_empty_payload() {
    assert!(encode("q1", "ann", &[]).is_empty());

    let all_ungraded = vec![Document::new("http://a"), Document::new("http://b")];
    assert!(encode("q1", "ann", &all_ungraded).is_empty());
}

#[test]
fn test_encode_zero_grade_is_emitted() {
    // Grade 0 is a judgment ("not relevant"), not an absence of one.
    let docs = vec![graded("http://a", 0)];
    assert_eq!(encode("q1", "ann", &docs), b"q1 ann http://a 0\n");
}

#[test]
fn test_export_delivery_constants() {
    assert_eq!(QREL_FILENAME, "qrel.txt");
    assert_eq!(QREL_MIME, "text/plain");
}
