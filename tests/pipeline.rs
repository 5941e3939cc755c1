//! End-to-end pipeline tests: dispatch, archive handling, persistence, and
//! reprocess semantics.

use std::io::{Cursor, Write};

use doclens::extract::{self, ExtractError, SourceFile};
use doclens::llm::parse_analysis;
use doclens::models::{AnalyzedDocument, Classification, DocumentAnalysis, Sentiment};
use doclens::report;
use doclens::repository::DocumentStore;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn archive_upload_is_dispatched_and_labeled() {
    let data = build_zip(&[
        ("first.txt", b"the quick brown fox".as_slice()),
        ("broken.pdf", b"not really a pdf".as_slice()),
    ]);
    let source = SourceFile::new("bundle.zip".to_string(), None, data);

    let result = extract::extract(&source).unwrap();
    assert!(result.text.contains("--- first.txt ---\nthe quick brown fox"));
    assert!(result
        .text
        .contains("--- broken.pdf ---\n[Error processing file]"));
    assert_eq!(result.page_count, None);
}

#[test]
fn archive_with_nothing_usable_fails() {
    let data = build_zip(&[("holiday.jpg", b"\xFF\xD8\xFF".as_slice())]);
    let source = SourceFile::new("photos.zip".to_string(), None, data);
    assert!(matches!(
        extract::extract(&source),
        Err(ExtractError::NoSupportedEntries)
    ));
}

#[test]
fn declared_type_overrides_extension() {
    let source = SourceFile::new(
        "mislabeled.pdf".to_string(),
        Some("text/plain".to_string()),
        b"just text after all".to_vec(),
    );
    let result = extract::extract(&source).unwrap();
    assert_eq!(result.text, "just text after all");
    assert_eq!(result.page_count, None);
}

#[tokio::test]
async fn upload_reprocess_round_trip_preserves_identity() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::open(dir.path().join("documents.json")).unwrap();

    // Upload: extraction output plus a parsed analysis reply.
    let analysis = parse_analysis(
        r#"{
            "classification": "Legal Agreement",
            "summary": "A contract between two parties.",
            "tags": ["contract", "legal", "agreement"],
            "sentiment": "neutral"
        }"#,
    );
    let document = AnalyzedDocument::new(
        "contract.txt".to_string(),
        AnalyzedDocument::compute_hash(b"contract body"),
        "contract body".to_string(),
        None,
        analysis,
    );
    store.upsert(document.clone()).await.unwrap();

    // Reprocess with a different (fallback) reply.
    let mut reprocessed = store.get(&document.id).await.unwrap();
    reprocessed.apply_analysis(DocumentAnalysis::fallback());
    store.upsert(reprocessed).await.unwrap();

    let stored = store.get(&document.id).await.unwrap();
    assert_eq!(stored.id, document.id);
    assert_eq!(stored.full_text, "contract body");
    assert_eq!(stored.classification, Classification::Others);
    assert!(stored.created_at >= document.created_at);
    assert_eq!(store.list().await.len(), 1);
}

#[tokio::test]
async fn malformed_reply_falls_back_and_still_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::open(dir.path().join("documents.json")).unwrap();

    let analysis = parse_analysis("I'd rather write prose than JSON.");
    assert_eq!(analysis, DocumentAnalysis::fallback());
    assert_eq!(analysis.sentiment, Sentiment::Neutral);

    let document = AnalyzedDocument::new(
        "odd.txt".to_string(),
        String::new(),
        "some extracted text".to_string(),
        None,
        analysis,
    );
    store.upsert(document.clone()).await.unwrap();
    assert_eq!(
        store.get(&document.id).await.unwrap().classification,
        Classification::Others
    );
}

#[test]
fn report_renders_from_stored_record() {
    let document = AnalyzedDocument::new(
        "minutes.txt".to_string(),
        String::new(),
        "meeting minutes follow".to_string(),
        None,
        DocumentAnalysis::fallback(),
    );
    let rendered = report::render(&document);
    assert!(rendered.contains("minutes.txt"));
    assert!(rendered.contains("meeting minutes follow"));
    assert!(report::default_filename(&document).starts_with("minutes-txt-analysis-"));
}
