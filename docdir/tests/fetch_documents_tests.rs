#![allow(clippy::unwrap_used, clippy::use_debug)]
//! Integration tests for `DocumentDirectoryService`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use docdir::{
    DirectoryConfig, DirectoryError, DocumentDirectoryService, DocumentType, VersionOrdering,
};
use tempfile::TempDir;

const UPPER: &str = "clients";
const LOWER: &str = "1234";

fn sandbox() -> (TempDir, DocumentDirectoryService, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let collection = tmp.path().join(UPPER).join(LOWER);
    fs::create_dir_all(&collection).unwrap();
    let service = DocumentDirectoryService::new(DirectoryConfig::new(tmp.path()));
    (tmp, service, collection)
}

fn write(dir: &Path, suffix: &str) {
    fs::write(dir.join(format!("testFile.{suffix}")), format!("body of {suffix}")).unwrap();
}

#[test]
fn test_exists_for_created_collection() {
    let (_tmp, service, _) = sandbox();
    assert!(service.exists(UPPER, Some(LOWER)));
}

#[test]
fn test_exists_false_for_missing_collection() {
    let (_tmp, service, _) = sandbox();
    assert!(!service.exists("fakeDirectory", Some(LOWER)));
    assert!(!service.exists(UPPER, Some("9999")));
}

#[test]
fn test_exists_false_without_lower_directory() {
    let (_tmp, service, _) = sandbox();
    // The upper directory exists, but an absent lower segment is never resolved to it.
    assert!(!service.exists(UPPER, None));
}

#[test]
fn test_exists_false_for_traversal() {
    let (_tmp, service, _) = sandbox();
    assert!(!service.exists("..", Some(UPPER)));
    assert!(!service.exists(UPPER, Some("../clients")));
}

#[tokio::test]
async fn test_single_accepted_file_of_each_type() {
    for suffix in ["pdf", "html", "xls"] {
        let (_tmp, service, dir) = sandbox();
        write(&dir, suffix);

        let docs = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();
        assert_eq!(docs.len(), 1, "suffix {suffix}");
        assert_eq!(docs[0].doc_type, DocumentType::from_extension(suffix));
        assert_eq!(docs[0].logical_name, "testFile");
        let expected = fs::read_to_string(dir.join(format!("testFile.{suffix}"))).unwrap();
        assert_eq!(docs[0].content.as_deref(), Some(expected.as_str()));
    }
}

#[tokio::test]
async fn test_unaccepted_type_is_ignored() {
    let (_tmp, service, dir) = sandbox();
    write(&dir, "fake");

    let docs = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn test_accepted_files_of_different_types() {
    let (_tmp, service, dir) = sandbox();
    write(&dir, "pdf");
    write(&dir, "html");

    let docs = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();
    assert_eq!(docs.len(), 2);
    // Types come back in html, pdf, xls order.
    assert_eq!(docs[0].doc_type, DocumentType::Html);
    assert_eq!(docs[1].doc_type, DocumentType::Pdf);
    assert!(docs.iter().all(|d| d.content.is_some()));
}

#[tokio::test]
async fn test_only_latest_version_returned() {
    let (_tmp, service, dir) = sandbox();
    write(&dir, "112.html");
    write(&dir, "115.html");

    let docs = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert!(docs[0].file_stem.ends_with("115"));
    assert_eq!(docs[0].logical_name, "testFile");
    assert_eq!(docs[0].path, dir.join("testFile.115.html"));
    assert_eq!(docs[0].content.as_deref(), Some("body of 115.html"));
}

#[tokio::test]
async fn test_same_family_across_types_is_kept_per_type() {
    let (_tmp, service, dir) = sandbox();
    write(&dir, "1.html");
    write(&dir, "2.html");
    write(&dir, "1.pdf");
    write(&dir, "3.xls");

    let docs = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();
    let summary: Vec<_> = docs
        .iter()
        .map(|d| (d.doc_type, d.file_stem.as_str()))
        .collect();
    assert_eq!(
        summary,
        [
            (DocumentType::Html, "testFile.2"),
            (DocumentType::Pdf, "testFile.1"),
            (DocumentType::Xls, "testFile.3"),
        ]
    );
}

#[tokio::test]
async fn test_subdirectories_are_not_scanned() {
    let (_tmp, service, dir) = sandbox();
    let nested = dir.join("archive");
    fs::create_dir(&nested).unwrap();
    write(&nested, "html");

    assert!(service.fetch_documents(UPPER, Some(LOWER)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_collection_yields_empty() {
    let (_tmp, service, _) = sandbox();
    let docs = service.fetch_documents("nobody", Some(LOWER)).await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn test_missing_lower_directory_is_an_error() {
    let (_tmp, service, dir) = sandbox();
    write(&dir, "html");

    let err = service.fetch_documents(UPPER, None).await.unwrap_err();
    assert!(matches!(err, DirectoryError::MissingLowerDirectory));
}

#[tokio::test]
async fn test_fetch_is_idempotent() {
    let (_tmp, service, dir) = sandbox();
    for suffix in ["a.1.html", "a.2.html", "b.pdf", "c.9.xls", "c.10.xls"] {
        fs::write(dir.join(suffix), suffix).unwrap();
    }

    let first = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();
    let second = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();

    let as_set = |docs: &[docdir::DocumentRecord]| -> BTreeSet<(String, String)> {
        docs.iter()
            .map(|d| (d.file_stem.clone(), d.content.clone().unwrap()))
            .collect()
    };
    assert_eq!(as_set(&first), as_set(&second));
    assert_eq!(first.len(), 3);
    // String ordering: "9" > "10".
    assert!(first.iter().any(|d| d.file_stem == "c.9"));
}

#[tokio::test]
async fn test_numeric_version_ordering_policy() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(UPPER).join(LOWER);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("c.9.xls"), "nine").unwrap();
    fs::write(dir.join("c.10.xls"), "ten").unwrap();

    let mut config = DirectoryConfig::new(tmp.path());
    config.version_ordering = VersionOrdering::NumericThenLexicographic;
    let service = DocumentDirectoryService::new(config);

    let docs = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content.as_deref(), Some("ten"));
}

#[tokio::test]
async fn test_many_files_load_with_small_pool() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(UPPER).join(LOWER);
    fs::create_dir_all(&dir).unwrap();
    for i in 0..40 {
        fs::write(dir.join(format!("doc{i:02}.html")), format!("{i}")).unwrap();
    }

    let mut config = DirectoryConfig::new(tmp.path());
    config.max_concurrent_reads = 3;
    let service = DocumentDirectoryService::new(config);

    let docs = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap();
    assert_eq!(docs.len(), 40);
    for (i, doc) in docs.iter().enumerate() {
        assert_eq!(doc.logical_name, format!("doc{i:02}"));
        assert_eq!(doc.content.as_deref(), Some(i.to_string().as_str()));
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_document_fails_request() {
    use std::os::unix::fs::PermissionsExt;

    let (_tmp, service, dir) = sandbox();
    write(&dir, "html");
    let locked = dir.join("testFile.html");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores file modes; only assert when the read is actually denied.
    if fs::read(&locked).is_err() {
        let err = service.fetch_documents(UPPER, Some(LOWER)).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Io { .. }), "got {err:?}");
    }
}
