mod common;

use common::write_test_pdf;
use pdf_duplex::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

struct Job {
    artifact: PathBuf,
    printer: String,
    sheets: usize,
}

/// Dispatcher that inspects artifacts instead of printing them
#[derive(Default)]
struct RecordingDispatcher {
    jobs: Mutex<Vec<Job>>,
    fail: bool,
}

impl RecordingDispatcher {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn sheets(&self) -> Vec<usize> {
        self.jobs.lock().unwrap().iter().map(|job| job.sheets).collect()
    }
}

impl PrintDispatcher for RecordingDispatcher {
    async fn dispatch(&self, artifact: &Path, printer: &str) -> Result<()> {
        let doc = lopdf::Document::load(artifact).unwrap();
        self.jobs.lock().unwrap().push(Job {
            artifact: artifact.to_owned(),
            printer: printer.to_string(),
            sheets: doc.get_pages().len(),
        });

        if self.fail {
            Err(DuplexError::Dispatch("printer offline".to_string()))
        } else {
            Ok(())
        }
    }
}

fn test_options() -> PrintOptions {
    PrintOptions {
        printer: "Test Printer".to_string(),
        cleanup_delay_ms: 0,
        ..Default::default()
    }
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_discover_documents_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write_test_pdf(&dir.path().join("b.pdf"), 1);
    write_test_pdf(&dir.path().join("a.pdf"), 1);
    write_test_pdf(&dir.path().join("c.PDF"), 1);
    std::fs::write(dir.path().join("notes.txt"), b"not a pdf").unwrap();
    std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

    let documents = discover_documents(dir.path()).unwrap();
    assert_eq!(names(&documents), vec!["a.pdf", "b.pdf", "c.PDF"]);
}

#[test]
fn test_discover_documents_skips_hidden_files() {
    let dir = tempfile::tempdir().unwrap();
    write_test_pdf(&dir.path().join("report.pdf"), 1);
    std::fs::write(dir.path().join("._report.pdf"), b"resource fork").unwrap();
    write_test_pdf(&dir.path().join(".hidden.pdf"), 1);

    let documents = discover_documents(dir.path()).unwrap();
    assert_eq!(names(&documents), vec!["report.pdf"]);
}

#[test]
fn test_discover_documents_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.pdf");
    write_test_pdf(&file, 1);

    let err = discover_documents(&file).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_print_document_front() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write_test_pdf(&path, 5);

    let dispatcher = RecordingDispatcher::default();
    let outcome = print_document(&path, Pass::Front, &test_options(), &dispatcher)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DocumentOutcome::Printed {
            pages: vec![1, 2, 5],
            output_sheets: 2,
            trailing_blank: false,
        }
    );

    let jobs = dispatcher.jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].printer, "Test Printer");
    assert_eq!(jobs[0].sheets, 2);
    // Temporary artifact is gone once the document is done
    assert!(!jobs[0].artifact.exists());
}

#[tokio::test]
async fn test_print_document_back_blank_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.pdf");
    write_test_pdf(&path, 1);

    let dispatcher = RecordingDispatcher::default();
    let outcome = print_document(&path, Pass::Back, &test_options(), &dispatcher)
        .await
        .unwrap();

    assert_eq!(outcome, DocumentOutcome::BlankOnly);
    assert_eq!(dispatcher.sheets(), vec![1]);
}

#[tokio::test]
async fn test_print_document_empty_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.pdf");
    write_test_pdf(&path, 0);

    let dispatcher = RecordingDispatcher::default();
    let outcome = print_document(&path, Pass::Back, &test_options(), &dispatcher)
        .await
        .unwrap();

    assert_eq!(outcome, DocumentOutcome::Skipped);
    assert!(dispatcher.sheets().is_empty());
}

#[tokio::test]
async fn test_dispatch_failure_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write_test_pdf(&path, 4);

    let dispatcher = RecordingDispatcher::failing();
    let err = print_document(&path, Pass::Back, &test_options(), &dispatcher)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DispatchFailure);
    let jobs = dispatcher.jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert!(!jobs[0].artifact.exists());
}

#[tokio::test]
async fn test_run_batch_back_pass() {
    let dir = tempfile::tempdir().unwrap();
    write_test_pdf(&dir.path().join("01-single.pdf"), 1);
    write_test_pdf(&dir.path().join("02-five.pdf"), 5);
    std::fs::write(dir.path().join("03-broken.pdf"), b"garbage").unwrap();
    write_test_pdf(&dir.path().join("04-empty.pdf"), 0);
    write_test_pdf(&dir.path().join("05-twelve.pdf"), 12);

    let dispatcher = RecordingDispatcher::default();
    let report = run_batch(dir.path(), Pass::Back, &test_options(), &dispatcher)
        .await
        .unwrap();

    assert_eq!(report.documents.len(), 5);
    assert_eq!(report.printed(), 3);
    assert_eq!(report.skipped(), 1);
    assert!(!report.is_success());

    let failed = report.failed();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].path.ends_with("03-broken.pdf"));
    assert_eq!(
        failed[0].result.as_ref().unwrap_err().kind(),
        ErrorKind::InvalidInput
    );

    // Blank only, 1 real + blank, nothing from the broken or empty file, 3 real
    assert_eq!(dispatcher.sheets(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_run_batch_front_and_back_align() {
    let dir = tempfile::tempdir().unwrap();
    for (name, pages) in [("a.pdf", 1), ("b.pdf", 3), ("c.pdf", 5), ("d.pdf", 8)] {
        write_test_pdf(&dir.path().join(name), pages);
    }

    let front = RecordingDispatcher::default();
    let back = RecordingDispatcher::default();
    run_batch(dir.path(), Pass::Front, &test_options(), &front)
        .await
        .unwrap();
    run_batch(dir.path(), Pass::Back, &test_options(), &back)
        .await
        .unwrap();

    assert_eq!(front.sheets(), back.sheets());
}

#[tokio::test]
async fn test_run_batch_continues_after_dispatch_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_test_pdf(&dir.path().join("a.pdf"), 2);
    write_test_pdf(&dir.path().join("b.pdf"), 2);

    let dispatcher = RecordingDispatcher::failing();
    let report = run_batch(dir.path(), Pass::Front, &test_options(), &dispatcher)
        .await
        .unwrap();

    assert_eq!(report.failed().len(), 2);
    assert_eq!(dispatcher.sheets(), vec![1, 1]);
}

#[tokio::test]
async fn test_run_documents_prints_given_list() {
    let dir = tempfile::tempdir().unwrap();
    write_test_pdf(&dir.path().join("a.pdf"), 3);
    write_test_pdf(&dir.path().join("b.pdf"), 8);

    let documents = discover_documents(dir.path()).unwrap();
    // Files added after discovery are not part of this run
    write_test_pdf(&dir.path().join("c.pdf"), 2);

    let dispatcher = RecordingDispatcher::default();
    let report = run_documents(&documents, Pass::Front, &test_options(), &dispatcher)
        .await
        .unwrap();

    assert_eq!(report.documents.len(), documents.len());
    assert_eq!(
        report.documents.iter().map(|d| &d.path).collect::<Vec<_>>(),
        documents.iter().collect::<Vec<_>>()
    );
    assert_eq!(dispatcher.sheets(), vec![1, 2]);
}

#[tokio::test]
async fn test_run_batch_rejects_invalid_options() {
    let dir = tempfile::tempdir().unwrap();
    let options = PrintOptions {
        printer: String::new(),
        ..test_options()
    };

    let dispatcher = RecordingDispatcher::default();
    let result = run_batch(dir.path(), Pass::Front, &options, &dispatcher).await;
    assert!(matches!(result, Err(DuplexError::Config(_))));
}

#[tokio::test]
async fn test_plan_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write_test_pdf(&path, 12);

    let plan = plan_document(&path, Pass::Back).await.unwrap();
    assert_eq!(plan.pages, vec![3, 4, 7, 8, 11, 12]);
    assert!(!plan.trailing_blank);
}
