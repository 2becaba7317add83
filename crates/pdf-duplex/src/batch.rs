//! Batch printing of a directory, one document at a time
//!
//! Documents are processed in file-name order. Each document is loaded,
//! planned, rendered to a temporary PDF and dispatched before the next one
//! starts. A failing document is recorded and the batch moves on.

use crate::constants::PDF_EXTENSION;
use crate::impose::{PassPlan, impose, load_pdf, plan_pass, write_temp_pdf};
use crate::options::PrintOptions;
use crate::print::PrintDispatcher;
use crate::types::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What happened to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Nothing to print in this pass
    Skipped,
    /// Only the stack-alignment blank sheet was printed
    BlankOnly,
    Printed {
        pages: Vec<u32>,
        output_sheets: u32,
        trailing_blank: bool,
    },
}

#[derive(Debug)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub result: Result<DocumentOutcome>,
}

/// Results of a batch, in processing order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Documents that reached the printer (blank-only ones included)
    pub fn printed(&self) -> usize {
        self.documents
            .iter()
            .filter(|doc| {
                matches!(
                    doc.result,
                    Ok(DocumentOutcome::BlankOnly) | Ok(DocumentOutcome::Printed { .. })
                )
            })
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.documents
            .iter()
            .filter(|doc| matches!(doc.result, Ok(DocumentOutcome::Skipped)))
            .count()
    }

    pub fn failed(&self) -> Vec<&DocumentReport> {
        self.documents
            .iter()
            .filter(|doc| doc.result.is_err())
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.documents.iter().all(|doc| doc.result.is_ok())
    }
}

/// PDF files directly inside `dir`, sorted by file name.
///
/// Hidden files (such as macOS `._name.pdf` resource forks) are ignored.
pub fn discover_documents(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(DuplexError::InvalidInput(format!(
            "'{}' is not a valid directory",
            dir.display()
        )));
    }

    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION));
        if is_pdf && !is_hidden && path.is_file() {
            documents.push(path);
        }
    }

    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(documents)
}

/// Load a document and plan the pass without printing anything
pub async fn plan_document(path: impl AsRef<Path>, pass: Pass) -> Result<PassPlan> {
    let document = load_pdf(path).await?;
    plan_pass(&document, pass)
}

/// Impose and print one pass of one document
pub async fn print_document<D: PrintDispatcher>(
    path: impl AsRef<Path>,
    pass: Pass,
    options: &PrintOptions,
    dispatcher: &D,
) -> Result<DocumentOutcome> {
    let path = path.as_ref();
    let document = load_pdf(path).await?;
    let plan = plan_pass(&document, pass)?;
    log_plan(path, &plan);

    let Some(rendered) = impose(&document, &plan).await? else {
        log::info!("  Nothing to print for this side. Skipping.");
        return Ok(DocumentOutcome::Skipped);
    };

    // Deleted on drop, after dispatch succeeds or fails
    let artifact = write_temp_pdf(rendered).await?;
    let dispatched = dispatcher.dispatch(artifact.path(), &options.printer).await;
    tokio::time::sleep(Duration::from_millis(options.cleanup_delay_ms)).await;
    drop(artifact);
    dispatched?;

    if plan.is_blank_only() {
        Ok(DocumentOutcome::BlankOnly)
    } else {
        Ok(DocumentOutcome::Printed {
            output_sheets: plan.output_sheets(),
            trailing_blank: plan.trailing_blank,
            pages: plan.pages,
        })
    }
}

/// Print one pass of every PDF in `dir`, in file-name order
pub async fn run_batch<D: PrintDispatcher>(
    dir: impl AsRef<Path>,
    pass: Pass,
    options: &PrintOptions,
    dispatcher: &D,
) -> Result<BatchReport> {
    let paths = discover_documents(dir)?;
    run_documents(&paths, pass, options, dispatcher).await
}

/// Print one pass of an already discovered list of documents, in order
pub async fn run_documents<D: PrintDispatcher>(
    paths: &[PathBuf],
    pass: Pass,
    options: &PrintOptions,
    dispatcher: &D,
) -> Result<BatchReport> {
    options.validate()?;

    let mut report = BatchReport::default();
    for path in paths {
        let result = print_document(path, pass, options, dispatcher).await;
        if let Err(e) = &result {
            log::error!("{}: {:?} - {}", display_name(path), e.kind(), e);
        }
        report.documents.push(DocumentReport {
            path: path.clone(),
            result,
        });
    }

    Ok(report)
}

fn log_plan(path: &Path, plan: &PassPlan) {
    log::info!("File  : {}", display_name(path));
    log::info!("Side  : {}", plan.pass);
    log::info!(
        "Pages : {}  |  Physical sheets: {}",
        plan.page_count,
        plan.physical_sheets()
    );

    if plan.is_blank_only() {
        log::info!("  No {} pages - printing blank sheet to keep stack aligned.", plan.pass);
    } else if !plan.is_empty() {
        log::info!("PDF pages selected : {:?}", plan.pages);
        log::info!(
            "Output sheets      : {}{}",
            plan.output_sheets(),
            if plan.trailing_blank {
                " (includes 1 blank)"
            } else {
                ""
            }
        );
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
