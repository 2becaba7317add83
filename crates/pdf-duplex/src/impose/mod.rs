//! Pass imposition - splitting a document into front and back print runs
//!
//! This module orchestrates the imposition of one document:
//! 1. Plan the pass (pure page selection and blank-sheet rule)
//! 2. Group the selection into 2-up sheets
//! 3. Render the sheets into a landscape PDF

mod compose;
mod io;
mod plan;

pub use compose::compose_sheets;
pub use io::{load_pdf, save_pdf, write_temp_pdf};
pub use plan::{
    PassPlan, back_pages, front_pages, needs_trailing_blank, output_sheet_count, pages_for_pass,
    sheet_count, validate_page_count,
};

use crate::render::render_sheets;
use crate::types::*;
use lopdf::Document;

/// Plan a pass for a loaded document
pub fn plan_pass(document: &Document, pass: Pass) -> Result<PassPlan> {
    let page_count = document.get_pages().len();
    let page_count = validate_page_count(page_count as i64)?;
    Ok(PassPlan::new(page_count, pass))
}

/// Render the sheets of a planned pass.
///
/// Returns `None` when the plan has nothing to print; a blank-only plan
/// still renders its single blank sheet.
pub async fn impose(document: &Document, plan: &PassPlan) -> Result<Option<Document>> {
    if plan.is_empty() {
        return Ok(None);
    }

    let document = document.clone();
    let sheets = compose_sheets(plan);

    tokio::task::spawn_blocking(move || render_sheets(&document, &sheets).map(Some)).await?
}
