use crate::impose::{PassPlan, plan_pass};
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for one pass over a document
pub fn calculate_statistics(document: &Document, pass: Pass) -> Result<PassStatistics> {
    let plan = plan_pass(document, pass)?;
    Ok(statistics_for_plan(&plan))
}

/// Statistics for an already computed plan
pub fn statistics_for_plan(plan: &PassPlan) -> PassStatistics {
    PassStatistics {
        pass: plan.pass,
        source_pages: plan.page_count,
        physical_sheets: plan.physical_sheets(),
        selected_pages: plan.pages.clone(),
        output_sheets: plan.output_sheets(),
        blank_sheets_added: u32::from(plan.trailing_blank),
    }
}
