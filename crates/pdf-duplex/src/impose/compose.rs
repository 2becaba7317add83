//! Grouping a pass's page selection into physical sheets

use super::plan::PassPlan;
use crate::types::ImposedSheet;

/// Pair the selected pages two at a time, then append the blank sheet if owed
pub fn compose_sheets(plan: &PassPlan) -> Vec<ImposedSheet> {
    let mut sheets: Vec<ImposedSheet> = plan
        .pages
        .chunks(2)
        .map(|pair| ImposedSheet::pair(pair[0], pair.get(1).copied()))
        .collect();

    if plan.trailing_blank {
        sheets.push(ImposedSheet::blank());
    }

    sheets
}
