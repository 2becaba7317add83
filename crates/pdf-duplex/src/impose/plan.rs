//! Sheet imposition: which source pages land on which physical sheet
//!
//! Pages are laid out 2-up on landscape sheets in reading order:
//!
//! ```text
//! sheet:   1      2      3       4        5        6
//! pages:  1 2    3 4    5 6    7 8     9 10    11 12
//! pass:  front  back  front   back    front    back
//! ```
//!
//! The front pass prints the odd sheets, the back pass the even ones. When
//! the sheet count is odd the front pass ends up one sheet ahead, so the
//! back pass receives a trailing blank sheet to keep the paper stack
//! aligned for the next document in the batch.

use crate::constants::PAGES_PER_SHEET;
use crate::types::*;

/// Physical sheets needed to hold every page of a document
pub fn sheet_count(page_count: u32) -> u32 {
    page_count.div_ceil(PAGES_PER_SHEET)
}

/// Pages printed in the front pass (sheets 1, 3, 5, ...)
pub fn front_pages(page_count: u32) -> Vec<u32> {
    pages_for_pass(page_count, Pass::Front)
}

/// Pages printed in the back pass (sheets 2, 4, 6, ...)
pub fn back_pages(page_count: u32) -> Vec<u32> {
    pages_for_pass(page_count, Pass::Back)
}

/// Pages of every other sheet starting at the pass's first sheet, in order
pub fn pages_for_pass(page_count: u32, pass: Pass) -> Vec<u32> {
    let sheets = sheet_count(page_count);
    let mut pages = Vec::new();

    for sheet_idx in (pass.first_sheet_index()..sheets).step_by(2) {
        let first = sheet_idx * PAGES_PER_SHEET + 1;
        pages.push(first);
        if first < page_count {
            pages.push(first + 1);
        }
    }

    pages
}

/// Whether the back pass owes one blank sheet (odd total sheet count)
pub fn needs_trailing_blank(page_count: u32) -> bool {
    sheet_count(page_count) % 2 == 1
}

/// Sheets produced for a selection, blank sheet included
pub fn output_sheet_count(selection_len: usize, trailing_blank: bool) -> u32 {
    let real = selection_len.div_ceil(PAGES_PER_SHEET as usize) as u32;
    real + u32::from(trailing_blank)
}

/// Validate a raw page count coming from outside the engine
pub fn validate_page_count(raw: i64) -> Result<u32> {
    u32::try_from(raw).map_err(|_| {
        DuplexError::InvalidInput(format!(
            "Page count must be a non-negative integer that fits in 32 bits, got {}",
            raw
        ))
    })
}

/// What one pass prints for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassPlan {
    pub pass: Pass,
    pub page_count: u32,
    /// Selected source pages, 1-based, in original order
    pub pages: Vec<u32>,
    /// One blank sheet follows the real sheets
    pub trailing_blank: bool,
}

impl PassPlan {
    pub fn new(page_count: u32, pass: Pass) -> Self {
        // The front pass always holds the extra sheet, never the back-fill
        let trailing_blank = pass == Pass::Back && needs_trailing_blank(page_count);

        Self {
            pass,
            page_count,
            pages: pages_for_pass(page_count, pass),
            trailing_blank,
        }
    }

    pub fn physical_sheets(&self) -> u32 {
        sheet_count(self.page_count)
    }

    pub fn output_sheets(&self) -> u32 {
        output_sheet_count(self.pages.len(), self.trailing_blank)
    }

    /// No pages and no blank owed: the pass can be skipped for this document
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && !self.trailing_blank
    }

    /// No pages of its own, but a blank sheet is still owed to the stack
    pub fn is_blank_only(&self) -> bool {
        self.pages.is_empty() && self.trailing_blank
    }
}
