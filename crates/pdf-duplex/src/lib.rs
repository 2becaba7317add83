pub mod batch;
pub mod constants;
pub mod impose;
mod options;
pub mod print;
pub mod render;
mod stats;
mod types;

pub use batch::{
    BatchReport, DocumentOutcome, DocumentReport, discover_documents, plan_document,
    print_document, run_batch, run_documents,
};
pub use impose::{
    PassPlan, back_pages, compose_sheets, front_pages, impose, load_pdf, needs_trailing_blank,
    output_sheet_count, pages_for_pass, plan_pass, save_pdf, sheet_count, validate_page_count,
    write_temp_pdf,
};
pub use options::*;
pub use print::{PrintBackend, PrintDispatcher, list_printers};
pub use render::render_sheets;
pub use stats::{calculate_statistics, statistics_for_plan};
pub use types::*;
