//! PDF rendering for imposed sheets
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source pages
//! - Building landscape 2-up output pages
//! - Deep copying PDF objects

mod sheet;
mod xobject;

pub use sheet::render_sheets;
pub use xobject::{PageBox, copy_object_deep, create_page_xobject, get_page_box};
