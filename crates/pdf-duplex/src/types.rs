use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuplexError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Rendering failed: {0}")]
    Render(String),
    #[error("Print dispatch failed: {0}")]
    Dispatch(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, DuplexError>;

/// Coarse classification of a failure, used when reporting per-document results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    RenderingFailure,
    DispatchFailure,
    Other,
}

impl DuplexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DuplexError::InvalidInput(_) => ErrorKind::InvalidInput,
            DuplexError::Render(_) => ErrorKind::RenderingFailure,
            DuplexError::Dispatch(_) => ErrorKind::DispatchFailure,
            _ => ErrorKind::Other,
        }
    }
}

/// Printing pass over the physical sheets of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pass {
    /// Odd physical sheets (1, 3, 5, ...)
    Front,
    /// Even physical sheets (2, 4, 6, ...)
    Back,
}

impl Pass {
    /// 0-based index of the first physical sheet belonging to this pass
    pub fn first_sheet_index(self) -> u32 {
        match self {
            Pass::Front => 0,
            Pass::Back => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pass::Front => "front",
            Pass::Back => "back",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pass {
    type Err = DuplexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(Pass::Front),
            "back" => Ok(Pass::Back),
            other => Err(DuplexError::InvalidInput(format!(
                "Unknown pass '{}', expected 'front' or 'back'",
                other
            ))),
        }
    }
}

/// One physical landscape sheet: up to two logical pages side by side.
///
/// Page numbers are 1-based. A sheet with both halves empty is the
/// synthetic blank sheet that keeps the paper stack aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImposedSheet {
    pub left: Option<u32>,
    pub right: Option<u32>,
}

impl ImposedSheet {
    pub fn pair(left: u32, right: Option<u32>) -> Self {
        Self {
            left: Some(left),
            right,
        }
    }

    pub fn blank() -> Self {
        Self {
            left: None,
            right: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Source pages on this sheet, left to right
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.left.into_iter().chain(self.right)
    }
}

/// Statistics about one pass over one document
#[derive(Debug, Clone, PartialEq)]
pub struct PassStatistics {
    pub pass: Pass,
    /// Total number of source pages
    pub source_pages: u32,
    /// Physical sheets the whole document occupies (both passes)
    pub physical_sheets: u32,
    /// Source pages printed in this pass
    pub selected_pages: Vec<u32>,
    /// Sheets sent to the printer in this pass, blank included
    pub output_sheets: u32,
    /// Synthetic blank sheets appended for stack alignment
    pub blank_sheets_added: u32,
}
