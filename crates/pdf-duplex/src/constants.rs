//! Shared constants for pass imposition and printing

// =============================================================================
// Imposition
// =============================================================================

/// Logical pages per physical sheet (fixed 2-up)
pub const PAGES_PER_SHEET: u32 = 2;

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Printing
// =============================================================================

/// Printer used when neither the config nor the command line names one
pub const DEFAULT_PRINTER: &str = "EPSON L130 Series";

/// SumatraPDF `-print-settings` value: black & white, scaled to the paper
pub const DEFAULT_PRINT_SETTINGS: &str = "monochrome,fit";

/// Executable name searched on `PATH` for the SumatraPDF backend
pub const SUMATRA_EXECUTABLE: &str = "SumatraPDF";

/// Wait after SumatraPDF hands a job to the spooler (milliseconds)
pub const SUMATRA_SETTLE_MS: u64 = 2000;

/// Wait after the system spooler accepts a job (milliseconds)
pub const SYSTEM_SETTLE_MS: u64 = 5000;

/// Wait before the temporary artifact is deleted (milliseconds)
pub const CLEANUP_DELAY_MS: u64 = 1000;

/// File extension of documents picked up by the batch driver
pub const PDF_EXTENSION: &str = "pdf";
