use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which print backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BackendPreference {
    /// SumatraPDF when it can be found, the system spooler otherwise
    #[default]
    Auto,
    /// Require SumatraPDF
    Sumatra,
    /// Always use the system spooler
    System,
}

/// Printing configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrintOptions {
    // Target
    pub printer: String,
    pub backend: BackendPreference,

    // SumatraPDF backend
    pub sumatra_paths: Vec<PathBuf>,
    pub print_settings: String,

    // Timing (milliseconds)
    pub sumatra_settle_ms: u64,
    pub system_settle_ms: u64,
    pub cleanup_delay_ms: u64,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            printer: DEFAULT_PRINTER.to_string(),
            backend: BackendPreference::Auto,
            sumatra_paths: default_sumatra_paths(),
            print_settings: DEFAULT_PRINT_SETTINGS.to_string(),
            sumatra_settle_ms: SUMATRA_SETTLE_MS,
            system_settle_ms: SYSTEM_SETTLE_MS,
            cleanup_delay_ms: CLEANUP_DELAY_MS,
        }
    }
}

/// Usual SumatraPDF install locations on Windows
fn default_sumatra_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(r"C:\Program Files\SumatraPDF\SumatraPDF.exe"),
        PathBuf::from(r"C:\Program Files (x86)\SumatraPDF\SumatraPDF.exe"),
    ];
    if let Some(local) = std::env::var_os("LOCALAPPDATA") {
        paths.push(
            PathBuf::from(local)
                .join("SumatraPDF")
                .join("SumatraPDF.exe"),
        );
    }
    paths
}

impl PrintOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| DuplexError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DuplexError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.printer.trim().is_empty() {
            return Err(DuplexError::Config("Printer name must not be empty".to_string()));
        }

        if self.print_settings.trim().is_empty() {
            return Err(DuplexError::Config(
                "Print settings must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
