//! SumatraPDF backend

use crate::constants::SUMATRA_EXECUTABLE;
use crate::options::PrintOptions;
use crate::types::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SumatraBackend {
    executable: PathBuf,
    print_settings: String,
    settle: Duration,
}

impl SumatraBackend {
    pub fn new(executable: PathBuf, options: &PrintOptions) -> Self {
        Self {
            executable,
            print_settings: options.print_settings.clone(),
            settle: Duration::from_millis(options.sumatra_settle_ms),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Silent print through `-print-to`.
    ///
    /// SumatraPDF exits with 0 or 1 when the job reached the spooler; any
    /// other status is a dispatch failure.
    pub async fn print(&self, artifact: &Path, printer: &str) -> Result<()> {
        log::info!(
            "[SumatraPDF] {} -print-to \"{}\" -print-settings {} {}",
            self.executable.display(),
            printer,
            self.print_settings,
            artifact.display()
        );

        let output = tokio::process::Command::new(&self.executable)
            .arg("-print-to")
            .arg(printer)
            .arg("-print-settings")
            .arg(&self.print_settings)
            .arg(artifact)
            .output()
            .await
            .map_err(|e| {
                DuplexError::Dispatch(format!(
                    "failed to execute {}: {}",
                    self.executable.display(),
                    e
                ))
            })?;

        tokio::time::sleep(self.settle).await;

        match output.status.code() {
            Some(0) | Some(1) => {
                log::info!("Job sent to {}", printer);
                Ok(())
            }
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(DuplexError::Dispatch(format!(
                    "SumatraPDF failed (exit code {}): {}",
                    code.map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                    stderr.trim()
                )))
            }
        }
    }
}

/// First existing SumatraPDF executable among `candidates`, then on `PATH`
pub fn find_sumatra(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .or_else(|| find_in_path(SUMATRA_EXECUTABLE, std::env::var_os("PATH")?))
}

fn find_in_path(name: &str, path_var: std::ffi::OsString) -> Option<PathBuf> {
    let file_name = format!("{}{}", name, std::env::consts::EXE_SUFFIX);
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}
