//! Platform print spooler commands
//!
//! CUPS (`lpstat`, `lpoptions`, `lp`) on Unix, PowerShell on Windows.
//! All calls block; run them off the async runtime.

use super::guard::DefaultPrinterStore;
use crate::types::*;
use std::path::Path;
use std::process::Command;

/// The host's print spooler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpooler;

impl SystemSpooler {
    /// Print a file on the current default printer
    pub fn submit_to_default(&self, artifact: &Path) -> Result<()> {
        platform::submit_to_default(artifact).map(|_| ())
    }
}

impl DefaultPrinterStore for SystemSpooler {
    fn current_default(&self) -> Result<Option<String>> {
        platform::current_default()
    }

    fn set_default(&self, printer: &str) -> Result<()> {
        platform::set_default(printer).map(|_| ())
    }
}

/// Names of the printers known to the spooler
pub async fn list_printers() -> Result<Vec<String>> {
    let stdout = tokio::task::spawn_blocking(platform::list_printers).await??;
    Ok(parse_printer_list(&stdout))
}

/// Run a spooler command and return its stdout
fn run(program: &str, args: &[&str]) -> Result<String> {
    log::debug!("[spooler] {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| DuplexError::Dispatch(format!("failed to execute {}: {}", program, e)))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(DuplexError::Dispatch(format!(
            "{} failed (exit code {}): {}",
            program,
            output
                .status
                .code()
                .map_or_else(|| "unknown".to_string(), |c| c.to_string()),
            stderr.trim()
        )))
    }
}

fn parse_printer_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(not(windows))]
mod platform {
    use super::run;
    use crate::types::*;
    use std::path::Path;

    pub fn current_default() -> Result<Option<String>> {
        let stdout = run("lpstat", &["-d"])?;
        Ok(parse_lpstat_default(&stdout))
    }

    pub fn set_default(printer: &str) -> Result<String> {
        run("lpoptions", &["-d", printer])
    }

    pub fn submit_to_default(artifact: &Path) -> Result<String> {
        let path = artifact.to_string_lossy();
        run("lp", &[path.as_ref()])
    }

    pub fn list_printers() -> Result<String> {
        run("lpstat", &["-e"])
    }

    /// `system default destination: NAME`, or `no system default destination`
    pub(super) fn parse_lpstat_default(stdout: &str) -> Option<String> {
        stdout.lines().find_map(|line| {
            let (label, name) = line.split_once(':')?;
            let name = name.trim();
            (label.trim().ends_with("default destination") && !name.is_empty())
                .then(|| name.to_string())
        })
    }
}

#[cfg(windows)]
mod platform {
    use super::run;
    use crate::types::*;
    use std::path::Path;

    fn powershell(script: &str) -> Result<String> {
        run(
            "powershell",
            &["-NoProfile", "-NonInteractive", "-Command", script],
        )
    }

    /// Single-quoted PowerShell string literal
    fn quote(value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    pub fn current_default() -> Result<Option<String>> {
        let stdout =
            powershell("(Get-CimInstance -ClassName Win32_Printer -Filter 'Default=TRUE').Name")?;
        let name = stdout.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    pub fn set_default(printer: &str) -> Result<String> {
        powershell(&format!(
            "(New-Object -ComObject WScript.Network).SetDefaultPrinter({})",
            quote(printer)
        ))
    }

    pub fn submit_to_default(artifact: &Path) -> Result<String> {
        powershell(&format!(
            "Start-Process -FilePath {} -Verb Print -WindowStyle Hidden",
            quote(&artifact.to_string_lossy())
        ))
    }

    pub fn list_printers() -> Result<String> {
        powershell("Get-CimInstance -ClassName Win32_Printer | Select-Object -ExpandProperty Name")
    }
}
