//! System spooler backend

use super::guard::DefaultPrinterGuard;
use super::spooler::SystemSpooler;
use crate::options::PrintOptions;
use crate::types::*;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SystemBackend {
    spooler: SystemSpooler,
    settle: Duration,
}

impl SystemBackend {
    pub fn new(options: &PrintOptions) -> Self {
        Self {
            spooler: SystemSpooler,
            settle: Duration::from_millis(options.system_settle_ms),
        }
    }

    /// Print through the default printer, switched to `printer` for the job
    pub async fn print(&self, artifact: &Path, printer: &str) -> Result<()> {
        let spooler = self.spooler;
        let settle = self.settle;
        let artifact = artifact.to_owned();
        let printer = printer.to_owned();

        tokio::task::spawn_blocking(move || {
            let _guard = DefaultPrinterGuard::acquire(&spooler, &printer)?;
            log::info!("[spooler] print {} -> {}", artifact.display(), printer);
            spooler.submit_to_default(&artifact)?;
            // Keep the default switched until the spooler has picked the job up
            std::thread::sleep(settle);
            log::info!("Job sent to {}", printer);
            Ok::<_, DuplexError>(())
        })
        .await?
    }
}
