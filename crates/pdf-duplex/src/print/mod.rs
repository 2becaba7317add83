//! Print dispatch - handing rendered artifacts to a printer
//!
//! Two backends are available:
//! - [`SumatraBackend`]: SumatraPDF's silent `-print-to` mode (preferred)
//! - [`SystemBackend`]: the platform spooler, printing to the default
//!   printer while it is temporarily switched to the target
//!
//! The backend is chosen once per batch by [`PrintBackend::probe`].

mod guard;
mod spooler;
mod sumatra;
mod system;

pub use guard::{DefaultPrinterGuard, DefaultPrinterStore};
pub use spooler::{SystemSpooler, list_printers};
pub use sumatra::{SumatraBackend, find_sumatra};
pub use system::SystemBackend;

use crate::options::{BackendPreference, PrintOptions};
use crate::types::*;
use std::fmt;
use std::future::Future;
use std::path::Path;

/// Something that can submit a rendered PDF to a print queue
pub trait PrintDispatcher {
    fn dispatch(&self, artifact: &Path, printer: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Print backend selected at startup
#[derive(Debug, Clone)]
pub enum PrintBackend {
    Sumatra(SumatraBackend),
    System(SystemBackend),
}

impl PrintBackend {
    /// Pick a backend according to the configured preference
    pub fn probe(options: &PrintOptions) -> Result<Self> {
        match options.backend {
            BackendPreference::System => Ok(Self::System(SystemBackend::new(options))),
            BackendPreference::Sumatra => find_sumatra(&options.sumatra_paths)
                .map(|exe| Self::Sumatra(SumatraBackend::new(exe, options)))
                .ok_or_else(|| {
                    DuplexError::Dispatch("SumatraPDF was requested but not found".to_string())
                }),
            BackendPreference::Auto => match find_sumatra(&options.sumatra_paths) {
                Some(exe) => Ok(Self::Sumatra(SumatraBackend::new(exe, options))),
                None => {
                    log::info!("SumatraPDF not found, using the system spooler");
                    Ok(Self::System(SystemBackend::new(options)))
                }
            },
        }
    }
}

impl fmt::Display for PrintBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintBackend::Sumatra(backend) => {
                write!(f, "SumatraPDF @ {}", backend.executable().display())
            }
            PrintBackend::System(_) => f.write_str("system spooler"),
        }
    }
}

impl PrintDispatcher for PrintBackend {
    async fn dispatch(&self, artifact: &Path, printer: &str) -> Result<()> {
        match self {
            PrintBackend::Sumatra(backend) => backend.print(artifact, printer).await,
            PrintBackend::System(backend) => backend.print(artifact, printer).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options_with(backend: BackendPreference, sumatra_paths: Vec<PathBuf>) -> PrintOptions {
        PrintOptions {
            backend,
            sumatra_paths,
            ..Default::default()
        }
    }

    #[test]
    fn auto_prefers_configured_sumatra() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("SumatraPDF.exe");
        std::fs::write(&exe, b"").unwrap();

        let backend = PrintBackend::probe(&options_with(BackendPreference::Auto, vec![exe.clone()]))
            .unwrap();
        match backend {
            PrintBackend::Sumatra(sumatra) => assert_eq!(sumatra.executable(), exe),
            other => panic!("Expected SumatraPDF, got {}", other),
        }
    }

    #[test]
    fn sumatra_preference_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("SumatraPDF.exe");
        std::fs::write(&exe, b"").unwrap();

        let backend = PrintBackend::probe(&options_with(
            BackendPreference::Sumatra,
            vec![dir.path().join("missing.exe"), exe.clone()],
        ))
        .unwrap();
        assert!(matches!(backend, PrintBackend::Sumatra(ref s) if s.executable() == exe));
    }

    #[test]
    fn auto_falls_back_to_system_spooler() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_with(BackendPreference::Auto, vec![dir.path().join("missing.exe")]);
        if find_sumatra(&options.sumatra_paths).is_some() {
            // SumatraPDF installed on PATH
            return;
        }

        let backend = PrintBackend::probe(&options).unwrap();
        assert!(matches!(backend, PrintBackend::System(_)));
        assert_eq!(backend.to_string(), "system spooler");
    }

    #[test]
    fn sumatra_preference_without_executable_fails() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_with(BackendPreference::Sumatra, vec![dir.path().join("missing.exe")]);
        if find_sumatra(&options.sumatra_paths).is_some() {
            return;
        }

        let err = PrintBackend::probe(&options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DispatchFailure);
    }

    #[test]
    fn system_preference_skips_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("SumatraPDF.exe");
        std::fs::write(&exe, b"").unwrap();

        let backend = PrintBackend::probe(&options_with(BackendPreference::System, vec![exe])).unwrap();
        assert!(matches!(backend, PrintBackend::System(_)));
    }
}
