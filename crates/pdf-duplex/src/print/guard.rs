//! Scoped switch of the system default printer

use crate::types::Result;

/// Read and change the system-wide default printer
pub trait DefaultPrinterStore {
    fn current_default(&self) -> Result<Option<String>>;
    fn set_default(&self, printer: &str) -> Result<()>;
}

/// Makes `printer` the default for as long as the guard lives.
///
/// The previous default is put back when the guard is dropped, including
/// on early returns and panics while printing.
pub struct DefaultPrinterGuard<'a, S: DefaultPrinterStore> {
    store: &'a S,
    previous: Option<String>,
    changed: bool,
}

impl<'a, S: DefaultPrinterStore> DefaultPrinterGuard<'a, S> {
    pub fn acquire(store: &'a S, printer: &str) -> Result<Self> {
        let previous = store.current_default()?;

        if previous.as_deref() == Some(printer) {
            return Ok(Self {
                store,
                previous,
                changed: false,
            });
        }

        store.set_default(printer)?;
        log::debug!(
            "Default printer switched from {:?} to \"{}\"",
            previous,
            printer
        );

        Ok(Self {
            store,
            previous,
            changed: true,
        })
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}

impl<S: DefaultPrinterStore> Drop for DefaultPrinterGuard<'_, S> {
    fn drop(&mut self) {
        if !self.changed {
            return;
        }

        match &self.previous {
            Some(previous) => {
                if let Err(e) = self.store.set_default(previous) {
                    log::warn!("Could not restore default printer \"{}\": {}", previous, e);
                } else {
                    log::debug!("Default printer restored to \"{}\"", previous);
                }
            }
            None => log::warn!("No default printer was set before printing; leaving it changed"),
        }
    }
}
