//! Bridge from the `log` facade to the active informer.
//!
//! Installing an [`InformLogger`] routes `log` macro calls from this crate's
//! dependencies (and the application itself) through the informant matching
//! each record's level, so everything lands on the same streams and logfile.
//!
//! # Usage
//!
//! ```no_run
//! use inform::InformLogger;
//! use log::LevelFilter;
//!
//! InformLogger::init(LevelFilter::Info).expect("logger already set");
//! log::warn!("routed through the warn informant");
//! ```

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::registry::get_informer;

/// A `log::Log` implementation delegating to the active informer.
///
/// Level mapping: `Error` → error, `Warn` → warn, `Info` → display,
/// `Debug` → debug, `Trace` → comment. Gating still applies, so `Debug`
/// records only show when the informer has debug output enabled, and
/// `Trace` records only when it is verbose; both always reach the logfile.
#[derive(Debug, Clone, Copy)]
pub struct InformLogger {
    filter: LevelFilter,
}

impl InformLogger {
    /// Create a logger with the given level filter.
    #[must_use]
    pub fn new(filter: LevelFilter) -> Self {
        Self { filter }
    }

    /// Install as the global logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(filter: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(filter)))?;
        log::set_max_level(filter);
        Ok(())
    }

    /// Install as the global logger, ignoring errors if already set.
    pub fn try_init(filter: LevelFilter) {
        let _ = Self::init(filter);
    }
}

impl Log for InformLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let informer = get_informer();
        let text = record.args().to_string();
        match record.level() {
            log::Level::Error => informer.error(text),
            log::Level::Warn => informer.warn(text),
            log::Level::Info => informer.display(text),
            log::Level::Debug => informer.debug(text),
            log::Level::Trace => informer.comment(text),
        }
    }

    fn flush(&self) {
        let _ = get_informer().flush();
    }
}
