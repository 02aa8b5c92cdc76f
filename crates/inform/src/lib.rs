#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod culprit;
mod error;
mod fmt;
mod format;
mod informant;
mod informer;
mod logging;
mod message;
mod progress;
mod registry;

pub mod testing;

pub use culprit::{CulpritGuard, add_culprit, get_culprit, join_culprit, set_culprit};
pub use error::Error;
pub use fmt::{FmtError, Scope, ScopeChain, fmt, fmt_at};
pub use format::{
    Quantity, columns, conjoin, conjoin_with, cull, full_stop, indent, join, os_error, plural,
    render,
};
pub use informant::{
    COMMENT, DEBUG, DISPLAY, ERROR, FATAL, Gate, Informant, LOG, NARRATE, NOTIFY, OUTPUT, PANIC,
    Termination, WARN,
};
pub use informer::{Inform, InformBuilder};
pub use logging::InformLogger;
pub use message::Message;
pub use progress::{ProgressBar, render_bar};
pub use registry::{
    codicil, comment, debug, display, done, error, errors_accrued, fatal, get_informer,
    get_prog_name, log, narrate, notify, output, panic, set_informer, terminate,
    terminate_if_errors, warn,
};
