//! The global active informer and the module-level informant functions.
//!
//! A single process-wide slot holds the current [`Inform`]; the free
//! functions here (and the culprit helpers) delegate to it. A default
//! informer is created lazily on first use, so small scripts can call
//! [`display`] and friends without any setup.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use inform::{set_informer, Inform, display, warn};
//!
//! let informer = Arc::new(Inform::builder().quiet(true).build()?);
//! set_informer(informer);
//!
//! display("only the logfile sees this");
//! warn("stderr still does");
//! # std::io::Result::Ok(())
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use crate::informer::Inform;
use crate::message::Message;

static ACTIVE: Mutex<Option<Arc<Inform>>> = Mutex::new(None);

/// The currently active informer, creating a default one if none is set.
#[must_use]
pub fn get_informer() -> Arc<Inform> {
    let mut slot = ACTIVE.lock().unwrap_or_else(PoisonError::into_inner);
    slot.get_or_insert_with(|| Arc::new(Inform::new())).clone()
}

/// Replace the active informer, returning the previous one.
pub fn set_informer(informer: Arc<Inform>) -> Option<Arc<Inform>> {
    let mut slot = ACTIVE.lock().unwrap_or_else(PoisonError::into_inner);
    slot.replace(informer)
}

/// Record a message in the active informer's logfile.
pub fn log(message: impl Into<Message>) {
    get_informer().log(message);
}

/// Emit commentary through the active informer; shown only when verbose.
pub fn comment(message: impl Into<Message>) {
    get_informer().comment(message);
}

/// Emit narration through the active informer; shown only when narrating.
pub fn narrate(message: impl Into<Message>) {
    get_informer().narrate(message);
}

/// Emit an ordinary message through the active informer.
pub fn display(message: impl Into<Message>) {
    get_informer().display(message);
}

/// Emit essential output through the active informer.
pub fn output(message: impl Into<Message>) {
    get_informer().output(message);
}

/// Emit attention-demanding output through the active informer.
pub fn notify(message: impl Into<Message>) {
    get_informer().notify(message);
}

/// Emit a debugging message through the active informer.
pub fn debug(message: impl Into<Message>) {
    get_informer().debug(message);
}

/// Emit a warning through the active informer.
pub fn warn(message: impl Into<Message>) {
    get_informer().warn(message);
}

/// Emit an error through the active informer.
pub fn error(message: impl Into<Message>) {
    get_informer().error(message);
}

/// Emit an error through the active informer, then exit with status 1.
pub fn fatal(message: impl Into<Message>) -> ! {
    get_informer().fatal(message)
}

/// Emit an internal error through the active informer, then panic.
pub fn panic(message: impl Into<Message>) -> ! {
    get_informer().panic(message)
}

/// Attach supplementary text to the most recent message.
pub fn codicil(message: impl Into<Message>) {
    get_informer().codicil(message);
}

/// Number of errors accrued by the active informer.
#[must_use]
pub fn errors_accrued() -> usize {
    get_informer().errors_accrued()
}

/// Flush the active informer's streams and exit successfully.
pub fn done() -> ! {
    get_informer().done()
}

/// Flush the active informer's streams and exit with `status`, or with a
/// status reflecting accrued errors when none is given.
pub fn terminate(status: Option<i32>) -> ! {
    get_informer().terminate(status)
}

/// Exit with a failing status if the active informer has accrued errors.
pub fn terminate_if_errors() {
    get_informer().terminate_if_errors();
}

/// Program name of the active informer.
#[must_use]
pub fn get_prog_name() -> Option<String> {
    get_informer().prog_name().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CaptureBuffer;

    // The registry is process-wide state shared by every test in this
    // binary, so all assertions against it live in this one test.
    #[test]
    fn test_registry_swaps_and_delegates() {
        let default_informer = get_informer();
        assert!(Arc::ptr_eq(&default_informer, &get_informer()));

        let stdout = CaptureBuffer::new();
        let stderr = CaptureBuffer::new();
        let informer = Arc::new(
            Inform::builder()
                .prog_name("inform")
                .stdout(stdout.clone())
                .stderr(stderr.clone())
                .build()
                .expect("build"),
        );
        let previous = set_informer(informer.clone());

        display("routed through the registry");
        error("and so is this");
        codicil("with an appendage");
        assert_eq!(stdout.contents(), "routed through the registry\n");
        assert_eq!(
            stderr.contents(),
            "inform error: and so is this\n    with an appendage\n"
        );
        assert_eq!(errors_accrued(), 1);
        assert_eq!(get_prog_name(), Some("inform".to_string()));

        if let Some(previous) = previous {
            set_informer(previous);
        }
    }
}
