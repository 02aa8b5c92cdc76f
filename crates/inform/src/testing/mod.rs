//! Test utilities: capture buffers and the scripted-case harness.
//!
//! [`CaptureBuffer`] stands in for any informer stream and can be read back
//! after emission. [`Runner`] executes a table of named [`Case`]s, each a
//! stimulus run against a freshly built captured informer, and diffs the
//! captured streams against expected text.

mod capture;
mod harness;

pub use capture::CaptureBuffer;
pub use harness::{Case, Failure, FailureKind, Report, Runner, scrub_invocation};
