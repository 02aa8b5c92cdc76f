//! The closed set of built-in informants plus a builder for custom ones.
//!
//! An [`Informant`] carries the per-kind attributes consulted at emission
//! time: the header label, routing (stdout vs stderr vs logfile-only), the
//! flag gating it, whether it counts as an error, and any termination
//! behavior. The built-ins form a table; callers needing project-specific
//! kinds build their own with the same attributes.

use std::sync::LazyLock;

use console::Color;

/// Flag gating an informant's console output.
///
/// A gated-off message is suppressed on the console but still reaches the
/// logfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    /// Always emitted.
    #[default]
    Always,
    /// Emitted only when the informer is verbose.
    Verbose,
    /// Emitted only when the informer narrates.
    Narrate,
    /// Emitted only when the informer has debug output enabled.
    Debug,
}

/// Process-termination behavior attached to an informant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exit with the given status after emission.
    Exit(i32),
    /// Panic after emission, producing a backtrace.
    Panic,
}

/// Attributes of one severity kind.
#[derive(Debug, Clone)]
pub struct Informant {
    label: Option<String>,
    prog_name_in_header: bool,
    is_error: bool,
    printed: bool,
    logged: bool,
    to_stderr: bool,
    gate: Gate,
    header_color: Option<Color>,
    termination: Option<Termination>,
}

impl Default for Informant {
    fn default() -> Self {
        Self {
            label: None,
            prog_name_in_header: false,
            is_error: false,
            printed: true,
            logged: true,
            to_stderr: false,
            gate: Gate::Always,
            header_color: None,
            termination: None,
        }
    }
}

impl Informant {
    /// Create a display-like informant: unlabeled, stdout, logged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header label (for example `warning`).
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Prefix the header with the informer's program name.
    #[must_use]
    pub fn with_prog_name(mut self) -> Self {
        self.prog_name_in_header = true;
        self
    }

    /// Count emissions toward the accrued-error total.
    #[must_use]
    pub fn as_error(mut self) -> Self {
        self.is_error = true;
        self
    }

    /// Route console output to stderr instead of stdout.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.to_stderr = true;
        self
    }

    /// Suppress console output entirely (logfile-only informant).
    #[must_use]
    pub fn log_only(mut self) -> Self {
        self.printed = false;
        self
    }

    /// Skip the logfile.
    #[must_use]
    pub fn unlogged(mut self) -> Self {
        self.logged = false;
        self
    }

    /// Gate console output on an informer flag.
    #[must_use]
    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// Color applied to the header when the informer has colors enabled.
    #[must_use]
    pub fn header_color(mut self, color: Color) -> Self {
        self.header_color = Some(color);
        self
    }

    /// Terminate the process after emission.
    #[must_use]
    pub fn terminating(mut self, termination: Termination) -> Self {
        self.termination = Some(termination);
        self
    }

    /// The rendered header, without the trailing colon.
    ///
    /// `None` for unlabeled informants; the program name is prefixed when
    /// available and requested.
    #[must_use]
    pub fn header(&self, prog_name: Option<&str>) -> Option<String> {
        let label = self.label.as_deref()?;
        match prog_name {
            Some(prog) if self.prog_name_in_header => Some(format!("{prog} {label}")),
            _ => Some(label.to_string()),
        }
    }

    pub(crate) fn is_error(&self) -> bool {
        self.is_error
    }

    pub(crate) fn printed(&self) -> bool {
        self.printed
    }

    pub(crate) fn logged(&self) -> bool {
        self.logged
    }

    pub(crate) fn stderr_bound(&self) -> bool {
        self.to_stderr
    }

    pub(crate) fn gate(&self) -> Gate {
        self.gate
    }

    pub(crate) fn color(&self) -> Option<Color> {
        self.header_color
    }

    pub(crate) fn termination(&self) -> Option<Termination> {
        self.termination
    }
}

/// Logfile-only record of program activity.
pub static LOG: LazyLock<Informant> = LazyLock::new(|| Informant::new().log_only());

/// Verbose-gated commentary for interested users.
pub static COMMENT: LazyLock<Informant> =
    LazyLock::new(|| Informant::new().gated(Gate::Verbose).header_color(Color::Cyan));

/// Narrate-gated running narration of program progress.
pub static NARRATE: LazyLock<Informant> =
    LazyLock::new(|| Informant::new().gated(Gate::Narrate).header_color(Color::Blue));

/// Ordinary user-facing output, suppressed when quiet.
pub static DISPLAY: LazyLock<Informant> = LazyLock::new(Informant::new);

/// The program's essential output.
pub static OUTPUT: LazyLock<Informant> = LazyLock::new(Informant::new);

/// Output that demands the user's attention (delivery is plain console
/// output; no desktop notification is sent).
pub static NOTIFY: LazyLock<Informant> = LazyLock::new(Informant::new);

/// Debugging aid, gated on the informer's debug flag.
pub static DEBUG: LazyLock<Informant> = LazyLock::new(|| {
    Informant::new()
        .label("DEBUG")
        .with_prog_name()
        .gated(Gate::Debug)
        .header_color(Color::Magenta)
});

/// Warning: something questionable, not counted as an error.
pub static WARN: LazyLock<Informant> = LazyLock::new(|| {
    Informant::new()
        .label("warning")
        .with_prog_name()
        .to_stderr()
        .header_color(Color::Yellow)
});

/// Recoverable error.
pub static ERROR: LazyLock<Informant> = LazyLock::new(|| {
    Informant::new()
        .label("error")
        .with_prog_name()
        .as_error()
        .to_stderr()
        .header_color(Color::Red)
});

/// Unrecoverable error: emits, then exits with status 1.
pub static FATAL: LazyLock<Informant> = LazyLock::new(|| {
    Informant::new()
        .label("error")
        .with_prog_name()
        .as_error()
        .to_stderr()
        .header_color(Color::Red)
        .terminating(Termination::Exit(1))
});

/// Internal error: emits, then panics so a backtrace is produced.
pub static PANIC: LazyLock<Informant> = LazyLock::new(|| {
    Informant::new()
        .label("internal error (please report)")
        .with_prog_name()
        .as_error()
        .to_stderr()
        .header_color(Color::Red)
        .terminating(Termination::Panic)
});
