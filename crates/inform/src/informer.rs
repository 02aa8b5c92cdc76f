//! The message-routing object.
//!
//! An [`Inform`] holds the verbosity flags, the program name, and the stream
//! targets, and exposes one emission method per built-in informant. It is
//! built with [`InformBuilder`]; opening a logfile can fail, so
//! [`InformBuilder::build`] returns `io::Result`.
//!
//! Transient state (the codicil context and the culprit stack) sits behind a
//! `Mutex` and the accrued-error count behind an `AtomicUsize` so the
//! informer can be shared through an `Arc` by the global registry. Supported
//! usage is single-threaded scripts and CLIs; the locks only keep that
//! sharing sound.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicUsize, Ordering};

use time::OffsetDateTime;
use time::macros::format_description;

use crate::culprit::join_culprit;
use crate::format::{LEADER, indent};
use crate::informant::{self, Gate, Informant, Termination};
use crate::message::Message;

/// A console stream an emission was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Where a console stream actually writes.
enum OutputTarget {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

impl OutputTarget {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        match self {
            OutputTarget::Stdout => io::stdout().lock().write_all(text.as_bytes()),
            OutputTarget::Stderr => io::stderr().lock().write_all(text.as_bytes()),
            OutputTarget::Writer(w) => w.write_all(text.as_bytes()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout => io::stdout().lock().flush(),
            OutputTarget::Stderr => io::stderr().lock().flush(),
            OutputTarget::Writer(w) => w.flush(),
        }
    }

    fn is_overridden(&self) -> bool {
        matches!(self, OutputTarget::Writer(_))
    }
}

struct Streams {
    stdout: OutputTarget,
    stderr: OutputTarget,
    logfile: Option<Box<dyn Write + Send>>,
}

/// Context of the most recent primary message, consulted by codicils.
#[derive(Debug, Clone, Copy)]
struct Prior {
    console: Option<ConsoleStream>,
    logged: bool,
    indented: bool,
}

#[derive(Default)]
struct EmitState {
    prior: Option<Prior>,
    culprits: Vec<String>,
}

/// The active routing configuration: flags, streams, and transient state.
pub struct Inform {
    verbose: bool,
    narrate: bool,
    quiet: bool,
    mute: bool,
    debug: bool,
    colors: bool,
    prog_name: Option<String>,
    streams: Mutex<Streams>,
    state: Mutex<EmitState>,
    errors: AtomicUsize,
}

impl Default for Inform {
    fn default() -> Self {
        Self {
            verbose: false,
            narrate: false,
            quiet: false,
            mute: false,
            debug: false,
            colors: console::colors_enabled(),
            prog_name: prog_name_from_args(),
            streams: Mutex::new(Streams {
                stdout: OutputTarget::Stdout,
                stderr: OutputTarget::Stderr,
                logfile: None,
            }),
            state: Mutex::new(EmitState::default()),
            errors: AtomicUsize::new(0),
        }
    }
}

impl Inform {
    /// Create an informer with default configuration: real streams, no
    /// logfile, all flags off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an informer using the builder pattern.
    #[must_use]
    pub fn builder() -> InformBuilder {
        InformBuilder::new()
    }

    /// The program name used in headers, if any.
    #[must_use]
    pub fn prog_name(&self) -> Option<&str> {
        self.prog_name.as_deref()
    }

    /// Emit through an arbitrary informant.
    ///
    /// This is the one true emission path: it renders the message, prefixes
    /// the culprit stack, applies the informant's header, routes to the
    /// configured streams, and remembers the destination context for
    /// codicils. Write failures propagate. Never returns for terminating
    /// informants.
    pub fn report(&self, informant: &Informant, message: impl Into<Message>) -> io::Result<()> {
        let message = message.into();
        if informant.is_error() {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        let mut body = message.body();
        let culprits = self.get_culprit();
        if !culprits.is_empty() {
            body = format!("{}: {body}", join_culprit(&culprits));
        }

        let header = informant.header(self.prog_name.as_deref());
        let text = match &header {
            Some(h) => {
                let shown = self.styled_header(informant, h);
                if body.contains('\n') {
                    format!("{shown}:\n{}", indent(&body, LEADER))
                } else {
                    format!("{shown}: {body}")
                }
            }
            None => body,
        };

        let gate_open = match informant.gate() {
            Gate::Always => true,
            Gate::Verbose => self.verbose,
            Gate::Narrate => self.narrate,
            Gate::Debug => self.debug,
        };
        let console = if !informant.printed() || !gate_open || self.mute {
            None
        } else if informant.stderr_bound() {
            Some(ConsoleStream::Stderr)
        } else if self.quiet {
            None
        } else {
            Some(ConsoleStream::Stdout)
        };

        let result = self.write_message(&text, message.terminator(), console, informant.logged());

        {
            let mut state = lock(&self.state);
            state.prior = Some(Prior {
                console,
                logged: informant.logged(),
                indented: header.is_some(),
            });
        }

        match informant.termination() {
            Some(Termination::Exit(code)) => {
                let _ = self.flush();
                std::process::exit(code);
            }
            Some(Termination::Panic) => {
                let _ = self.flush();
                panic!("{}", text.trim_end());
            }
            None => result,
        }
    }

    /// Record a message in the logfile without console output.
    pub fn log(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::LOG, message);
    }

    /// Emit commentary; shown only when verbose.
    pub fn comment(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::COMMENT, message);
    }

    /// Emit narration; shown only when narrating.
    pub fn narrate(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::NARRATE, message);
    }

    /// Emit an ordinary message.
    pub fn display(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::DISPLAY, message);
    }

    /// Emit the program's essential output.
    pub fn output(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::OUTPUT, message);
    }

    /// Emit output that demands attention.
    pub fn notify(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::NOTIFY, message);
    }

    /// Emit a debugging message; shown only when debug output is enabled.
    pub fn debug(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::DEBUG, message);
    }

    /// Emit a warning to stderr.
    pub fn warn(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::WARN, message);
    }

    /// Emit an error to stderr and accrue it.
    pub fn error(&self, message: impl Into<Message>) {
        let _ = self.report(&informant::ERROR, message);
    }

    /// Emit an error, then exit with status 1.
    pub fn fatal(&self, message: impl Into<Message>) -> ! {
        let _ = self.report(&informant::FATAL, message);
        unreachable!("fatal informant terminates the process")
    }

    /// Emit an internal error, then panic.
    pub fn panic(&self, message: impl Into<Message>) -> ! {
        let _ = self.report(&informant::PANIC, message);
        unreachable!("panic informant terminates the process")
    }

    /// Attach supplementary text to the most recent message.
    ///
    /// The codicil goes to the same destinations as its triggering message,
    /// indented four spaces when that message carried a header. With no
    /// prior message it renders bare to stdout and the logfile.
    pub fn codicil(&self, message: impl Into<Message>) {
        let message = message.into();
        let prior = lock(&self.state).prior.unwrap_or(Prior {
            console: if self.mute || self.quiet {
                None
            } else {
                Some(ConsoleStream::Stdout)
            },
            logged: true,
            indented: false,
        });
        let body = message.body();
        let text = if prior.indented {
            indent(&body, LEADER)
        } else {
            body
        };
        let _ = self.write_message(&text, message.terminator(), prior.console, prior.logged);
    }

    /// Number of errors accrued so far.
    #[must_use]
    pub fn errors_accrued(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    /// Exit status reflecting accrued errors: 0 when clean, 1 otherwise.
    #[must_use]
    pub fn exit_status(&self) -> i32 {
        i32::from(self.errors_accrued() > 0)
    }

    /// Flush streams and exit successfully.
    pub fn done(&self) -> ! {
        let _ = self.flush();
        std::process::exit(0);
    }

    /// Flush streams and exit with `status`, or with
    /// [`exit_status`](Self::exit_status) when none is given.
    pub fn terminate(&self, status: Option<i32>) -> ! {
        let status = status.unwrap_or_else(|| self.exit_status());
        let _ = self.flush();
        std::process::exit(status);
    }

    /// Exit with a failing status if any errors have accrued; otherwise
    /// return normally.
    pub fn terminate_if_errors(&self) {
        if self.errors_accrued() > 0 {
            self.terminate(None);
        }
    }

    /// Flush every configured stream.
    pub fn flush(&self) -> io::Result<()> {
        let mut streams = lock(&self.streams);
        streams.stdout.flush()?;
        streams.stderr.flush()?;
        if let Some(log) = streams.logfile.as_mut() {
            log.flush()?;
        }
        Ok(())
    }

    /// Snapshot of the culprit stack.
    #[must_use]
    pub fn get_culprit(&self) -> Vec<String> {
        lock(&self.state).culprits.clone()
    }

    pub(crate) fn swap_culprits(&self, new: Vec<String>) -> Vec<String> {
        std::mem::replace(&mut lock(&self.state).culprits, new)
    }

    pub(crate) fn push_culprit_label(&self, label: String) {
        lock(&self.state).culprits.push(label);
    }

    fn styled_header(&self, informant: &Informant, header: &str) -> String {
        match informant.color() {
            Some(color) if self.colors => console::Style::new()
                .fg(color)
                .force_styling(true)
                .apply_to(header)
                .to_string(),
            _ => header.to_string(),
        }
    }

    fn write_message(
        &self,
        text: &str,
        terminator: &str,
        console: Option<ConsoleStream>,
        logged: bool,
    ) -> io::Result<()> {
        let mut streams = lock(&self.streams);
        match console {
            Some(ConsoleStream::Stdout) => {
                streams.stdout.write_str(text)?;
                streams.stdout.write_str(terminator)?;
            }
            Some(ConsoleStream::Stderr) => {
                streams.stderr.write_str(text)?;
                streams.stderr.write_str(terminator)?;
            }
            None => {}
        }
        if logged {
            if let Some(log) = streams.logfile.as_mut() {
                log.write_all(text.as_bytes())?;
                log.write_all(terminator.as_bytes())?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Inform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inform")
            .field("verbose", &self.verbose)
            .field("narrate", &self.narrate)
            .field("quiet", &self.quiet)
            .field("mute", &self.mute)
            .field("debug", &self.debug)
            .field("prog_name", &self.prog_name)
            .field("errors", &self.errors_accrued())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn prog_name_from_args() -> Option<String> {
    env::args().next().and_then(|arg| {
        Path::new(&arg)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    })
}

enum LogfileTarget {
    Disabled,
    Path(PathBuf),
    Writer(Box<dyn Write + Send>),
}

enum ProgName {
    FromArgs,
    Named(String),
    Hidden,
}

/// Builder for [`Inform`].
///
/// # Example
///
/// ```no_run
/// use inform::Inform;
///
/// let informer = Inform::builder()
///     .verbose(true)
///     .prog_name("myprog")
///     .logfile("myprog.log")
///     .build()?;
/// informer.display("starting up");
/// # std::io::Result::Ok(())
/// ```
pub struct InformBuilder {
    verbose: bool,
    narrate: bool,
    quiet: bool,
    mute: bool,
    debug: bool,
    colors: Option<bool>,
    prog_name: ProgName,
    stdout: Option<Box<dyn Write + Send>>,
    stderr: Option<Box<dyn Write + Send>>,
    logfile: LogfileTarget,
}

impl Default for InformBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InformBuilder {
    /// Create a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            verbose: false,
            narrate: false,
            quiet: false,
            mute: false,
            debug: false,
            colors: None,
            prog_name: ProgName::FromArgs,
            stdout: None,
            stderr: None,
            logfile: LogfileTarget::Disabled,
        }
    }

    /// Show comments.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Show narration.
    #[must_use]
    pub fn narrate(mut self, narrate: bool) -> Self {
        self.narrate = narrate;
        self
    }

    /// Suppress stdout (the logfile still receives everything).
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Suppress stdout and stderr (the logfile still receives everything).
    #[must_use]
    pub fn mute(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    /// Show debug messages.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Force header colors on or off. When unset, colors are enabled only
    /// for real terminal streams.
    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Set the program name used in headers.
    #[must_use]
    pub fn prog_name(mut self, name: impl Into<String>) -> Self {
        self.prog_name = ProgName::Named(name.into());
        self
    }

    /// Omit the program name from headers.
    #[must_use]
    pub fn no_prog_name(mut self) -> Self {
        self.prog_name = ProgName::Hidden;
        self
    }

    /// Redirect stdout-bound messages to the given writer.
    #[must_use]
    pub fn stdout(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stdout = Some(Box::new(writer));
        self
    }

    /// Redirect stderr-bound messages to the given writer.
    #[must_use]
    pub fn stderr(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stderr = Some(Box::new(writer));
        self
    }

    /// Log to the file at `path`; created (or truncated) on build.
    #[must_use]
    pub fn logfile(mut self, path: impl AsRef<Path>) -> Self {
        self.logfile = LogfileTarget::Path(path.as_ref().to_path_buf());
        self
    }

    /// Log to an arbitrary writer.
    #[must_use]
    pub fn logfile_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.logfile = LogfileTarget::Writer(Box::new(writer));
        self
    }

    /// Build the informer.
    ///
    /// Opens the logfile when one was requested and writes the invocation
    /// header line to it.
    pub fn build(self) -> io::Result<Inform> {
        let mut logfile: Option<Box<dyn Write + Send>> = match self.logfile {
            LogfileTarget::Disabled => None,
            LogfileTarget::Path(path) => Some(Box::new(File::create(path)?)),
            LogfileTarget::Writer(writer) => Some(writer),
        };
        if let Some(log) = logfile.as_mut() {
            write_invocation_header(log.as_mut())?;
        }

        let streams_overridden = self.stdout.is_some() || self.stderr.is_some();
        let colors = self
            .colors
            .unwrap_or_else(|| !streams_overridden && console::colors_enabled());

        Ok(Inform {
            verbose: self.verbose,
            narrate: self.narrate,
            quiet: self.quiet,
            mute: self.mute,
            debug: self.debug,
            colors,
            prog_name: match self.prog_name {
                ProgName::FromArgs => prog_name_from_args(),
                ProgName::Named(name) => Some(name),
                ProgName::Hidden => None,
            },
            streams: Mutex::new(Streams {
                stdout: self.stdout.map_or(OutputTarget::Stdout, OutputTarget::Writer),
                stderr: self.stderr.map_or(OutputTarget::Stderr, OutputTarget::Writer),
                logfile,
            }),
            state: Mutex::new(EmitState::default()),
            errors: AtomicUsize::new(0),
        })
    }
}

impl std::fmt::Debug for InformBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InformBuilder")
            .field("verbose", &self.verbose)
            .field("narrate", &self.narrate)
            .field("quiet", &self.quiet)
            .field("mute", &self.mute)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

fn write_invocation_header(log: &mut dyn Write) -> io::Result<()> {
    let cmdline = env::args().collect::<Vec<_>>().join(" ");
    let stamp = OffsetDateTime::now_utc()
        .format(format_description!(
            "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [year] UTC"
        ))
        .map_err(io::Error::other)?;
    writeln!(log, "Invoked as '{cmdline}' on {stamp}.")
}
