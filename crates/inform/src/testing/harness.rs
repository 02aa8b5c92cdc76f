//! Scripted stimulus/expected-output cases.
//!
//! A [`Case`] names a stimulus (a function run against a freshly built,
//! fully captured informer) and the text expected on each stream. The
//! [`Runner`] executes the table, scrubs the volatile invocation header from
//! the captured logfile, and reports one [`Failure`] per mismatched stream.

use std::sync::LazyLock;

use regex::Regex;

use crate::informer::{Inform, InformBuilder};
use crate::testing::CaptureBuffer;

/// Program name given to every case's informer.
const PROG_NAME: &str = "inform";

static INVOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Invoked as '[^\n]*' on [^\n]*\.")
        .unwrap_or_else(|err| unreachable!("invocation pattern is valid: {err}"))
});

/// Replace the volatile logfile header with a stable placeholder.
#[must_use]
pub fn scrub_invocation(text: &str) -> String {
    INVOCATION
        .replace_all(text, "Invoked as <exe> on <date>.")
        .into_owned()
}

/// One named scenario.
pub struct Case {
    name: &'static str,
    given: &'static str,
    configure: fn(InformBuilder) -> InformBuilder,
    stimulus: fn(&Inform),
    expected_stdout: &'static str,
    expected_stderr: &'static str,
    expected_logfile: &'static str,
    logfile_enabled: bool,
}

impl Case {
    /// Create a case with empty expectations and a captured logfile.
    #[must_use]
    pub fn new(name: &'static str, stimulus: fn(&Inform)) -> Self {
        Self {
            name,
            given: "",
            configure: |builder| builder,
            stimulus,
            expected_stdout: "",
            expected_stderr: "",
            expected_logfile: "",
            logfile_enabled: true,
        }
    }

    /// Describe the stimulus, usually as the emitting calls themselves;
    /// shown in failure reports.
    #[must_use]
    pub fn given(mut self, given: &'static str) -> Self {
        self.given = given;
        self
    }

    /// Adjust the informer configuration before the stimulus runs.
    #[must_use]
    pub fn configure(mut self, configure: fn(InformBuilder) -> InformBuilder) -> Self {
        self.configure = configure;
        self
    }

    /// Expected stdout (compared after trimming).
    #[must_use]
    pub fn expect_stdout(mut self, expected: &'static str) -> Self {
        self.expected_stdout = expected;
        self
    }

    /// Expected stderr (compared after trimming).
    #[must_use]
    pub fn expect_stderr(mut self, expected: &'static str) -> Self {
        self.expected_stderr = expected;
        self
    }

    /// Expected logfile content, with the invocation header scrubbed to
    /// `Invoked as <exe> on <date>.`.
    #[must_use]
    pub fn expect_logfile(mut self, expected: &'static str) -> Self {
        self.expected_logfile = expected;
        self
    }

    /// Run without a logfile; the logfile expectation must stay empty.
    #[must_use]
    pub fn without_logfile(mut self) -> Self {
        self.logfile_enabled = false;
        self
    }

    fn run(&self) -> Vec<Failure> {
        let stdout = CaptureBuffer::new();
        let stderr = CaptureBuffer::new();
        let logfile = CaptureBuffer::new();

        let mut builder = Inform::builder()
            .prog_name(PROG_NAME)
            .colors(false)
            .stdout(stdout.clone())
            .stderr(stderr.clone());
        if self.logfile_enabled {
            builder = builder.logfile_writer(logfile.clone());
        }
        let builder = (self.configure)(builder);
        let informer = match builder.build() {
            Ok(informer) => informer,
            Err(err) => {
                return vec![Failure {
                    case: self.name,
                    given: self.given,
                    kind: FailureKind::Build,
                    actual: err.to_string(),
                    expected: String::new(),
                }];
            }
        };

        (self.stimulus)(&informer);

        let mut failures = Vec::new();
        let streams = [
            (FailureKind::Stderr, stderr.contents(), self.expected_stderr),
            (FailureKind::Stdout, stdout.contents(), self.expected_stdout),
            (
                FailureKind::Logfile,
                scrub_invocation(&logfile.contents()),
                self.expected_logfile,
            ),
        ];
        for (kind, actual, expected) in streams {
            let actual = actual.trim().to_string();
            let expected = expected.trim().to_string();
            if actual != expected {
                failures.push(Failure {
                    case: self.name,
                    given: self.given,
                    kind,
                    actual,
                    expected,
                });
            }
        }
        failures
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case").field("name", &self.name).finish()
    }
}

/// Which comparison went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The informer could not be built.
    Build,
    /// stdout differed.
    Stdout,
    /// stderr differed.
    Stderr,
    /// The logfile differed.
    Logfile,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Build => write!(f, "build failure"),
            FailureKind::Stdout => write!(f, "stdout result"),
            FailureKind::Stderr => write!(f, "stderr result"),
            FailureKind::Logfile => write!(f, "logfile result"),
        }
    }
}

/// One mismatched stream of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Case name.
    pub case: &'static str,
    /// The stimulus description the case was created with.
    pub given: &'static str,
    /// Which stream differed.
    pub kind: FailureKind,
    /// What the stream actually held (trimmed, scrubbed).
    pub actual: String,
    /// What was expected (trimmed).
    pub expected: String,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Unexpected {} ({}):", self.kind, self.case)?;
        if !self.given.is_empty() {
            writeln!(f, "    Given   : {}", reflow(self.given))?;
        }
        writeln!(f, "    Result  : {}", reflow(&self.actual))?;
        writeln!(f, "    Expected: {}", reflow(&self.expected))?;
        write!(f, "{}", diff(&self.actual, &self.expected))
    }
}

/// Indent multi-line values so they read under their label.
fn reflow(text: &str) -> String {
    if text.contains('\n') {
        format!("\n{}", crate::format::indent(text, "        "))
    } else {
        text.to_string()
    }
}

/// Line diff: `-` expected-only, `+` actual-only.
fn diff(actual: &str, expected: &str) -> String {
    let actual: Vec<&str> = actual.lines().collect();
    let expected: Vec<&str> = expected.lines().collect();
    let mut out = String::new();
    for i in 0..actual.len().max(expected.len()) {
        match (actual.get(i), expected.get(i)) {
            (Some(a), Some(e)) if a == e => {
                out.push_str(&format!("      {a}\n"));
            }
            (a, e) => {
                if let Some(e) = e {
                    out.push_str(&format!("    - {e}\n"));
                }
                if let Some(a) = a {
                    out.push_str(&format!("    + {a}\n"));
                }
            }
        }
    }
    out
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct Report {
    /// Number of cases executed.
    pub run: usize,
    /// Every mismatch found.
    pub failures: Vec<Failure>,
}

impl Report {
    /// True when every case matched on every stream.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary in pass/fail form.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {} tests run, {} failures detected.",
            if self.passed() { "PASS" } else { "FAIL" },
            self.run,
            self.failures.len()
        )
    }

    /// Panic with a full failure listing unless everything passed.
    ///
    /// # Panics
    ///
    /// Panics when any case failed.
    pub fn assert_passed(&self) {
        assert!(
            self.passed(),
            "{}\n{}",
            self.summary(),
            self.failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Executes a table of cases.
#[derive(Debug, Default)]
pub struct Runner {
    cases: Vec<Case>,
}

impl Runner {
    /// Create an empty runner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a case.
    ///
    /// # Panics
    ///
    /// Panics when a case with the same name was already added.
    #[must_use]
    pub fn case(mut self, case: Case) -> Self {
        assert!(
            self.cases.iter().all(|c| c.name != case.name),
            "duplicate case name: {}",
            case.name
        );
        self.cases.push(case);
        self
    }

    /// Run every case and collect the failures.
    #[must_use]
    pub fn run(&self) -> Report {
        let mut failures = Vec::new();
        for case in &self.cases {
            failures.extend(case.run());
        }
        Report {
            run: self.cases.len(),
            failures,
        }
    }
}
