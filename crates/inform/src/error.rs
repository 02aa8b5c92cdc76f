//! A reportable error value.
//!
//! [`Error`] packages a message with the culprits it blames and any codicils
//! that should accompany it. It implements `std::error::Error`, so it can
//! travel through `?` chains, and it knows how to report itself through an
//! informer.

use crate::culprit::join_culprit;
use crate::informer::Inform;
use crate::registry::get_informer;

/// An error carrying its own culprits and codicils.
///
/// # Example
///
/// ```
/// use inform::Error;
///
/// let err = Error::new("unknown key")
///     .culprit("config.toml")
///     .codicil("valid keys are listed in the manual");
/// assert_eq!(err.to_string(), "config.toml: unknown key");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Error {
    message: String,
    culprits: Vec<String>,
    codicils: Vec<String>,
}

impl Error {
    /// Create an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            culprits: Vec::new(),
            codicils: Vec::new(),
        }
    }

    /// Blame a culprit; culprits prefix the rendered message in order.
    #[must_use]
    pub fn culprit(mut self, culprit: impl Into<String>) -> Self {
        self.culprits.push(culprit.into());
        self
    }

    /// Attach a codicil emitted after the message when reported.
    #[must_use]
    pub fn codicil(mut self, codicil: impl Into<String>) -> Self {
        self.codicils.push(codicil.into());
        self
    }

    /// The bare message, without culprits.
    #[must_use]
    pub fn get_message(&self) -> &str {
        &self.message
    }

    /// The culprits blamed by this error.
    #[must_use]
    pub fn get_culprit(&self) -> &[String] {
        &self.culprits
    }

    /// The rendered form: `<culprits>: <message>`.
    #[must_use]
    pub fn render(&self) -> String {
        if self.culprits.is_empty() {
            self.message.clone()
        } else {
            format!("{}: {}", join_culprit(&self.culprits), self.message)
        }
    }

    /// Report through the error informant of the given informer, codicils
    /// included.
    pub fn report_to(&self, informer: &Inform) {
        informer.error(self.render());
        for codicil in &self.codicils {
            informer.codicil(codicil.as_str());
        }
    }

    /// Report through the active informer.
    pub fn report(&self) {
        self.report_to(&get_informer());
    }

    /// Report through the active informer, then terminate the process with
    /// status 1.
    pub fn terminate(&self) -> ! {
        let informer = get_informer();
        self.report_to(&informer);
        informer.terminate(Some(1))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for Error {}
