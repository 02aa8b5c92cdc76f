//! Message assembly.
//!
//! Informants accept anything convertible into a [`Message`]: a plain string
//! for the common case, or an explicit builder when the separator or the
//! terminator needs to change.

/// A message awaiting emission.
///
/// Parts are joined with the separator (a single space by default) and the
/// terminator (a newline by default) is appended when the message is written.
///
/// # Example
///
/// ```
/// use inform::Message;
///
/// let msg = Message::from_parts(["This", "is", "a", "test"])
///     .sep("_")
///     .end(".");
/// assert_eq!(msg.body(), "This_is_a_test");
/// assert_eq!(msg.terminator(), ".");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    parts: Vec<String>,
    sep: String,
    end: String,
}

impl Message {
    /// Create a single-part message.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            parts: vec![text.into()],
            sep: " ".to_string(),
            end: "\n".to_string(),
        }
    }

    /// Create a message from several parts.
    #[must_use]
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
            sep: " ".to_string(),
            end: "\n".to_string(),
        }
    }

    /// Set the separator joining the parts.
    #[must_use]
    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    /// Set the terminator appended when the message is written.
    #[must_use]
    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }

    /// The rendered body: parts joined by the separator, no terminator.
    #[must_use]
    pub fn body(&self) -> String {
        self.parts.join(&self.sep)
    }

    /// The terminator.
    #[must_use]
    pub fn terminator(&self) -> &str {
        &self.end
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Self::new(text.clone())
    }
}
