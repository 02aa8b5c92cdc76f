//! `{name}` template substitution over explicit scope chains.
//!
//! Templates are expanded against a [`ScopeChain`]: an ordered stack of
//! name/value scopes with the caller's own bindings innermost. When a name is
//! missing at the level where lookup starts, the search continues outward
//! through the enclosing scopes; a name absent at every level is a
//! [`FmtError::KeyNotFound`].
//!
//! # Example
//!
//! ```
//! use inform::{fmt, Scope, ScopeChain};
//!
//! let chain = ScopeChain::new()
//!     .with(Scope::new().bind("outer", "module"))
//!     .with(Scope::new().bind("name", "inner"));
//!
//! assert_eq!(fmt("{name} inside {outer}", &chain).unwrap(), "inner inside module");
//! ```

use std::collections::HashMap;

/// Failure expanding a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FmtError {
    /// A name could not be resolved at any scope level.
    KeyNotFound(String),
    /// A `{` or `}` without a matching partner.
    UnmatchedBrace,
}

impl std::fmt::Display for FmtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FmtError::KeyNotFound(name) => write!(f, "'{name}' not found"),
            FmtError::UnmatchedBrace => write!(f, "unmatched brace in template"),
        }
    }
}

impl std::error::Error for FmtError {}

/// One level of name/value bindings.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    vars: HashMap<String, String>,
}

impl Scope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name, replacing any previous binding at this level.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.vars.insert(name.into(), value.to_string());
        self
    }

    /// Look up a name at this level only.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Ordered stack of scopes, innermost last.
///
/// The last scope plays the role of the caller's own frame; earlier scopes
/// are the enclosing frames, outermost first.
#[derive(Debug, Clone, Default)]
pub struct ScopeChain {
    scopes: Vec<Scope>,
}

impl ScopeChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a scope, making it the new innermost level.
    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, scope: Scope) -> Self {
        self.push(scope);
        self
    }

    /// Number of levels in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// True when the chain holds no scopes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Resolve a name starting `lvl` levels out from the innermost scope.
    ///
    /// `lvl` must be zero or negative: 0 starts at the innermost scope, -1 at
    /// the scope enclosing it, and so on. On a miss the search continues
    /// outward. Returns `None` when the start level falls outside the chain
    /// or the name is absent at every level searched.
    #[must_use]
    pub fn resolve(&self, name: &str, lvl: isize) -> Option<&str> {
        let innermost = isize::try_from(self.scopes.len()).ok()? - 1;
        let start = innermost + lvl;
        if start < 0 || start > innermost {
            return None;
        }
        let start = usize::try_from(start).ok()?;
        self.scopes[..=start]
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }
}

impl From<Scope> for ScopeChain {
    fn from(scope: Scope) -> Self {
        Self::new().with(scope)
    }
}

/// Expand a template against the innermost scope of `chain`.
pub fn fmt(template: &str, chain: &ScopeChain) -> Result<String, FmtError> {
    fmt_at(template, chain, 0)
}

/// Expand a template with lookup starting `lvl` levels out from the
/// innermost scope (see [`ScopeChain::resolve`]).
pub fn fmt_at(template: &str, chain: &ScopeChain, lvl: isize) -> Result<String, FmtError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(FmtError::UnmatchedBrace),
                    }
                }
                match chain.resolve(&name, lvl) {
                    Some(value) => out.push_str(value),
                    None => return Err(FmtError::KeyNotFound(name)),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(FmtError::UnmatchedBrace);
                }
            }
            c => out.push(c),
        }
    }
    Ok(out)
}
