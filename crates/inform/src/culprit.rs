//! The culprit stack: blame labels prefixed to messages.
//!
//! Culprits live on the informer and are managed in matched pairs through
//! RAII guards: [`add_culprit`] pushes a label for the lifetime of the
//! returned guard, [`set_culprit`] replaces the whole stack for that
//! lifetime. While the stack is non-empty, every emitted message is prefixed
//! with the joined labels.
//!
//! # Example
//!
//! ```
//! use inform::{add_culprit, get_culprit, join_culprit};
//!
//! let _outer = add_culprit("config.toml");
//! {
//!     let _inner = add_culprit("line 12");
//!     assert_eq!(join_culprit(&get_culprit()), "config.toml, line 12");
//! }
//! assert_eq!(join_culprit(&get_culprit()), "config.toml");
//! ```

use std::sync::Arc;

use crate::informer::Inform;
use crate::registry::get_informer;

/// Separator joining culprit labels.
const CULPRIT_SEP: &str = ", ";

/// Scoped handle restoring the culprit stack when dropped.
#[derive(Debug)]
pub struct CulpritGuard {
    informer: Arc<Inform>,
    saved: Option<Vec<String>>,
}

impl CulpritGuard {
    fn push(informer: Arc<Inform>, label: String) -> Self {
        let saved = informer.get_culprit();
        informer.push_culprit_label(label);
        Self {
            informer,
            saved: Some(saved),
        }
    }

    fn replace(informer: Arc<Inform>, label: String) -> Self {
        let saved = informer.swap_culprits(vec![label]);
        Self {
            informer,
            saved: Some(saved),
        }
    }
}

impl Drop for CulpritGuard {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.informer.swap_culprits(saved);
        }
    }
}

/// Replace the active informer's culprit stack with a single label for the
/// lifetime of the returned guard.
#[must_use]
pub fn set_culprit(label: impl Into<String>) -> CulpritGuard {
    CulpritGuard::replace(get_informer(), label.into())
}

/// Push a label onto the active informer's culprit stack for the lifetime
/// of the returned guard. Nests.
#[must_use]
pub fn add_culprit(label: impl Into<String>) -> CulpritGuard {
    CulpritGuard::push(get_informer(), label.into())
}

/// Snapshot of the active informer's culprit stack.
#[must_use]
pub fn get_culprit() -> Vec<String> {
    get_informer().get_culprit()
}

/// Render culprit labels as a message prefix.
#[must_use]
pub fn join_culprit<S: AsRef<str>>(culprits: &[S]) -> String {
    culprits
        .iter()
        .map(|c| c.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(CULPRIT_SEP)
}
