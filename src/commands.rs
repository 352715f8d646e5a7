//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The registry executes them: it notifies readers, it does not change state.
//! `update` returns `None` when there is nothing to do.

use crate::model::{EditorKey, Version};

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// A new document version was committed for `key`
    Publish { key: EditorKey, version: Version },
    /// The instance `key` no longer exists
    Release { key: EditorKey },
}

impl Cmd {
    /// The instance this command concerns
    pub fn key(&self) -> EditorKey {
        match self {
            Cmd::Publish { key, .. } | Cmd::Release { key } => *key,
        }
    }

    /// Check if this command tells readers about a new version
    pub fn publishes(&self) -> bool {
        matches!(self, Cmd::Publish { .. })
    }
}
