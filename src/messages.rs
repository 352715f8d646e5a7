//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::keymap::KeyDownEvent;
use crate::model::EditorKey;

/// Per-instance input messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMsg {
    /// A key was pressed while the editor had focus
    KeyDown(KeyDownEvent),
    /// A token was clicked; `char_index` is absent for clicks on empty row space
    OnClick {
        row_index: usize,
        token_index: usize,
        char_index: Option<usize>,
    },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Create a fresh document for an instance
    Construct(EditorKey),
    /// Drop an instance's document
    Deconstruct(EditorKey),
    /// Input for one instance
    Editor { key: EditorKey, msg: EditorMsg },
}

impl Msg {
    pub fn key_down(key: EditorKey, event: KeyDownEvent) -> Self {
        Msg::Editor {
            key,
            msg: EditorMsg::KeyDown(event),
        }
    }

    pub fn on_click(
        key: EditorKey,
        row_index: usize,
        token_index: usize,
        char_index: Option<usize>,
    ) -> Self {
        Msg::Editor {
            key,
            msg: EditorMsg::OnClick {
                row_index,
                token_index,
                char_index,
            },
        }
    }

    /// The instance this message is addressed to
    pub fn target(&self) -> EditorKey {
        match self {
            Msg::Construct(key) | Msg::Deconstruct(key) => *key,
            Msg::Editor { key, .. } => *key,
        }
    }
}
