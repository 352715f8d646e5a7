//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Per-document
//! transitions are pure: `(Document, event) -> Document`. `update` applies
//! them to the committed state of one instance and reports what changed.

pub mod caret;
pub mod document;
pub mod editor;
pub mod merge;
pub mod split;

use tracing::{debug, warn};

use crate::commands::Cmd;
use crate::keymap::{KeyCategory, KeyDownEvent};
use crate::messages::{EditorMsg, Msg};
use crate::model::{Document, EditorStates};

#[cfg(debug_assertions)]
use crate::tracing::CaretSnapshot;
#[cfg(debug_assertions)]
use tracing::{span, Level};

pub use caret::{
    insert_new_current_token_after_current_position, replace_current_token_with,
    set_next_token_as_current, set_previous_token_as_current,
};
pub use document::{
    handle_backspace, handle_default_insert, handle_delete, handle_meta_key, handle_whitespace,
    insert_new_line, move_current_row_to_end_of_previous_row, remove_current_row,
    remove_current_token, remove_start_of_row_token, TAB_WIDTH,
};
pub use editor::{click_in_range, handle_movement};
pub use merge::merge_tokens_if_applicable;
pub use split::split_current_token;

/// Apply one key press to a document
pub fn handle_key_down_event(doc: &Document, event: &KeyDownEvent) -> Document {
    let next = match event.category() {
        KeyCategory::Whitespace(key_code) => handle_whitespace(doc, key_code),
        KeyCategory::Movement(_) => handle_movement(doc, event),
        KeyCategory::Meta(_) => handle_meta_key(doc, event),
        KeyCategory::Text(ch) => handle_default_insert(doc, ch),
    };
    settle(doc, next)
}

/// Put the caret on a clicked token (`char_index` absent: last slot)
///
/// # Panics
///
/// Panics if the indices do not address an existing caret slot; check with
/// `click_in_range` first when they come from outside.
pub fn handle_on_click_event(
    doc: &Document,
    row_index: usize,
    token_index: usize,
    char_index: Option<usize>,
) -> Document {
    let next = editor::handle_on_click_event(doc, row_index, token_index, char_index);
    settle(doc, next)
}

/// Keep the input value when nothing visible changed, otherwise stamp a new
/// document version
fn settle(previous: &Document, next: Document) -> Document {
    if next.same_content(previous) {
        previous.clone()
    } else {
        next.with_new_version()
    }
}

/// Main update function - applies a message to the committed states
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(states: &mut EditorStates, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(states, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(states, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(states: &mut EditorStates, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Construct(key) => {
            if states.contains(key) {
                warn!(target: "update", %key, "instance already constructed");
                return None;
            }
            let document = states.commit(Document::new(key, states.options.clone()));
            debug!(target: "update", %key, version = %document.version(), "constructed");
            Some(Cmd::Publish {
                key,
                version: document.version(),
            })
        }
        Msg::Deconstruct(key) => match states.remove(key) {
            Some(_) => {
                debug!(target: "update", %key, "deconstructed");
                Some(Cmd::Release { key })
            }
            None => {
                warn!(target: "update", %key, "deconstruct for unknown instance");
                None
            }
        },
        Msg::Editor { key, msg } => {
            let Some(current) = states.get(key) else {
                warn!(target: "update", %key, ?msg, "message for unknown instance");
                return None;
            };
            let next = match msg {
                EditorMsg::KeyDown(ref event) => handle_key_down_event(current, event),
                EditorMsg::OnClick {
                    row_index,
                    token_index,
                    char_index,
                } => {
                    if !click_in_range(current, row_index, token_index, char_index) {
                        warn!(
                            target: "update",
                            %key, row_index, token_index, ?char_index,
                            "click outside the document ignored"
                        );
                        return None;
                    }
                    handle_on_click_event(current, row_index, token_index, char_index)
                }
            };

            if next.version() == current.version() {
                return None;
            }
            let version = next.version();
            states.commit(next);
            Some(Cmd::Publish { key, version })
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after caret state, logs diffs and checks document
/// invariants after every message.
#[cfg(debug_assertions)]
fn update_traced(states: &mut EditorStates, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let key = msg.target();
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = states.get(key).map(|doc| CaretSnapshot::from_document(doc));
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(states, msg);

    if let Some(doc) = states.get(key) {
        let after = CaretSnapshot::from_document(doc);
        if let Some(diff) = before.as_ref().and_then(|b| b.diff(&after)) {
            debug!(target: "caret", %diff, "state changed");
        }
        doc.assert_invariants_with_context(&msg_name);
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Construct(editor#1)`
/// - `Editor(editor#1)::KeyDown(Ctrl+←)`
/// - `Editor(editor#1)::OnClick(0, 2, Some(1))`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Construct(key) => format!("Construct({})", key),
        Msg::Deconstruct(key) => format!("Deconstruct({})", key),
        Msg::Editor {
            key,
            msg: EditorMsg::KeyDown(event),
        } => format!("Editor({})::KeyDown({})", key, event),
        Msg::Editor {
            key,
            msg:
                EditorMsg::OnClick {
                    row_index,
                    token_index,
                    char_index,
                },
        } => format!(
            "Editor({})::OnClick({}, {}, {:?})",
            key, row_index, token_index, char_index
        ),
    }
}
