//! Content mutation: insertion, newlines, deletion and row splicing

use tracing::debug;

use crate::keymap::{KeyCode, KeyDownEvent};
use crate::model::{Document, Row, Token, TokenKind};

use super::caret::{
    has_next_token, insert_new_current_token_after_current_position, replace_current_token_with,
    set_previous_token_as_current,
};
use super::editor::arrow_right;
use super::merge::{merge_tokens_if_applicable, normalize_around_caret};
use super::split::split_current_token;

/// Number of space tokens a typed tab expands to
pub const TAB_WIDTH: usize = 4;

/// Insert a typed character at the caret
pub fn handle_default_insert(doc: &Document, ch: char) -> Document {
    let token = if ch.is_whitespace() {
        Token::whitespace(ch)
    } else {
        Token::text(ch.to_string())
    };
    insert_token(doc, token)
}

/// Insert `token` at the caret and merge it with neighboring words
pub fn insert_token(doc: &Document, token: Token) -> Document {
    let current = doc.current_token();
    let inside_word =
        current.kind().is_default() && current.expect_caret() < current.last_offset();

    let inserted = if inside_word {
        split_current_token(doc, Some(token))
    } else {
        insert_new_current_token_after_current_position(doc, token)
    };
    normalize_around_caret(&inserted)
}

/// Space, Tab and Enter
pub fn handle_whitespace(doc: &Document, key_code: KeyCode) -> Document {
    match key_code {
        KeyCode::Space => insert_token(doc, Token::space()),
        KeyCode::Tab => (0..TAB_WIDTH).fold(doc.clone(), |doc, _| insert_token(&doc, Token::space())),
        KeyCode::Enter => insert_new_line(&split_current_token(doc, None)),
        other => {
            debug!(target: "update", key = %other, "not a whitespace key");
            doc.clone()
        }
    }
}

/// Move every token after the caret's token into a new row below, and put the
/// caret on that row's `StartOfRow`
pub fn insert_new_line(doc: &Document) -> Document {
    let row_index = doc.current_row_index();
    let token_index = doc.current_token_index();
    let row = doc.current_row();

    let mut new_row = Row::new().to_builder();
    let mut old_row = row
        .with_token(doc.current_token().with_caret(None))
        .to_builder();
    for index in token_index + 1..row.len() {
        new_row = new_row.add_shared(row.shared_token(index));
        old_row = old_row.remove(row.token(index).key());
    }
    let new_row = new_row.build();
    let new_row = new_row.with_token(new_row.token(0).with_caret(Some(0)));

    doc.to_builder()
        .replace(old_row.build())
        .insert(row_index + 1, new_row)
        .current_row_index_of(row_index + 1)
        .current_token_index_of(0)
        .build()
}

/// Remove the current (non-`StartOfRow`) token; the caret moves to the
/// previous token's last slot
///
/// # Panics
///
/// Panics if the current token is a `StartOfRow`.
pub fn remove_current_token(doc: &Document) -> Document {
    let key = doc.current_token_key();
    assert!(
        !doc.current_token().kind().is_start_of_row(),
        "StartOfRow is removed with its row"
    );

    let moved = set_previous_token_as_current(doc);
    let row = moved.current_row().to_builder().remove(key).build();
    moved.with_row(row)
}

/// Backspace on a `StartOfRow`: drop an empty row, or join the row onto the
/// previous one. No-op on the first row.
pub fn remove_start_of_row_token(doc: &Document) -> Document {
    if doc.current_row_index() == 0 {
        return doc.clone();
    }
    if doc.current_row().len() == 1 {
        remove_current_row(doc)
    } else {
        move_current_row_to_end_of_previous_row(doc)
    }
}

/// Delete the current row; the caret moves to the end of the previous row
///
/// # Panics
///
/// Panics on the first row.
pub fn remove_current_row(doc: &Document) -> Document {
    assert!(doc.current_row_index() > 0, "cannot remove the first row");
    let key = doc.current_row_key();
    set_previous_token_as_current(doc)
        .to_builder()
        .remove(key)
        .build()
}

/// Append the current row's tokens (without its `StartOfRow`) to the previous
/// row and delete the current row. The caret moves to the end of the previous
/// row's original content.
///
/// # Panics
///
/// Panics on the first row.
pub fn move_current_row_to_end_of_previous_row(doc: &Document) -> Document {
    let row_index = doc.current_row_index();
    assert!(row_index > 0, "cannot join the first row upward");
    let row = doc.current_row();
    let row_key = row.key();

    let moved = set_previous_token_as_current(doc);
    let mut previous = moved.current_row().to_builder();
    for index in 1..row.len() {
        previous = previous.add_shared(row.shared_token(index));
    }

    moved
        .to_builder()
        .replace(previous.build())
        .remove(row_key)
        .build()
}

/// Delete the character before the caret
pub fn handle_backspace(doc: &Document) -> Document {
    let current = doc.current_token();
    match current.kind() {
        TokenKind::StartOfRow => merge_tokens_if_applicable(&remove_start_of_row_token(doc)),
        _ if current.len() == 1 => merge_tokens_if_applicable(&remove_current_token(doc)),
        _ => {
            let offset = current.expect_caret();
            let text = current.text_without_char(offset);
            if offset == 0 {
                let shortened = replace_current_token_with(doc, current.with_text(text, Some(0)));
                set_previous_token_as_current(&shortened)
            } else {
                replace_current_token_with(doc, current.with_text(text, Some(offset - 1)))
            }
        }
    }
}

/// Delete the character after the caret
pub fn handle_delete(doc: &Document) -> Document {
    let at_last_slot = doc.caret_offset() == doc.current_token().last_offset();
    if at_last_slot && !has_next_token(doc) {
        return doc.clone();
    }
    handle_backspace(&arrow_right(doc))
}

/// Keys that produce no text
pub fn handle_meta_key(doc: &Document, event: &KeyDownEvent) -> Document {
    match event.key_code() {
        KeyCode::Backspace => handle_backspace(doc),
        KeyCode::Delete => handle_delete(doc),
        _ => doc.clone(),
    }
}
