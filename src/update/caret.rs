//! Caret relocation primitives shared by every transition
//!
//! All functions take the current document and return a new one. The caret
//! always lives on exactly one token; relocating clears the old token's offset
//! before setting the new one.

use crate::model::{Document, Token};

/// Position of the token before `(row, token)`, wrapping to the previous row
pub(crate) fn previous_location(doc: &Document, row: usize, token: usize) -> Option<(usize, usize)> {
    if token > 0 {
        Some((row, token - 1))
    } else if row > 0 {
        Some((row - 1, doc.row(row - 1).len() - 1))
    } else {
        None
    }
}

/// Position of the token after `(row, token)`, wrapping to the next row
pub(crate) fn next_location(doc: &Document, row: usize, token: usize) -> Option<(usize, usize)> {
    if token + 1 < doc.row(row).len() {
        Some((row, token + 1))
    } else if row + 1 < doc.row_count() {
        Some((row + 1, 0))
    } else {
        None
    }
}

pub(crate) fn has_previous_token(doc: &Document) -> bool {
    previous_location(doc, doc.current_row_index(), doc.current_token_index()).is_some()
}

pub(crate) fn has_next_token(doc: &Document) -> bool {
    next_location(doc, doc.current_row_index(), doc.current_token_index()).is_some()
}

/// Replace the current token with a key-preserving copy.
///
/// # Panics
///
/// Panics if `token` does not carry the current token's key.
pub fn replace_current_token_with(doc: &Document, token: Token) -> Document {
    assert_eq!(
        token.key(),
        doc.current_token_key(),
        "replacement must keep the current token's key"
    );
    doc.with_row(doc.current_row().with_token(token))
}

/// Move the caret inside the current token
pub(crate) fn set_caret_offset(doc: &Document, offset: usize) -> Document {
    replace_current_token_with(doc, doc.current_token().with_caret(Some(offset)))
}

/// Clear the old caret and put it on `(row, token)` at `offset`
pub(crate) fn relocate(doc: &Document, row: usize, token: usize, offset: usize) -> Document {
    if (row, token) == (doc.current_row_index(), doc.current_token_index()) {
        return set_caret_offset(doc, offset);
    }

    let cleared = replace_current_token_with(doc, doc.current_token().with_caret(None));
    let target_row = cleared.row(row);
    let target = target_row.token(token).with_caret(Some(offset));
    cleared
        .with_row(target_row.with_token(target))
        .with_caret_position(row, token)
}

/// Step the caret to the previous token's last slot.
///
/// Without a previous token the caret snaps to slot 0 of the current one.
pub fn set_previous_token_as_current(doc: &Document) -> Document {
    match previous_location(doc, doc.current_row_index(), doc.current_token_index()) {
        Some((row, token)) => {
            let offset = doc.row(row).token(token).last_offset();
            relocate(doc, row, token, offset)
        }
        None => set_caret_offset(doc, 0),
    }
}

/// Step the caret to the next token's first slot.
///
/// Without a next token the caret snaps to the last slot of the current one.
pub fn set_next_token_as_current(doc: &Document) -> Document {
    match next_location(doc, doc.current_row_index(), doc.current_token_index()) {
        Some((row, token)) => relocate(doc, row, token, 0),
        None => set_caret_offset(doc, doc.current_token().last_offset()),
    }
}

/// Insert `token` right after the current token and move the caret to its last slot
pub fn insert_new_current_token_after_current_position(doc: &Document, token: Token) -> Document {
    let row_index = doc.current_row_index();
    let index = doc.current_token_index() + 1;
    let offset = token.last_offset();

    let row = doc.current_row();
    let row = row
        .with_token(doc.current_token().with_caret(None))
        .to_builder()
        .insert(index, token.with_caret(Some(offset)))
        .build();

    doc.with_row(row).with_caret_position(row_index, index)
}
