//! Caret movement and click positioning

use tracing::debug;

use crate::keymap::{KeyCode, KeyDownEvent};
use crate::model::{Document, Row};

use super::caret::{
    has_next_token, has_previous_token, relocate, set_caret_offset, set_next_token_as_current,
    set_previous_token_as_current,
};

/// Arrows, Home and End. Shift is accepted and ignored.
pub fn handle_movement(doc: &Document, event: &KeyDownEvent) -> Document {
    let ctrl = event.modifiers.ctrl();
    match event.key_code() {
        KeyCode::Left if ctrl => word_left(doc),
        KeyCode::Right if ctrl => word_right(doc),
        KeyCode::Left => arrow_left(doc),
        KeyCode::Right => arrow_right(doc),
        KeyCode::Up => arrow_up(doc),
        KeyCode::Down => arrow_down(doc),
        KeyCode::Home => home(doc, ctrl),
        KeyCode::End => end(doc, ctrl),
        other => {
            debug!(target: "update", key = %other, "not a movement key");
            doc.clone()
        }
    }
}

pub fn arrow_left(doc: &Document) -> Document {
    match doc.caret_offset() {
        0 => set_previous_token_as_current(doc),
        offset => set_caret_offset(doc, offset - 1),
    }
}

pub fn arrow_right(doc: &Document) -> Document {
    let offset = doc.caret_offset();
    if offset == doc.current_token().last_offset() {
        set_next_token_as_current(doc)
    } else {
        set_caret_offset(doc, offset + 1)
    }
}

/// Step to the previous token, skipping over whitespace runs
pub fn word_left(doc: &Document) -> Document {
    if !has_previous_token(doc) {
        return set_caret_offset(doc, 0);
    }
    let mut doc = set_previous_token_as_current(doc);
    while doc.current_token().kind().is_whitespace() && has_previous_token(&doc) {
        doc = set_previous_token_as_current(&doc);
    }
    doc
}

/// Step to the next token, skipping over whitespace runs, and land on its
/// last slot
pub fn word_right(doc: &Document) -> Document {
    if !has_next_token(doc) {
        return set_caret_offset(doc, doc.current_token().last_offset());
    }
    let mut doc = set_next_token_as_current(doc);
    while doc.current_token().kind().is_whitespace() && has_next_token(&doc) {
        doc = set_next_token_as_current(&doc);
    }
    let last = doc.current_token().last_offset();
    set_caret_offset(&doc, last)
}

/// Caret column within its row, counted in caret slots
fn virtual_column(doc: &Document) -> usize {
    let row = doc.current_row();
    let before: usize = row
        .tokens()
        .take(doc.current_token_index())
        .map(|t| t.len())
        .sum();
    before + doc.caret_offset()
}

/// Token of `row` covering `column` and the column where it starts.
/// Columns past the row's width resolve to the last token.
fn token_at_column(row: &Row, column: usize) -> (usize, usize) {
    let mut start = 0;
    for (index, token) in row.tokens().enumerate() {
        if column < start + token.len() {
            return (index, start);
        }
        start += token.len();
    }
    let last = row.len() - 1;
    (last, start - row.token(last).len())
}

/// Walk to `(row, token)` one token at a time, then apply the column
fn land_on_column(
    mut doc: Document,
    target: (usize, usize),
    start: usize,
    column: usize,
    step: fn(&Document) -> Document,
) -> Document {
    while (doc.current_row_index(), doc.current_token_index()) != target {
        doc = step(&doc);
    }
    let token = doc.current_token();
    let offset = if column < start + token.len() {
        column - start
    } else {
        token.last_offset()
    };
    set_caret_offset(&doc, offset)
}

pub fn arrow_up(doc: &Document) -> Document {
    let row_index = doc.current_row_index();
    if row_index == 0 {
        return doc.clone();
    }
    let column = virtual_column(doc);
    let (token, start) = token_at_column(doc.row(row_index - 1), column);
    land_on_column(
        doc.clone(),
        (row_index - 1, token),
        start,
        column,
        set_previous_token_as_current,
    )
}

pub fn arrow_down(doc: &Document) -> Document {
    let row_index = doc.current_row_index();
    if row_index + 1 >= doc.row_count() {
        return doc.clone();
    }
    let column = virtual_column(doc);
    let (token, start) = token_at_column(doc.row(row_index + 1), column);
    land_on_column(
        doc.clone(),
        (row_index + 1, token),
        start,
        column,
        set_next_token_as_current,
    )
}

/// Start of the current row, or of the document with ctrl
pub fn home(doc: &Document, ctrl: bool) -> Document {
    let row = if ctrl { 0 } else { doc.current_row_index() };
    relocate(doc, row, 0, 0)
}

/// End of the current row, or of the document with ctrl
pub fn end(doc: &Document, ctrl: bool) -> Document {
    let row = if ctrl {
        doc.row_count() - 1
    } else {
        doc.current_row_index()
    };
    let token = doc.row(row).len() - 1;
    let offset = doc.row(row).token(token).last_offset();
    relocate(doc, row, token, offset)
}

/// Put the caret on a clicked token; without a character index the caret goes
/// to the token's last slot.
///
/// # Panics
///
/// Panics if an index is out of range; see `click_in_range`.
pub fn handle_on_click_event(
    doc: &Document,
    row_index: usize,
    token_index: usize,
    char_index: Option<usize>,
) -> Document {
    let token = doc.row(row_index).token(token_index);
    let offset = char_index.unwrap_or_else(|| token.last_offset());
    relocate(doc, row_index, token_index, offset)
}

/// Whether a click refers to an existing row, token and caret slot
pub fn click_in_range(
    doc: &Document,
    row_index: usize,
    token_index: usize,
    char_index: Option<usize>,
) -> bool {
    if row_index >= doc.row_count() {
        return false;
    }
    let row = doc.row(row_index);
    if token_index >= row.len() {
        return false;
    }
    char_index.map_or(true, |c| c < row.token(token_index).len())
}
