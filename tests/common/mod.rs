//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use plaintext_editor::keymap::{KeyCode, KeyDownEvent, Modifiers};
use plaintext_editor::model::{Document, EditorKey, EditorOptions};
use plaintext_editor::{handle_key_down_event, handle_on_click_event};

/// A fresh document: one row, caret on its StartOfRow
pub fn new_doc() -> Document {
    Document::new(EditorKey::new(), EditorOptions::default())
}

/// Type text key by key (`' '` → Space, `'\n'` → Enter, `'\t'` → Tab)
pub fn type_text(doc: &Document, text: &str) -> Document {
    text.chars().fold(doc.clone(), |doc, ch| {
        let next = handle_key_down_event(&doc, &KeyDownEvent::char(ch));
        assert_consistent(&next);
        next
    })
}

/// A fresh document with `text` typed into it
pub fn doc_with(text: &str) -> Document {
    type_text(&new_doc(), text)
}

/// Press a key without modifiers
pub fn press(doc: &Document, key: KeyCode) -> Document {
    press_with(doc, key, Modifiers::NONE)
}

/// Press a key with modifiers
pub fn press_with(doc: &Document, key: KeyCode, modifiers: Modifiers) -> Document {
    let next = handle_key_down_event(doc, &KeyDownEvent::from_key_code(key, modifiers));
    assert_consistent(&next);
    next
}

/// Press a key `n` times
pub fn press_n(doc: &Document, key: KeyCode, n: usize) -> Document {
    (0..n).fold(doc.clone(), |doc, _| press(&doc, key))
}

/// Click a token
pub fn click(doc: &Document, row: usize, token: usize, char_index: Option<usize>) -> Document {
    let next = handle_on_click_event(doc, row, token, char_index);
    assert_consistent(&next);
    next
}

/// Visible text of every row
pub fn row_texts(doc: &Document) -> Vec<String> {
    doc.rows().map(|row| row.text()).collect()
}

/// Token texts of one row, StartOfRow excluded
pub fn token_texts(doc: &Document, row: usize) -> Vec<String> {
    doc.row(row)
        .tokens()
        .skip(1)
        .map(|t| t.plain_text().to_string())
        .collect()
}

/// (row index, token index, caret offset)
pub fn caret(doc: &Document) -> (usize, usize, usize) {
    (
        doc.current_row_index(),
        doc.current_token_index(),
        doc.caret_offset(),
    )
}

/// Text of the token holding the caret
pub fn caret_token_text(doc: &Document) -> String {
    doc.current_token().plain_text().to_string()
}

/// Assert every document invariant holds
pub fn assert_consistent(doc: &Document) {
    let violations = doc.invariant_violations();
    assert!(
        violations.is_empty(),
        "document invariants violated:\n  {}\nrows: {:?}",
        violations.join("\n  "),
        row_texts(doc)
    );
}
