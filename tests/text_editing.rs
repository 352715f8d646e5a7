//! Text editing tests - insertion, whitespace, deletion within a row

mod common;

use common::{
    assert_consistent, caret, caret_token_text, click, doc_with, new_doc, press, press_with,
    token_texts, type_text,
};
use plaintext_editor::handle_key_down_event;
use plaintext_editor::keymap::{KeyCode, KeyDownEvent, Modifiers};
use plaintext_editor::model::{TokenKind, WhitespaceKind};

// ========================================================================
// Insertion
// ========================================================================

#[test]
fn test_type_two_chars_makes_one_word() {
    let doc = doc_with("ab");
    assert_eq!(doc.row_count(), 1);
    assert_eq!(token_texts(&doc, 0), vec!["ab"]);
    assert_eq!(doc.current_token().kind(), TokenKind::Default);
    assert_eq!(caret(&doc), (0, 1, 1));
}

#[test]
fn test_type_words_and_spaces() {
    let doc = doc_with("hello big world");
    assert_eq!(
        token_texts(&doc, 0),
        vec!["hello", " ", "big", " ", "world"]
    );
    assert_eq!(caret(&doc), (0, 5, 4));
}

#[test]
fn test_insert_in_middle_of_word() {
    let doc = doc_with("abc");
    let doc = click(&doc, 0, 1, Some(0));
    let doc = type_text(&doc, "x");
    assert_eq!(token_texts(&doc, 0), vec!["axbc"]);
    assert_eq!(caret(&doc), (0, 1, 1));
}

#[test]
fn test_insert_at_row_start_joins_following_word() {
    let doc = doc_with("bc");
    let doc = press(&doc, KeyCode::Home);
    let doc = type_text(&doc, "a");
    assert_eq!(token_texts(&doc, 0), vec!["abc"]);
    assert_eq!(caret(&doc), (0, 1, 0));
}

#[test]
fn test_insert_after_space_joins_following_word() {
    let doc = doc_with("a bc");
    let doc = click(&doc, 0, 2, None);
    let doc = type_text(&doc, "x");
    assert_eq!(token_texts(&doc, 0), vec!["a", " ", "xbc"]);
    assert_eq!(caret(&doc), (0, 3, 0));
}

#[test]
fn test_space_splits_word() {
    let doc = doc_with("abcd");
    let doc = click(&doc, 0, 1, Some(1));
    let doc = type_text(&doc, " ");
    assert_eq!(token_texts(&doc, 0), vec!["ab", " ", "cd"]);
    assert_eq!(caret(&doc), (0, 2, 0));
    assert_eq!(
        doc.current_token().kind(),
        TokenKind::Whitespace(WhitespaceKind::Space)
    );
}

#[test]
fn test_tab_expands_to_four_spaces() {
    let doc = doc_with("a\tb");
    assert_eq!(token_texts(&doc, 0), vec!["a", " ", " ", " ", " ", "b"]);
    assert!(doc
        .current_row()
        .tokens()
        .all(|t| t.kind() != TokenKind::Whitespace(WhitespaceKind::Tab)));
}

#[test]
fn test_tab_inside_word() {
    let doc = doc_with("ab");
    let doc = click(&doc, 0, 1, Some(0));
    let doc = press(&doc, KeyCode::Tab);
    assert_eq!(token_texts(&doc, 0), vec!["a", " ", " ", " ", " ", "b"]);
    assert_eq!(caret(&doc), (0, 5, 0));
}

#[test]
fn test_uppercase_with_shift_is_text() {
    let doc = new_doc();
    let doc = handle_key_down_event(&doc, &KeyDownEvent::new("A", "KeyA", Modifiers::SHIFT));
    assert_consistent(&doc);
    assert_eq!(token_texts(&doc, 0), vec!["A"]);
}

#[test]
fn test_unicode_text() {
    let doc = doc_with("héllo wörld");
    assert_eq!(token_texts(&doc, 0), vec!["héllo", " ", "wörld"]);
    let doc = click(&doc, 0, 1, Some(1));
    let doc = type_text(&doc, "ß");
    assert_eq!(token_texts(&doc, 0)[0], "héßllo");
    assert_eq!(caret(&doc), (0, 1, 2));
}

#[test]
fn test_other_whitespace_becomes_whitespace_token() {
    let doc = doc_with("a\u{00a0}b");
    assert_eq!(token_texts(&doc, 0), vec!["a", "\u{00a0}", "b"]);
    assert_eq!(
        doc.row(0).token(2).kind(),
        TokenKind::Whitespace(WhitespaceKind::Other)
    );
}

// ========================================================================
// Meta keys
// ========================================================================

#[test]
fn test_ctrl_char_inserts_nothing() {
    let doc = doc_with("ab");
    let next = press_with(&doc, KeyCode::Char('s'), Modifiers::CTRL);
    assert_eq!(next.version(), doc.version());
    let next = press_with(&doc, KeyCode::Char('z'), Modifiers::META);
    assert_eq!(next.version(), doc.version());
}

#[test]
fn test_escape_and_function_keys_are_noops() {
    let doc = doc_with("ab");
    assert_eq!(press(&doc, KeyCode::Escape).version(), doc.version());
    assert_eq!(press(&doc, KeyCode::F(5)).version(), doc.version());
    assert_eq!(press(&doc, KeyCode::PageDown).version(), doc.version());
}

// ========================================================================
// Backspace
// ========================================================================

#[test]
fn test_backspace_on_empty_document_is_noop() {
    let doc = new_doc();
    let next = press(&doc, KeyCode::Backspace);
    assert_eq!(next.version(), doc.version());
    assert_eq!(caret(&next), (0, 0, 0));
    assert_eq!(next.row_count(), 1);
}

#[test]
fn test_backspace_at_start_of_first_row_is_noop() {
    let doc = doc_with("abc");
    let doc = press(&doc, KeyCode::Home);
    let next = press(&doc, KeyCode::Backspace);
    assert_eq!(next.version(), doc.version());
}

#[test]
fn test_backspace_deletes_last_char() {
    let doc = doc_with("abc");
    let doc = press(&doc, KeyCode::Backspace);
    assert_eq!(token_texts(&doc, 0), vec!["ab"]);
    assert_eq!(caret(&doc), (0, 1, 1));
}

#[test]
fn test_backspace_whole_word() {
    let doc = doc_with("ab");
    let doc = press(&doc, KeyCode::Backspace);
    let doc = press(&doc, KeyCode::Backspace);
    assert!(token_texts(&doc, 0).is_empty());
    assert_eq!(caret(&doc), (0, 0, 0));
}

#[test]
fn test_backspace_space_merges_words() {
    let doc = doc_with("z Bill");
    let doc = click(&doc, 0, 2, None);
    let doc = press(&doc, KeyCode::Backspace);
    assert_eq!(token_texts(&doc, 0), vec!["zBill"]);
    assert_eq!(caret(&doc), (0, 1, 0));
    assert_eq!(caret_token_text(&doc), "zBill");
}

#[test]
fn test_backspace_first_char_of_word() {
    let doc = doc_with("x ab");
    let doc = click(&doc, 0, 3, Some(0));
    let doc = press(&doc, KeyCode::Backspace);
    assert_eq!(token_texts(&doc, 0), vec!["x", " ", "b"]);
    assert_eq!(caret(&doc), (0, 2, 0));
}

// ========================================================================
// Delete
// ========================================================================

#[test]
fn test_delete_forward_in_word() {
    let doc = doc_with("abc");
    let doc = click(&doc, 0, 1, Some(0));
    let doc = press(&doc, KeyCode::Delete);
    assert_eq!(token_texts(&doc, 0), vec!["ac"]);
    assert_eq!(caret(&doc), (0, 1, 0));
}

#[test]
fn test_delete_from_row_start() {
    let doc = doc_with("abc");
    let doc = press(&doc, KeyCode::Home);
    let doc = press(&doc, KeyCode::Delete);
    assert_eq!(token_texts(&doc, 0), vec!["bc"]);
    assert_eq!(caret(&doc), (0, 0, 0));
}

#[test]
fn test_delete_at_document_end_is_noop() {
    let doc = doc_with("abc");
    let next = press(&doc, KeyCode::Delete);
    assert_eq!(next.version(), doc.version());
}

// ========================================================================
// Insert then delete restores the row
// ========================================================================

#[test]
fn test_insert_then_backspace_restores_every_position() {
    let mut doc = doc_with("ab cd\n ef");
    doc = press_with(&doc, KeyCode::Home, Modifiers::CTRL);

    loop {
        let typed = type_text(&doc, "z");
        let restored = press(&typed, KeyCode::Backspace);
        for row in 0..doc.row_count() {
            assert_eq!(token_texts(&restored, row), token_texts(&doc, row));
        }
        assert_eq!(caret(&restored), caret(&doc), "at {:?}", caret(&doc));

        let next = press(&doc, KeyCode::Right);
        if next.version() == doc.version() {
            break;
        }
        doc = next;
    }
}
