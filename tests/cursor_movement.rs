//! Cursor movement tests - arrows, word jumps, vertical movement, Home/End

mod common;

use common::{caret, caret_token_text, click, doc_with, new_doc, press, press_n, press_with};
use plaintext_editor::keymap::{KeyCode, Modifiers};

// ========================================================================
// Character movement
// ========================================================================

#[test]
fn test_left_inside_word() {
    let doc = doc_with("abc");
    let doc = press(&doc, KeyCode::Left);
    assert_eq!(caret(&doc), (0, 1, 1));
}

#[test]
fn test_left_from_first_char_goes_to_row_start() {
    let doc = doc_with("abc");
    let doc = press_n(&doc, KeyCode::Left, 3);
    assert_eq!(caret(&doc), (0, 0, 0));
}

#[test]
fn test_left_at_document_start_is_noop() {
    let doc = new_doc();
    let next = press(&doc, KeyCode::Left);
    assert_eq!(next.version(), doc.version());
}

#[test]
fn test_right_at_document_end_is_noop() {
    let doc = doc_with("ab\ncd");
    let next = press(&doc, KeyCode::Right);
    assert_eq!(next.version(), doc.version());
    assert_eq!(caret(&next), (1, 1, 1));
}

#[test]
fn test_left_wraps_to_previous_row_end() {
    let doc = doc_with("ab\ncd");
    let doc = press(&doc, KeyCode::Home);
    let doc = press(&doc, KeyCode::Left);
    assert_eq!(caret(&doc), (0, 1, 1));
}

#[test]
fn test_right_wraps_to_next_row_start() {
    let doc = doc_with("ab\ncd");
    let doc = click(&doc, 0, 1, None);
    let doc = press(&doc, KeyCode::Right);
    assert_eq!(caret(&doc), (1, 0, 0));
}

#[test]
fn test_shift_is_ignored_for_movement() {
    let doc = doc_with("abc");
    let plain = press(&doc, KeyCode::Left);
    let shifted = press_with(&doc, KeyCode::Left, Modifiers::SHIFT);
    assert_eq!(caret(&plain), caret(&shifted));
}

#[test]
fn test_right_then_left_round_trips_everywhere() {
    let mut doc = doc_with("one  two\n\tx\n\nlast word");
    doc = press_with(&doc, KeyCode::Home, Modifiers::CTRL);

    loop {
        let right = press(&doc, KeyCode::Right);
        if right.version() == doc.version() {
            break;
        }
        let back = press(&right, KeyCode::Left);
        assert_eq!(caret(&back), caret(&doc));
        doc = right;
    }
    assert_eq!(doc.current_row_index(), 3);
}

// ========================================================================
// Word jumps
// ========================================================================

#[test]
fn test_ctrl_left_skips_space_run() {
    let doc = doc_with("a b");
    let doc = press_with(&doc, KeyCode::Left, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 1, 0));
    assert_eq!(caret_token_text(&doc), "a");
}

#[test]
fn test_ctrl_left_from_whitespace_skips_rest_of_run() {
    let doc = doc_with("a  b");
    let from_second_space = click(&doc, 0, 3, None);
    let doc = press_with(&from_second_space, KeyCode::Left, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 1, 0));
    assert_eq!(caret_token_text(&doc), "a");

    let from_first_space = click(&from_second_space, 0, 2, None);
    let doc = press_with(&from_first_space, KeyCode::Left, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 1, 0));
}

#[test]
fn test_ctrl_left_repeated() {
    let doc = doc_with("ab  cd ef");
    let doc = press_with(&doc, KeyCode::Left, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 4, 1));
    let doc = press_with(&doc, KeyCode::Left, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 1, 1));
    let doc = press_with(&doc, KeyCode::Left, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 0, 0));
    let next = press_with(&doc, KeyCode::Left, Modifiers::CTRL);
    assert_eq!(next.version(), doc.version());
}

#[test]
fn test_ctrl_right_lands_on_word_end() {
    let doc = doc_with("ab  cd ef");
    let doc = press_with(&doc, KeyCode::Home, Modifiers::CTRL);
    let doc = press_with(&doc, KeyCode::Right, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 1, 1));
    let doc = press_with(&doc, KeyCode::Right, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 4, 1));
    let doc = press_with(&doc, KeyCode::Right, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 6, 1));
    let next = press_with(&doc, KeyCode::Right, Modifiers::CTRL);
    assert_eq!(next.version(), doc.version());
}

#[test]
fn test_ctrl_right_from_inside_word_at_end_snaps() {
    let doc = doc_with("abc");
    let doc = click(&doc, 0, 1, Some(0));
    let doc = press_with(&doc, KeyCode::Right, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 1, 2));
}

#[test]
fn test_word_jump_crosses_rows() {
    let doc = doc_with("ab\ncd");
    let doc = press(&doc, KeyCode::Home);
    let doc = press_with(&doc, KeyCode::Left, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 1, 1));
    let doc = press_with(&doc, KeyCode::Right, Modifiers::CTRL);
    assert_eq!(caret(&doc), (1, 0, 0));
}

// ========================================================================
// Vertical movement
// ========================================================================

#[test]
fn test_down_clamps_to_shorter_row() {
    let doc = doc_with("abc\nde");
    let doc = click(&doc, 0, 1, Some(2));
    let doc = press(&doc, KeyCode::Down);
    assert_eq!(caret(&doc), (1, 1, 1));
    assert_eq!(caret_token_text(&doc), "de");
}

#[test]
fn test_down_keeps_column() {
    let doc = doc_with("abcdef\nxyz");
    let doc = click(&doc, 0, 1, Some(1));
    let doc = press(&doc, KeyCode::Down);
    assert_eq!(caret(&doc), (1, 1, 1));
}

#[test]
fn test_up_across_tokens() {
    let doc = doc_with("ab cd\nwxyz");
    let doc = click(&doc, 1, 1, Some(3));
    let doc = press(&doc, KeyCode::Up);
    // column 4 falls on "cd" (columns 4..6)
    assert_eq!(caret(&doc), (0, 3, 0));
}

#[test]
fn test_up_from_row_start() {
    let doc = doc_with("abc\nde");
    let doc = press(&doc, KeyCode::Home);
    let doc = press(&doc, KeyCode::Up);
    assert_eq!(caret(&doc), (0, 0, 0));
}

#[test]
fn test_down_into_empty_row() {
    let doc = doc_with("abc\n\nx");
    let doc = click(&doc, 0, 1, Some(1));
    let doc = press(&doc, KeyCode::Down);
    assert_eq!(caret(&doc), (1, 0, 0));
}

#[test]
fn test_vertical_bounds_are_noops() {
    let doc = doc_with("abc\nde");
    let next = press(&doc, KeyCode::Down);
    assert_eq!(next.version(), doc.version());

    let top = press(&doc, KeyCode::Up);
    let next = press(&top, KeyCode::Up);
    assert_eq!(next.version(), top.version());
}

// ========================================================================
// Home / End
// ========================================================================

#[test]
fn test_home_end_on_row() {
    let doc = doc_with("ab cd\nef");
    let doc = click(&doc, 0, 1, Some(0));
    let doc = press(&doc, KeyCode::End);
    assert_eq!(caret(&doc), (0, 3, 1));
    let doc = press(&doc, KeyCode::Home);
    assert_eq!(caret(&doc), (0, 0, 0));
}

#[test]
fn test_ctrl_home_end_on_document() {
    let doc = doc_with("ab\ncd\nef gh");
    let doc = click(&doc, 1, 1, Some(0));
    let doc = press_with(&doc, KeyCode::Home, Modifiers::CTRL);
    assert_eq!(caret(&doc), (0, 0, 0));
    let doc = press_with(&doc, KeyCode::End, Modifiers::CTRL);
    assert_eq!(caret(&doc), (2, 3, 1));
}

// ========================================================================
// Clicks
// ========================================================================

#[test]
fn test_click_with_char_index() {
    let doc = doc_with("hello world");
    let doc = click(&doc, 0, 3, Some(2));
    assert_eq!(caret(&doc), (0, 3, 2));
    assert_eq!(doc.row(0).token(1).caret_offset(), None);
}

#[test]
fn test_click_on_empty_row_space_goes_to_last_token() {
    let doc = doc_with("hello world\nx");
    let last = doc.row(0).len() - 1;
    let doc = click(&doc, 0, last, None);
    assert_eq!(caret(&doc), (0, 3, 4));
}

#[test]
fn test_click_on_current_position_keeps_version() {
    let doc = doc_with("abc");
    let next = plaintext_editor::handle_on_click_event(&doc, 0, 1, Some(2));
    assert_eq!(next.version(), doc.version());
}
