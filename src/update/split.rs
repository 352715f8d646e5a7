//! Token splitting at the caret

use crate::model::{Document, Token, TokenKind, WhitespaceKind};

use super::caret::insert_new_current_token_after_current_position;

/// Split the current token at the caret, optionally placing `insert_between`
/// between the two halves.
///
/// Only `Default` tokens split. The character at the caret stays in the
/// "before" half. When there is nothing after the caret the split degrades to
/// inserting `insert_between` after the current token (or to the identity).
/// Afterwards the caret sits on the last slot of `insert_between` if given,
/// otherwise on the last slot of the "before" half.
pub fn split_current_token(doc: &Document, insert_between: Option<Token>) -> Document {
    match doc.current_token().kind() {
        TokenKind::Default => split_default_token(doc, insert_between),
        // a tab token is atomic; typed tabs are expanded before they get here
        TokenKind::Whitespace(WhitespaceKind::Tab) => doc.clone(),
        TokenKind::Whitespace(_) | TokenKind::StartOfRow => doc.clone(),
    }
}

fn split_default_token(doc: &Document, insert_between: Option<Token>) -> Document {
    let current = doc.current_token();
    let offset = current.expect_caret();

    if offset == current.last_offset() {
        return match insert_between {
            Some(token) => insert_new_current_token_after_current_position(doc, token),
            None => doc.clone(),
        };
    }

    let (before, after) = current.split_text_after(offset);
    let before = Token::text(before);
    let after = Token::text(after);
    let index = doc.current_token_index();
    let row_index = doc.current_row_index();

    let mut builder = doc.current_row().to_builder().remove(current.key());
    let caret_index = match insert_between {
        Some(token) => {
            builder = builder
                .insert(index, before.with_caret(None))
                .insert(index + 1, token.with_caret(Some(token.last_offset())));
            index + 1
        }
        None => {
            builder = builder.insert(index, before.with_caret(Some(before.last_offset())));
            index
        }
    };
    let row = builder.insert(caret_index + 1, after).build();

    doc.with_row(row).with_caret_position(row_index, caret_index)
}
