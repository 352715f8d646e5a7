//! Merge normalization: adjacent `Default` tokens become one token

use crate::model::Document;

use super::caret::{set_caret_offset, set_previous_token_as_current};

/// Merge the current token with the next token of the same row when both are
/// `Default`. The merged token keeps the current token's key and caret.
pub fn merge_tokens_if_applicable(doc: &Document) -> Document {
    let row = doc.current_row();
    let index = doc.current_token_index();
    if index + 1 >= row.len() {
        return doc.clone();
    }

    let current = row.token(index);
    let next = row.token(index + 1);
    if !current.kind().is_default() || !next.kind().is_default() {
        return doc.clone();
    }

    let text = format!("{}{}", current.plain_text(), next.plain_text());
    let merged = current.with_text(text, current.caret_offset());
    let row = row
        .to_builder()
        .remove(next.key())
        .remove(current.key())
        .insert(index, merged)
        .build();

    doc.with_row(row)
}

/// Merge the previous token of the same row into the current one when both
/// are `Default`. The caret keeps its visual position; the merged token keeps
/// the previous token's key.
pub fn merge_with_previous_if_applicable(doc: &Document) -> Document {
    let index = doc.current_token_index();
    if index == 0 {
        return doc.clone();
    }

    let row = doc.current_row();
    let previous = row.token(index - 1);
    let current = doc.current_token();
    if !previous.kind().is_default() || !current.kind().is_default() {
        return doc.clone();
    }

    let offset = previous.len() + current.expect_caret();
    let merged = merge_tokens_if_applicable(&set_previous_token_as_current(doc));
    set_caret_offset(&merged, offset)
}

/// Forward then backward merge around the current token
pub fn normalize_around_caret(doc: &Document) -> Document {
    merge_with_previous_if_applicable(&merge_tokens_if_applicable(doc))
}
