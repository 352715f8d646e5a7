//! Serializable view of a document for readers outside the crate

use serde::{Deserialize, Serialize};

use super::document::Document;
use super::token::{Token, TokenKind, WhitespaceKind};

/// Plain-data copy of a document (keys flattened to integers)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub key: u64,
    pub current_row_index: usize,
    pub current_token_index: usize,
    pub caret_offset: usize,
    pub font_size_px: u32,
    pub rows: Vec<RowSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub key: u64,
    pub tokens: Vec<TokenSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub key: u64,
    pub kind: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caret_offset: Option<usize>,
}

impl DocumentSnapshot {
    pub fn from_document(document: &Document) -> Self {
        Self {
            key: document.key().0,
            current_row_index: document.current_row_index(),
            current_token_index: document.current_token_index(),
            caret_offset: document.caret_offset(),
            font_size_px: document.options().font_size_px,
            rows: document
                .rows()
                .map(|row| RowSnapshot {
                    key: row.key().0,
                    tokens: row.tokens().map(TokenSnapshot::from_token).collect(),
                })
                .collect(),
        }
    }

    /// Rows rendered as text with `|` at the caret
    pub fn render_with_caret(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let mut line = String::new();
            for token in &row.tokens {
                match token.caret_offset {
                    Some(_) if token.kind == "start_of_row" => {
                        line.push('|');
                    }
                    Some(offset) => {
                        let split = token
                            .text
                            .char_indices()
                            .nth(offset + 1)
                            .map(|(i, _)| i)
                            .unwrap_or(token.text.len());
                        line.push_str(&token.text[..split]);
                        line.push('|');
                        line.push_str(&token.text[split..]);
                    }
                    None => line.push_str(&token.text),
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl TokenSnapshot {
    fn from_token(token: &Token) -> Self {
        let kind = match token.kind() {
            TokenKind::StartOfRow => "start_of_row",
            TokenKind::Default => "default",
            TokenKind::Whitespace(WhitespaceKind::Space) => "space",
            TokenKind::Whitespace(WhitespaceKind::Tab) => "tab",
            TokenKind::Whitespace(WhitespaceKind::CarriageReturn) => "carriage_return",
            TokenKind::Whitespace(WhitespaceKind::Other) => "whitespace",
        };
        Self {
            key: token.key().0,
            kind: kind.to_string(),
            text: token.plain_text().to_string(),
            caret_offset: token.caret_offset(),
        }
    }
}

impl From<&Document> for DocumentSnapshot {
    fn from(document: &Document) -> Self {
        Self::from_document(document)
    }
}
