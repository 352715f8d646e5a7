//! Token - the smallest immutable content unit of a row

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey(pub u64);

impl TokenKey {
    /// Allocate a key that no other token in this process carries
    pub fn new() -> Self {
        TokenKey(NEXT_TOKEN_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TokenKey {
    fn default() -> Self {
        Self::new()
    }
}

/// The character class of a whitespace token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhitespaceKind {
    Space,
    Tab,
    CarriageReturn,
    Other,
}

impl WhitespaceKind {
    /// Classify a whitespace character
    pub fn of(ch: char) -> Self {
        match ch {
            ' ' => WhitespaceKind::Space,
            '\t' => WhitespaceKind::Tab,
            '\r' => WhitespaceKind::CarriageReturn,
            _ => WhitespaceKind::Other,
        }
    }
}

/// Token variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Sentinel at index 0 of every row. Renders nothing, never user-editable.
    StartOfRow,
    /// A run of non-whitespace characters
    Default,
    /// A single whitespace character
    Whitespace(WhitespaceKind),
}

impl TokenKind {
    #[inline]
    pub fn is_default(self) -> bool {
        matches!(self, TokenKind::Default)
    }

    #[inline]
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace(_))
    }

    #[inline]
    pub fn is_start_of_row(self) -> bool {
        matches!(self, TokenKind::StartOfRow)
    }
}

/// One content unit.
///
/// A caret offset `o` means the caret sits right after character `o` of the
/// token, so a token spans `len()` caret slots. Only the focused token in a
/// whole document carries `Some` offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    key: TokenKey,
    kind: TokenKind,
    text: String,
    caret_offset: Option<usize>,
}

impl Token {
    /// Create the sentinel that heads every row
    pub fn start_of_row() -> Self {
        Self {
            key: TokenKey::new(),
            kind: TokenKind::StartOfRow,
            text: String::new(),
            caret_offset: None,
        }
    }

    /// Create a default (word) token
    ///
    /// # Panics
    ///
    /// Panics if `text` is empty or contains whitespace.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(!text.is_empty(), "default token must not be empty");
        assert!(
            !text.chars().any(char::is_whitespace),
            "default token must not contain whitespace: {:?}",
            text
        );
        Self {
            key: TokenKey::new(),
            kind: TokenKind::Default,
            text,
            caret_offset: None,
        }
    }

    /// Create a single-character whitespace token
    pub fn whitespace(ch: char) -> Self {
        debug_assert!(ch.is_whitespace(), "not whitespace: {:?}", ch);
        Self {
            key: TokenKey::new(),
            kind: TokenKind::Whitespace(WhitespaceKind::of(ch)),
            text: ch.to_string(),
            caret_offset: None,
        }
    }

    /// A plain space token
    pub fn space() -> Self {
        Self::whitespace(' ')
    }

    pub fn key(&self) -> TokenKey {
        self.key
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal text this token renders (empty for `StartOfRow`)
    pub fn plain_text(&self) -> &str {
        &self.text
    }

    pub fn caret_offset(&self) -> Option<usize> {
        self.caret_offset
    }

    /// Number of caret slots. `StartOfRow` renders nothing but still owns one
    /// slot: the position before the first character of the row.
    pub fn len(&self) -> usize {
        match self.kind {
            TokenKind::StartOfRow => 1,
            _ => self.text.chars().count(),
        }
    }

    /// Always false for a well-formed token
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset of the last caret slot
    #[inline]
    pub fn last_offset(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Key-preserving copy with a different caret offset
    pub fn with_caret(&self, caret_offset: Option<usize>) -> Self {
        if let Some(offset) = caret_offset {
            assert!(
                offset < self.len(),
                "caret offset {} out of range for token {:?} ({} slots)",
                offset,
                self.key,
                self.len()
            );
        }
        Self {
            caret_offset,
            ..self.clone()
        }
    }

    /// Key-preserving copy with replaced text and caret.
    ///
    /// Only meaningful for `Default` tokens.
    pub fn with_text(&self, text: String, caret_offset: Option<usize>) -> Self {
        assert!(
            self.kind.is_default(),
            "only default tokens can change text, got {:?}",
            self.kind
        );
        assert!(!text.is_empty(), "default token must not be empty");
        Self {
            key: self.key,
            kind: self.kind,
            text,
            caret_offset: None,
        }
        .with_caret(caret_offset)
    }

    /// The caret offset of the focused token.
    ///
    /// # Panics
    ///
    /// Panics if this token does not hold the caret; the caller located it as
    /// the current token, so the document invariants are already broken.
    pub fn expect_caret(&self) -> usize {
        match self.caret_offset {
            Some(offset) => offset,
            None => panic!(
                "current token {:?} ({:?}) has no caret offset",
                self.key, self.kind
            ),
        }
    }

    /// Split the text of a default token after caret slot `offset`.
    ///
    /// Returns `(before_and_including, after)`; `after` may be empty.
    pub(crate) fn split_text_after(&self, offset: usize) -> (String, String) {
        let byte = byte_index(&self.text, offset + 1);
        let (before, after) = self.text.split_at(byte);
        (before.to_string(), after.to_string())
    }

    /// Text with the character at `offset` removed
    pub(crate) fn text_without_char(&self, offset: usize) -> String {
        let start = byte_index(&self.text, offset);
        let end = byte_index(&self.text, offset + 1);
        let mut text = String::with_capacity(self.text.len());
        text.push_str(&self.text[..start]);
        text.push_str(&self.text[end..]);
        text
    }
}

/// Byte index of the `char_index`th character, or the text length past the end
fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
