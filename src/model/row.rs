//! Row - an ordered, keyed collection of tokens forming one line

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::token::{Token, TokenKey, TokenKind};
use super::Version;

static NEXT_ROW_KEY: AtomicU64 = AtomicU64::new(1);

/// Identifier for a row, unique per document (and in practice per process)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub u64);

impl RowKey {
    pub fn new() -> Self {
        RowKey(NEXT_ROW_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RowKey {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of the document.
///
/// Tokens are stored twice: `order` is the rendering/navigation sequence and
/// `tokens` maps keys to shared token values. Untouched tokens are shared by
/// `Arc` between successive versions of a row.
#[derive(Debug, Clone)]
pub struct Row {
    key: RowKey,
    version: Version,
    order: Vec<TokenKey>,
    tokens: HashMap<TokenKey, Arc<Token>>,
}

impl Row {
    /// A fresh row holding only its `StartOfRow` token
    pub fn new() -> Self {
        RowBuilder::new().add(Token::start_of_row()).build()
    }

    pub fn key(&self) -> RowKey {
        self.key
    }

    /// Change-detection stamp, replaced every time the row is rebuilt
    pub fn version(&self) -> Version {
        self.version
    }

    /// Number of tokens, including the `StartOfRow` sentinel
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Token keys in sequence order
    pub fn token_keys(&self) -> &[TokenKey] {
        &self.order
    }

    /// Token at a sequence index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn token(&self, index: usize) -> &Token {
        let key = self.order.get(index).unwrap_or_else(|| {
            panic!(
                "token index {} out of range for row {:?} ({} tokens)",
                index,
                self.key,
                self.order.len()
            )
        });
        self.token_by_key(*key)
    }

    /// Token by key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not part of this row.
    pub fn token_by_key(&self, key: TokenKey) -> &Token {
        self.tokens
            .get(&key)
            .unwrap_or_else(|| panic!("token {:?} not found in row {:?}", key, self.key))
    }

    pub fn contains_token(&self, key: TokenKey) -> bool {
        self.tokens.contains_key(&key)
    }

    /// Tokens in sequence order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.order.iter().map(move |key| self.token_by_key(*key))
    }

    /// Index of a token in the sequence
    pub fn index_of(&self, key: TokenKey) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    /// Shared handle to a token (used to carry tokens into another row)
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub(crate) fn shared_token(&self, index: usize) -> Arc<Token> {
        let key = self.token(index).key();
        Arc::clone(&self.tokens[&key])
    }

    /// The visible text of the row
    pub fn text(&self) -> String {
        self.tokens().map(Token::plain_text).collect()
    }

    /// Total caret slots across the row, `StartOfRow` included
    pub fn width(&self) -> usize {
        self.tokens().map(Token::len).sum()
    }

    /// Copy of this row with one token replaced by a key-preserving copy.
    ///
    /// # Panics
    ///
    /// Panics if the token's key is not part of this row.
    pub fn with_token(&self, token: Token) -> Row {
        assert!(
            self.tokens.contains_key(&token.key()),
            "replacement token {:?} not found in row {:?}",
            token.key(),
            self.key
        );
        let mut tokens = self.tokens.clone();
        tokens.insert(token.key(), Arc::new(token));
        Row {
            key: self.key,
            version: Version::next(),
            order: self.order.clone(),
            tokens,
        }
    }

    /// Seed a builder with this row's content (keeps the row key)
    pub fn to_builder(&self) -> RowBuilder {
        RowBuilder {
            key: self.key,
            order: self.order.clone(),
            tokens: self.tokens.clone(),
        }
    }

    /// True when both rows hold the same tokens in the same order
    pub fn same_content(&self, other: &Row) -> bool {
        self.key == other.key
            && self.order == other.order
            && self.order.iter().all(|key| {
                let a = &self.tokens[key];
                let b = &other.tokens[key];
                Arc::ptr_eq(a, b) || a == b
            })
    }

    /// Describe every broken row-local invariant
    pub(crate) fn violations(&self, out: &mut Vec<String>) {
        if self.order.len() != self.tokens.len() {
            out.push(format!(
                "row {:?}: sequence has {} keys but map has {} tokens",
                self.key,
                self.order.len(),
                self.tokens.len()
            ));
        }
        match self.order.first() {
            None => out.push(format!("row {:?} is empty", self.key)),
            Some(first) => {
                let head = self.tokens.get(first).map(|t| t.kind());
                if head != Some(TokenKind::StartOfRow) {
                    out.push(format!(
                        "row {:?}: first token is {:?}, expected StartOfRow",
                        self.key, head
                    ));
                }
            }
        }
        let mut previous_default = false;
        for (index, key) in self.order.iter().enumerate() {
            let Some(token) = self.tokens.get(key) else {
                out.push(format!("row {:?}: key {:?} missing from map", self.key, key));
                continue;
            };
            if index > 0 && token.kind().is_start_of_row() {
                out.push(format!(
                    "row {:?}: StartOfRow at index {}",
                    self.key, index
                ));
            }
            if token.kind().is_default() && token.plain_text().is_empty() {
                out.push(format!("row {:?}: empty default token", self.key));
            }
            if previous_default && token.kind().is_default() {
                out.push(format!(
                    "row {:?}: adjacent default tokens at index {}",
                    self.key, index
                ));
            }
            previous_default = token.kind().is_default();
        }
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

/// Staged construction of a row.
///
/// Nothing is observable until `build()`. Referencing an unknown key or an
/// out-of-range index is a contract violation and panics.
#[derive(Debug, Clone)]
pub struct RowBuilder {
    key: RowKey,
    order: Vec<TokenKey>,
    tokens: HashMap<TokenKey, Arc<Token>>,
}

impl RowBuilder {
    /// An empty builder for a new row
    pub fn new() -> Self {
        Self {
            key: RowKey::new(),
            order: Vec::new(),
            tokens: HashMap::new(),
        }
    }

    /// Append a token
    pub fn add(self, token: Token) -> Self {
        self.add_shared(Arc::new(token))
    }

    /// Append a token shared with another row
    pub fn add_shared(mut self, token: Arc<Token>) -> Self {
        let index = self.order.len();
        self.place(index, token);
        self
    }

    /// Insert a token at a sequence index (`0..=len`)
    pub fn insert(mut self, index: usize, token: Token) -> Self {
        assert!(
            index <= self.order.len(),
            "insert index {} out of range for row {:?} ({} tokens)",
            index,
            self.key,
            self.order.len()
        );
        self.place(index, Arc::new(token));
        self
    }

    /// Remove a token by key
    pub fn remove(mut self, key: TokenKey) -> Self {
        assert!(
            self.tokens.remove(&key).is_some(),
            "cannot remove token {:?}: not in row {:?}",
            key,
            self.key
        );
        self.order.retain(|k| *k != key);
        self
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Produce the immutable row with a fresh version
    pub fn build(self) -> Row {
        Row {
            key: self.key,
            version: Version::next(),
            order: self.order,
            tokens: self.tokens,
        }
    }

    fn place(&mut self, index: usize, token: Arc<Token>) {
        let key = token.key();
        assert!(
            !self.tokens.contains_key(&key),
            "token {:?} already present in row {:?}",
            key,
            self.key
        );
        self.tokens.insert(key, token);
        self.order.insert(index, key);
    }
}

impl Default for RowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
