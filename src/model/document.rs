//! Document - the aggregate root: ordered rows plus the caret location

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::row::{Row, RowKey};
use super::token::{Token, TokenKey};
use super::{EditorOptions, Version};

static NEXT_EDITOR_KEY: AtomicU64 = AtomicU64::new(1);

/// Externally assigned identifier of an editor instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorKey(pub u64);

impl EditorKey {
    /// Allocate a key not handed out before by this process
    pub fn new() -> Self {
        EditorKey(NEXT_EDITOR_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EditorKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EditorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "editor#{}", self.0)
    }
}

/// Immutable editor state.
///
/// Every transition produces a new `Document`; rows that did not change are
/// shared by `Arc` with the previous value, so cloning is shallow.
#[derive(Debug, Clone)]
pub struct Document {
    key: EditorKey,
    version: Version,
    order: Vec<RowKey>,
    rows: HashMap<RowKey, Arc<Row>>,
    current_row_index: usize,
    current_token_index: usize,
    options: EditorOptions,
}

impl Document {
    /// A fresh document: one row holding a `StartOfRow` token with the caret on it
    pub fn new(key: EditorKey, options: EditorOptions) -> Self {
        let row = Row::new();
        let row = row.with_token(row.token(0).with_caret(Some(0)));
        DocumentBuilder::new(key, options).add(row).build()
    }

    pub fn key(&self) -> EditorKey {
        self.key
    }

    /// Opaque change-detection stamp; compare for equality only
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn current_row_index(&self) -> usize {
        self.current_row_index
    }

    pub fn current_token_index(&self) -> usize {
        self.current_token_index
    }

    pub fn row_count(&self) -> usize {
        self.order.len()
    }

    /// Row keys in document order
    pub fn row_keys(&self) -> &[RowKey] {
        &self.order
    }

    /// Row at a document index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn row(&self, index: usize) -> &Row {
        let key = self.order.get(index).unwrap_or_else(|| {
            panic!(
                "row index {} out of range ({} rows)",
                index,
                self.order.len()
            )
        });
        self.row_by_key(*key)
    }

    /// Row by key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not part of this document.
    pub fn row_by_key(&self, key: RowKey) -> &Row {
        self.rows
            .get(&key)
            .unwrap_or_else(|| panic!("row {:?} not found in {}", key, self.key))
    }

    /// Shared handle to a row, for readers that keep rows past the document
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn shared_row(&self, index: usize) -> Arc<Row> {
        let key = self.row(index).key();
        Arc::clone(&self.rows[&key])
    }

    /// Rows in document order
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.order.iter().map(move |key| self.row_by_key(*key))
    }

    pub fn current_row_key(&self) -> RowKey {
        self.row(self.current_row_index).key()
    }

    pub fn current_row(&self) -> &Row {
        self.row(self.current_row_index)
    }

    pub fn current_token_key(&self) -> TokenKey {
        self.current_token().key()
    }

    pub fn current_token(&self) -> &Token {
        self.current_row().token(self.current_token_index)
    }

    /// Caret offset inside the current token.
    ///
    /// # Panics
    ///
    /// Panics if the current token does not carry the caret.
    pub fn caret_offset(&self) -> usize {
        self.current_token().expect_caret()
    }

    /// Visible text, rows joined with `\n`
    pub fn text(&self) -> String {
        self.rows().map(Row::text).collect::<Vec<_>>().join("\n")
    }

    /// Copy with one row replaced (matched by key, position unchanged).
    ///
    /// # Panics
    ///
    /// Panics if the row's key is not part of this document.
    pub(crate) fn with_row(&self, row: Row) -> Document {
        assert!(
            self.rows.contains_key(&row.key()),
            "replacement row {:?} not found in {}",
            row.key(),
            self.key
        );
        let mut next = self.clone();
        next.rows.insert(row.key(), Arc::new(row));
        next
    }

    /// Copy with the caret indices moved. Token caret offsets are untouched.
    pub(crate) fn with_caret_position(&self, row_index: usize, token_index: usize) -> Document {
        Document {
            current_row_index: row_index,
            current_token_index: token_index,
            ..self.clone()
        }
    }

    /// Copy carrying a fresh version stamp
    pub(crate) fn with_new_version(&self) -> Document {
        Document {
            version: Version::next(),
            ..self.clone()
        }
    }

    /// Seed a builder with this document's rows and caret indices
    pub fn to_builder(&self) -> DocumentBuilder {
        DocumentBuilder {
            key: self.key,
            options: self.options.clone(),
            order: self.order.clone(),
            rows: self.rows.clone(),
            current_row_index: self.current_row_index,
            current_token_index: self.current_token_index,
        }
    }

    /// True when rows, tokens and caret are identical (versions ignored)
    pub fn same_content(&self, other: &Document) -> bool {
        self.key == other.key
            && self.current_row_index == other.current_row_index
            && self.current_token_index == other.current_token_index
            && self.order == other.order
            && self.order.iter().all(|key| {
                match (self.rows.get(key), other.rows.get(key)) {
                    (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.same_content(b),
                    _ => false,
                }
            })
    }

    /// Describe every broken document invariant; empty when consistent
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut out = Vec::new();

        if self.order.is_empty() {
            out.push("document has no rows".to_string());
            return out;
        }
        if self.order.len() != self.rows.len() {
            out.push(format!(
                "row sequence has {} keys but map has {} rows",
                self.order.len(),
                self.rows.len()
            ));
        }

        let mut seen = HashMap::new();
        let mut carets = Vec::new();
        for (row_index, key) in self.order.iter().enumerate() {
            let Some(row) = self.rows.get(key) else {
                out.push(format!("row key {:?} missing from map", key));
                continue;
            };
            row.violations(&mut out);
            for (token_index, token) in row.tokens().enumerate() {
                if let Some(previous) = seen.insert(token.key(), row_index) {
                    out.push(format!(
                        "token {:?} appears in rows {} and {}",
                        token.key(),
                        previous,
                        row_index
                    ));
                }
                if let Some(offset) = token.caret_offset() {
                    carets.push((row_index, token_index));
                    if offset >= token.len() {
                        out.push(format!(
                            "caret offset {} out of range in token {:?}",
                            offset,
                            token.key()
                        ));
                    }
                }
            }
        }

        if self.current_row_index >= self.order.len() {
            out.push(format!(
                "current row index {} out of range ({} rows)",
                self.current_row_index,
                self.order.len()
            ));
        } else {
            let row = self.current_row();
            if self.current_token_index >= row.len() {
                out.push(format!(
                    "current token index {} out of range ({} tokens)",
                    self.current_token_index,
                    row.len()
                ));
            }
        }

        let expected = (self.current_row_index, self.current_token_index);
        if carets != [expected] {
            out.push(format!(
                "expected exactly one caret at {:?}, found {:?}",
                expected, carets
            ));
        }

        out
    }

    /// Assert all invariants (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let violations = self.invariant_violations();
        debug_assert!(
            violations.is_empty(),
            "document invariants violated:\n  {}",
            violations.join("\n  ")
        );
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}

    /// Assert invariants, naming the message that produced this state
    pub fn assert_invariants_with_context(&self, context: &str) {
        #[cfg(debug_assertions)]
        {
            let violations = self.invariant_violations();
            debug_assert!(
                violations.is_empty(),
                "document invariants violated after {}:\n  {}",
                context,
                violations.join("\n  ")
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = context;
    }
}

/// Staged construction of a document.
///
/// Rows are added, inserted or removed by key; caret indices are set with the
/// `*_of` setters. Unknown keys and out-of-range indices panic.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    key: EditorKey,
    options: EditorOptions,
    order: Vec<RowKey>,
    rows: HashMap<RowKey, Arc<Row>>,
    current_row_index: usize,
    current_token_index: usize,
}

impl DocumentBuilder {
    /// An empty builder; at least one row must be added before `build()`
    pub fn new(key: EditorKey, options: EditorOptions) -> Self {
        Self {
            key,
            options,
            order: Vec::new(),
            rows: HashMap::new(),
            current_row_index: 0,
            current_token_index: 0,
        }
    }

    /// Append a row
    pub fn add(mut self, row: Row) -> Self {
        let index = self.order.len();
        self.place(index, Arc::new(row));
        self
    }

    /// Insert a row at a document index (`0..=len`)
    pub fn insert(mut self, index: usize, row: Row) -> Self {
        assert!(
            index <= self.order.len(),
            "row insert index {} out of range ({} rows)",
            index,
            self.order.len()
        );
        self.place(index, Arc::new(row));
        self
    }

    /// Remove a row by key
    pub fn remove(mut self, key: RowKey) -> Self {
        assert!(
            self.rows.remove(&key).is_some(),
            "cannot remove row {:?}: not in {}",
            key,
            self.key
        );
        self.order.retain(|k| *k != key);
        self
    }

    /// Replace a row in place (matched by key)
    pub fn replace(mut self, row: Row) -> Self {
        assert!(
            self.rows.contains_key(&row.key()),
            "cannot replace row {:?}: not in {}",
            row.key(),
            self.key
        );
        self.rows.insert(row.key(), Arc::new(row));
        self
    }

    pub fn current_row_index_of(mut self, index: usize) -> Self {
        self.current_row_index = index;
        self
    }

    pub fn current_token_index_of(mut self, index: usize) -> Self {
        self.current_token_index = index;
        self
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Produce the immutable document with a fresh version.
    ///
    /// # Panics
    ///
    /// Panics if no rows were added.
    pub fn build(self) -> Document {
        assert!(!self.order.is_empty(), "document must have at least one row");
        Document {
            key: self.key,
            version: Version::next(),
            order: self.order,
            rows: self.rows,
            current_row_index: self.current_row_index,
            current_token_index: self.current_token_index,
            options: self.options,
        }
    }

    fn place(&mut self, index: usize, row: Arc<Row>) {
        let key = row.key();
        assert!(
            !self.rows.contains_key(&key),
            "row {:?} already present in {}",
            key,
            self.key
        );
        self.rows.insert(key, row);
        self.order.insert(index, key);
    }
}
