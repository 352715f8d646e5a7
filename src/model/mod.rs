//! Editor model - the immutable state of every editor instance
//!
//! A `Document` is made of `Row`s, which are made of `Token`s. All three are
//! immutable values; transitions in `crate::update` build new values and share
//! untouched rows and tokens with the previous ones.

pub mod document;
pub mod row;
pub mod snapshot;
pub mod token;

pub use document::{Document, DocumentBuilder, EditorKey};
pub use row::{Row, RowBuilder, RowKey};
pub use snapshot::{DocumentSnapshot, RowSnapshot, TokenSnapshot};
pub use token::{Token, TokenKey, TokenKind, WhitespaceKind};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Opaque change-detection stamp.
///
/// Two stamps are either equal or not; they carry no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version(u64);

impl Version {
    /// A stamp no other value in this process carries
    pub fn next() -> Self {
        Version(NEXT_VERSION.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Default font size in pixels
pub const DEFAULT_FONT_SIZE_PX: u32 = 14;

/// Display options carried by a document. Not read by any transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorOptions {
    pub font_size_px: u32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            font_size_px: DEFAULT_FONT_SIZE_PX,
        }
    }
}

/// Committed documents of all live editor instances
#[derive(Debug, Clone, Default)]
pub struct EditorStates {
    documents: HashMap<EditorKey, Arc<Document>>,
    /// Options given to newly constructed instances
    pub options: EditorOptions,
}

impl EditorStates {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            documents: HashMap::new(),
            options,
        }
    }

    pub fn get(&self, key: EditorKey) -> Option<&Arc<Document>> {
        self.documents.get(&key)
    }

    pub fn contains(&self, key: EditorKey) -> bool {
        self.documents.contains_key(&key)
    }

    /// Commit a document under its own key, replacing any previous value
    pub fn commit(&mut self, document: Document) -> Arc<Document> {
        let document = Arc::new(document);
        self.documents.insert(document.key(), Arc::clone(&document));
        document
    }

    pub fn remove(&mut self, key: EditorKey) -> Option<Arc<Document>> {
        self.documents.remove(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = EditorKey> + '_ {
        self.documents.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
