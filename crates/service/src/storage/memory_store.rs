use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, StoreError};
use crate::books::model::Book;

/// In-memory store keeping the serialized document, mainly for tests.
///
/// Going through JSON keeps it honest about what survives a save. Reads and
/// writes can be switched to fail to exercise the error paths.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    document: RwLock<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw document, which may be malformed on purpose.
    pub fn with_document(doc: impl Into<String>) -> Self {
        Self { document: RwLock::new(Some(doc.into())), ..Self::default() }
    }

    pub fn with_books(books: &[Book]) -> Result<Self, StoreError> {
        Ok(Self::with_document(serde_json::to_string_pretty(books)?))
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn document(&self) -> Option<String> {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn load(&self) -> Result<Vec<Book>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read disabled".into()));
        }
        match self.document.read().await.as_deref() {
            Some(doc) => Ok(serde_json::from_str(doc)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write disabled".into()));
        }
        let doc = serde_json::to_string_pretty(books)?;
        *self.document.write().await = Some(doc);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
