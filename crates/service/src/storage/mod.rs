//! Persistence for the book collection.
//!
//! A store always reads and writes the whole collection; there is no
//! incremental or append mode.

pub mod json_file_store;
pub mod memory_store;

use async_trait::async_trait;
use thiserror::Error;

use crate::books::model::Book;

pub use json_file_store::JsonFileBookStore;
pub use memory_store::MemoryBookStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Full-collection load/save. A missing backing document loads as an empty list.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Book>, StoreError>;
    async fn save(&self, books: &[Book]) -> Result<(), StoreError>;
}
