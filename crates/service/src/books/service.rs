use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::model::{Book, BookPatch, NewBook};
use crate::errors::ServiceError;
use crate::storage::BookStore;

/// Book use cases over an injected [`BookStore`].
///
/// Every operation loads the whole collection; mutations save it back once.
/// Mutations hold `write_gate` across load/mutate/save, so two concurrent
/// updates cannot both start from the same snapshot and lose one write.
pub struct BookService {
    store: Arc<dyn BookStore>,
    write_gate: Mutex<()>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store, write_gate: Mutex::new(()) }
    }

    pub async fn list(&self) -> Result<Vec<Book>, ServiceError> {
        Ok(self.store.load().await?)
    }

    pub async fn list_available(&self) -> Result<Vec<Book>, ServiceError> {
        let books = self.store.load().await?;
        Ok(available_only(books))
    }

    pub async fn create(&self, input: NewBook) -> Result<Book, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let mut books = self.store.load().await?;
        let id = next_id(&books)?;
        let book = input.into_book(id);
        books.push(book.clone());
        self.store.save(&books).await?;
        info!(id, "book created");
        Ok(book)
    }

    /// 局部更新。先定位记录（不存在则 NotFound），再校验请求体字段；
    /// 字段不合法时直接返回，不修改也不保存。
    pub async fn update(&self, id: i64, body: &Value) -> Result<Book, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let mut books = self.store.load().await?;
        let book = books.iter_mut().find(|b| b.id == id).ok_or(ServiceError::NotFound(id))?;
        let patch = BookPatch::from_json(body)?;
        patch.apply_to(book);
        let updated = book.clone();
        self.store.save(&books).await?;
        info!(id, "book updated");
        Ok(updated)
    }

    /// Remove one book and return it as it was stored.
    pub async fn delete(&self, id: i64) -> Result<Book, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let mut books = self.store.load().await?;
        let idx = books.iter().position(|b| b.id == id).ok_or(ServiceError::NotFound(id))?;
        let removed = books.remove(idx);
        self.store.save(&books).await?;
        info!(id, remaining = books.len(), "book deleted");
        Ok(removed)
    }
}

/// One more than the largest id present, 1 for an empty collection.
/// Freed top ids are handed out again.
pub fn next_id(books: &[Book]) -> Result<i64, ServiceError> {
    let max = books.iter().map(|b| b.id).max().unwrap_or(0).max(0);
    let id = max.checked_add(1).ok_or(ServiceError::IdExhausted(max))?;
    debug!(id, "next book id");
    Ok(id)
}

pub fn available_only(books: Vec<Book>) -> Vec<Book> {
    books.into_iter().filter(|b| b.available).collect()
}
