use std::{ffi::OsString, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{BookStore, StoreError};
use crate::books::model::Book;

/// 文件存储：以 JSON 文件持久化图书列表
///
/// 文件内容为一个格式化的 JSON 数组。保存时先写同目录的 `.tmp` 文件再重命名，
/// 读取方不会看到写了一半的文档。
#[derive(Debug, Clone)]
pub struct JsonFileBookStore {
    file_path: PathBuf,
}

impl JsonFileBookStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("books.json"));
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

#[async_trait]
impl BookStore for JsonFileBookStore {
    async fn load(&self) -> Result<Vec<Book>, StoreError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let books: Vec<Book> = serde_json::from_slice(&bytes)?;
        Ok(books)
    }

    async fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_vec_pretty(books)?;
        let tmp = self.tmp_path();
        let written = match fs::write(&tmp, &data).await {
            Ok(()) => fs::rename(&tmp, &self.file_path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            // 写入或重命名失败都清理残留的临时文件，原文件保持不变
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!(path = %self.file_path.display(), count = books.len(), "books saved");
        Ok(())
    }
}
