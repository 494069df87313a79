//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare storage
//! without depending directly on `common` internals.

use std::path::Path;

/// Ensure the directory of the books file exists.
pub async fn ensure_env(books_file: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(books_file).await
}
