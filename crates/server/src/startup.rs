use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{books::BookService, runtime, storage::JsonFileBookStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, books::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// 构建以 `books_file` JSON 文件为存储的路由
pub fn build_app(books_file: &Path) -> Router {
    let store = Arc::new(JsonFileBookStore::new(books_file));
    let state = AppState::new(BookService::new(store));
    routes::build_router(state, build_cors())
}

/// 对外入口：构建应用并运行 HTTP 服务
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::utils::logging::init_logging_from_env();

    // 确保数据目录存在
    runtime::ensure_env(&cfg.storage.books_file).await?;
    let app = build_app(&cfg.storage.books_file);

    // 绑定并启动服务
    let addr: SocketAddr = cfg.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, books_file = %cfg.storage.books_file.display(), "books api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
