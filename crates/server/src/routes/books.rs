use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::books::{parse_body, parse_book_id, Book, BookService, NewBook};

use crate::errors::{JsonApiError, DELETE_FAILED, READ_FAILED, SAVE_FAILED, UPDATE_FAILED};

/// 路由共享状态：注入的图书服务
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<BookService>,
}

impl AppState {
    pub fn new(books: BookService) -> Self {
        Self { books: Arc::new(books) }
    }
}

/// 列出全部图书，保持存储顺序
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, JsonApiError> {
    state
        .books
        .list()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, READ_FAILED))
}

/// 列出可借阅的图书（available 为 true），保持相对顺序
pub async fn list_available_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>, JsonApiError> {
    state
        .books
        .list_available()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, READ_FAILED))
}

/// 创建图书：校验请求体后分配新 id 并持久化，返回 201
pub async fn create_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Book>), JsonApiError> {
    let input = NewBook::from_json(&parse_body(&body)?)?;
    let book = state
        .books
        .create(input)
        .await
        .map_err(|e| JsonApiError::from_service(e, SAVE_FAILED))?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// 局部更新图书：id 非法返回 400，不存在返回 404，字段类型错误返回 400
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Book>, JsonApiError> {
    let id = parse_book_id(&id)?;
    // 非法 JSON 在读取存储前拒绝；字段类型在定位记录后由服务层校验
    let body = parse_body(&body)?;
    state
        .books
        .update(id, &body)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, UPDATE_FAILED))
}

/// 删除指定图书，返回被删除的记录
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, JsonApiError> {
    let id = parse_book_id(&id)?;
    state
        .books
        .delete(id)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, DELETE_FAILED))
}
