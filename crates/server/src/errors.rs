use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::{ServiceError, ValidationError};
use tracing::error;

pub const READ_FAILED: &str = "Failed to read books data";
pub const SAVE_FAILED: &str = "Failed to save book";
pub const UPDATE_FAILED: &str = "Failed to update book";
pub const DELETE_FAILED: &str = "Failed to delete book";
pub const NOT_FOUND: &str = "Book not found";

/// 统一错误响应，渲染为 `{"error": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// 将服务层错误映射为 HTTP 响应；存储错误只记录日志，
    /// 对外返回该操作的通用 `failure` 文案
    pub fn from_service(err: ServiceError, failure: &'static str) -> Self {
        match err {
            ServiceError::Validation(v) => v.into(),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, NOT_FOUND),
            ServiceError::IdExhausted(_) | ServiceError::Storage(_) => {
                error!(err = %err, "{failure}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure)
            }
        }
    }
}

impl From<ValidationError> for JsonApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}
