use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ValidationError;

/// 存储中的一本书。字段顺序即磁盘与响应中的字段顺序。
/// 未知字段原样保留在 `extra` 中，保存时写回。
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub available: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>, available: bool) -> Self {
        Self { id, title: title.into(), author: author.into(), available, extra: Map::new() }
    }
}

/// 创建输入模型：不包含 id，由服务端生成；所有字段必填
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl NewBook {
    /// Strict decode: the body must be an object with `title` and `author`
    /// strings and an `available` boolean.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = body.as_object().ok_or(ValidationError::InvalidBody)?;
        let title = obj.get("title").and_then(Value::as_str).ok_or(ValidationError::InvalidBody)?;
        let author = obj.get("author").and_then(Value::as_str).ok_or(ValidationError::InvalidBody)?;
        let available = obj
            .get("available")
            .and_then(Value::as_bool)
            .ok_or(ValidationError::InvalidBody)?;
        Ok(Self { title: title.to_owned(), author: author.to_owned(), available })
    }

    pub fn into_book(self, id: i64) -> Book {
        Book::new(id, self.title, self.author, self.available)
    }
}

/// 局部更新输入：`None` 的字段保持不变
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub available: Option<bool>,
}

impl BookPatch {
    /// Fields are checked in `title`, `author`, `available` order and the first
    /// present field of the wrong type (including `null`) rejects the whole patch.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = body.as_object().ok_or(ValidationError::InvalidBody)?;
        Ok(Self {
            title: optional_str(obj, "title", ValidationError::InvalidTitle)?,
            author: optional_str(obj, "author", ValidationError::InvalidAuthor)?,
            available: match obj.get("available") {
                None => None,
                Some(v) => Some(v.as_bool().ok_or(ValidationError::InvalidAvailable)?),
            },
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.available.is_none()
    }

    pub fn apply_to(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(available) = self.available {
            book.available = available;
        }
    }
}

fn optional_str(
    obj: &Map<String, Value>,
    key: &str,
    err: ValidationError,
) -> Result<Option<String>, ValidationError> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v.as_str().map(|s| Some(s.to_owned())).ok_or(err),
    }
}

/// Parse the `:id` path segment as a decimal integer.
pub fn parse_book_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>().map_err(|_| ValidationError::InvalidId)
}

/// Decode a raw request body. An empty body reads as `{}`.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ValidationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|_| ValidationError::InvalidBody)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_book_accepts_exact_types() {
        let nb = NewBook::from_json(&json!({"title": "A", "author": "B", "available": true})).unwrap();
        assert_eq!(nb, NewBook { title: "A".into(), author: "B".into(), available: true });
    }

    #[test]
    fn new_book_rejects_missing_or_mistyped_fields() {
        let cases = [
            json!({"author": "B", "available": true}),
            json!({"title": "A", "available": true}),
            json!({"title": "A", "author": "B"}),
            json!({"title": 1, "author": "B", "available": true}),
            json!({"title": "A", "author": null, "available": true}),
            json!({"title": "A", "author": "B", "available": "true"}),
            json!({"title": "A", "author": "B", "available": 1}),
            json!([{"title": "A", "author": "B", "available": true}]),
            json!("A"),
        ];
        for body in cases {
            assert_eq!(NewBook::from_json(&body), Err(ValidationError::InvalidBody), "{body}");
        }
    }

    #[test]
    fn new_book_ignores_client_id() {
        let nb = NewBook::from_json(&json!({"id": 99, "title": "A", "author": "B", "available": false}))
            .unwrap();
        assert_eq!(nb.into_book(1).id, 1);
    }

    #[test]
    fn patch_empty_object_changes_nothing() {
        let patch = BookPatch::from_json(&json!({})).unwrap();
        assert!(patch.is_empty());
        let mut book = Book::new(1, "A", "B", true);
        let before = book.clone();
        patch.apply_to(&mut book);
        assert_eq!(book, before);
    }

    #[test]
    fn patch_reports_first_bad_field_in_order() {
        let err = BookPatch::from_json(&json!({"available": "yes", "author": 5, "title": false}));
        assert_eq!(err, Err(ValidationError::InvalidTitle));
        let err = BookPatch::from_json(&json!({"available": "yes", "author": 5, "title": "ok"}));
        assert_eq!(err, Err(ValidationError::InvalidAuthor));
        let err = BookPatch::from_json(&json!({"title": "ok", "available": "yes"}));
        assert_eq!(err, Err(ValidationError::InvalidAvailable));
        let err = BookPatch::from_json(&json!({"title": null}));
        assert_eq!(err, Err(ValidationError::InvalidTitle));
    }

    #[test]
    fn patch_applies_present_fields_only() {
        let patch = BookPatch::from_json(&json!({"available": false, "extra": 1})).unwrap();
        let mut book = Book::new(7, "A", "B", true);
        patch.apply_to(&mut book);
        assert_eq!(book, Book::new(7, "A", "B", false));
    }

    #[test]
    fn patch_rejects_non_object() {
        assert_eq!(BookPatch::from_json(&json!([1, 2])), Err(ValidationError::InvalidBody));
    }

    #[test]
    fn unknown_book_fields_survive_a_round_trip() {
        let raw = json!({"id": 1, "title": "Dune", "author": "Herbert", "available": true, "year": 1965});
        let book: Book = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(book.extra.get("year"), Some(&json!(1965)));
        let text = serde_json::to_string(&book).unwrap();
        assert_eq!(
            text,
            r#"{"id":1,"title":"Dune","author":"Herbert","available":true,"year":1965}"#
        );
    }

    #[test]
    fn book_id_parsing() {
        assert_eq!(parse_book_id("42"), Ok(42));
        assert_eq!(parse_book_id("-3"), Ok(-3));
        assert_eq!(parse_book_id("abc"), Err(ValidationError::InvalidId));
        assert_eq!(parse_book_id("12abc"), Err(ValidationError::InvalidId));
        assert_eq!(parse_book_id(""), Err(ValidationError::InvalidId));
        assert_eq!(parse_book_id("1.5"), Err(ValidationError::InvalidId));
    }

    #[test]
    fn body_parsing() {
        assert_eq!(parse_body(b""), Ok(json!({})));
        assert_eq!(parse_body(b"  \n"), Ok(json!({})));
        assert_eq!(parse_body(br#"{"title":"A"}"#), Ok(json!({"title": "A"})));
        assert_eq!(parse_body(b"{oops"), Err(ValidationError::InvalidBody));
    }
}
