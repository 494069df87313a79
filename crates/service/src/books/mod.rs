pub mod model;
pub mod service;

pub use model::{parse_body, parse_book_id, Book, BookPatch, NewBook};
pub use service::BookService;
