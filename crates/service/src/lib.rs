//! Service layer for the books API.
//! - `books`: the model, request decoding and the load/mutate/save use cases.
//! - `storage`: whole-collection persistence behind the `BookStore` trait.

pub mod errors;
pub mod books;
pub mod runtime;
pub mod storage;
