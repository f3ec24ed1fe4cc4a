//! Content module - documents, parsing, ordering, and rendering

mod catalog;
mod date;
mod markdown;
mod post;
mod store;

pub use catalog::Catalog;
pub use markdown::MarkdownRenderer;
pub use post::{ContentError, Post};
pub use store::ContentDir;
