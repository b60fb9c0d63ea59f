//! Domain Entities

mod comment;

pub use comment::Comment;
