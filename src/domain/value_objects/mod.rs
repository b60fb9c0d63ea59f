//! Domain Value Objects
//!
//! Immutable value types shared by the codec and the document stores.

mod comment_style;
mod key_path;

pub use comment_style::{CommentStyle, StyleDescriptor, MARKER};
pub use key_path::{KeyPath, DELIMITER};
