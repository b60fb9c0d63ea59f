//! Domain Layer
//!
//! Pure types with no file I/O: the comment model, its styles, key paths,
//! and the document store port.
//!
//! ## Structure
//!
//! - `entities/` - `Comment`
//! - `value_objects/` - `CommentStyle`, `KeyPath`
//! - `ports/` - `DocumentStore`

pub mod entities;
pub mod ports;
pub mod value_objects;
