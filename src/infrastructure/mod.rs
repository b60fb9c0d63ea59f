//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic writes and data root resolution
//! - `documents/` - `DocumentStore` implementations (commented text, JSON)

pub mod documents;
pub mod fs;

pub use documents::{JsonDocument, YamlDocument};
pub use fs::{atomic_write, read_optional, DataRoot, DATA_DIR_VAR};
