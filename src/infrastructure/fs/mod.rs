//! File System Helpers
//!
//! Atomic writes and data-root resolution shared by the document stores.

mod data_root;
mod writer;

pub use data_root::{DataRoot, DATA_DIR_VAR};
pub use writer::{atomic_write, read_optional};
