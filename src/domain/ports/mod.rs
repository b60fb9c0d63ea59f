//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod document_store;

pub use document_store::{DocumentStore, FileDocument};
