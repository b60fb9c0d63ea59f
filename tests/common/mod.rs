//! Common test utilities for Marginalia contract tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated test environment with temp directories
//! - Fixtures: Reusable settings file content

#![allow(dead_code)]


pub use env::*;
pub use fixtures::*;
