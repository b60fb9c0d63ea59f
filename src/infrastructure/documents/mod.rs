//! Document store implementations
//!
//! - `YamlDocument` - indented `key: value` settings file that keeps comments
//! - `JsonDocument` - one JSON object per file, used by `DirectoryStore`

mod json;
mod tree;
mod yaml;
mod yaml_format;

pub use json::JsonDocument;
pub use yaml::YamlDocument;
