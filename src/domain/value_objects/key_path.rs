//! Key Path Value Object
//!
//! A dot-delimited address into a hierarchical document, e.g. `Settings.Locale`.

use std::fmt;
use std::str::FromStr;

use crate::validate::{self, ValidationError};

pub const DELIMITER: char = '.';

/// Validated, non-empty key path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(path: &str) -> Result<Self, ValidationError> {
        validate::ensure_or(!path.trim().is_empty(), "key path must not be empty")?;

        let segments: Vec<String> = path
            .split(DELIMITER)
            .map(|segment| segment.trim().to_string())
            .collect();

        validate::ensure_or(
            segments.iter().all(|s| !s.is_empty()),
            &format!("key path '{}' has an empty segment", path),
        )?;

        Ok(Self { segments })
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        validate::ensure_or(!segments.is_empty(), "key path must not be empty")?;
        validate::ensure_or(
            segments
                .iter()
                .all(|s| !s.trim().is_empty() && !s.contains(DELIMITER)),
            "key path segments must be non-empty and contain no delimiter",
        )?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, the key's own name.
    pub fn leaf(&self) -> &str {
        // Non-empty by construction.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn parent(&self) -> Option<KeyPath> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn child(&self, segment: &str) -> Result<KeyPath, ValidationError> {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self::from_segments(segments)
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for KeyPath {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
