use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Label identifying one published version of the archive.
///
/// Versions are opaque labels assigned upstream (release names, snapshot
/// tags); jarview never orders or interprets them beyond equality.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    /// Create a version label from an already-validated string.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Parse a version label, rejecting empty or whitespace-only input.
    pub fn parse(label: &str) -> Result<Self, TypeError> {
        if label.trim().is_empty() {
            return Err(TypeError::EmptyVersion);
        }
        Ok(Self(label.to_owned()))
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionId({})", self.0)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionId {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}
