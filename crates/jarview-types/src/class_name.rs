use std::fmt;

use serde::{Deserialize, Serialize};

/// File suffix marking an archive entry as a compiled class.
pub const CLASS_SUFFIX: &str = ".class";

/// Separator the compiler inserts between an outer class and its nested
/// classes in entry paths (`net/minecraft/Foo$Bar.class`).
pub const NESTED_SEPARATOR: char = '$';

/// Logical class name: one outer class together with all classes nested
/// inside it.
///
/// Derived from an entry path by stripping [`CLASS_SUFFIX`] and truncating at
/// the first [`NESTED_SEPARATOR`], so `a/Foo.class`, `a/Foo$Bar.class`, and
/// `a/Foo$Bar$Baz.class` all collapse to the key `a/Foo`.
///
/// The derivation is deliberately permissive: it never checks that the
/// truncated prefix names a real outer class, so a stray `$`-bearing path
/// simply keys under its own (degenerate but harmless) prefix.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(String);

impl ClassName {
    /// Create a logical class name directly, without path derivation.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derive the logical class name for an archive entry path.
    ///
    /// Returns `None` for paths that are not class files (wrong suffix),
    /// which the aggregator skips.
    pub fn from_entry_path(path: &str) -> Option<Self> {
        let stem = path.strip_suffix(CLASS_SUFFIX)?;
        let logical = match stem.find(NESTED_SEPARATOR) {
            Some(idx) => &stem[..idx],
            None => stem,
        };
        Some(Self(logical.to_owned()))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({})", self.0)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}
