use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use jarview_types::ClassName;

use crate::error::ArchiveResult;
use crate::snapshot::ArchiveSnapshot;

/// Decompiled source text for one logical class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompiledSource {
    /// The logical class the source belongs to.
    pub class_name: ClassName,
    /// The decompiled source text.
    pub text: String,
}

impl DecompiledSource {
    pub fn new(class_name: ClassName, text: impl Into<String>) -> Self {
        Self {
            class_name,
            text: text.into(),
        }
    }
}

/// Transformer from class bytes to source text.
///
/// The real implementation wraps an external decompiler; the diff core only
/// drives it with the same selected-version signal that feeds aggregation.
/// Calls may be CPU-bound and slow; callers cancel by dropping the future.
#[async_trait]
pub trait Decompiler: Send + Sync {
    /// Produce source text for one logical class of a snapshot.
    async fn decompile(
        &self,
        snapshot: &ArchiveSnapshot,
        class_name: &ClassName,
    ) -> ArchiveResult<DecompiledSource>;
}
