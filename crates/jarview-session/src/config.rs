use serde::{Deserialize, Serialize};

use jarview_types::{ClassName, VersionId};

/// Configuration for a [`CompareSession`](crate::CompareSession).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Version initially selected on the current side, if any.
    pub initial_version: Option<VersionId>,
    /// Class initially opened for viewing, if any.
    pub initial_class: Option<ClassName>,
    /// Whether the diff view starts enabled.
    pub diff_view: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_version: None,
            initial_class: None,
            diff_view: false,
        }
    }
}
