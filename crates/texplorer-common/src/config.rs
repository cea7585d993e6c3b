use crate::limits::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Options consumed by the walker and the merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeConfig {
    /// Nodes deeper than this are replaced with a `max_depth` sentinel.
    pub max_depth: u32,
    /// Emit declared, named types below the root as location references
    /// instead of inlining them.
    pub reference_defined_types: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            reference_defined_types: false,
        }
    }
}

impl TreeConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_reference_defined_types(mut self, enabled: bool) -> Self {
        self.reference_defined_types = enabled;
        self
    }
}
