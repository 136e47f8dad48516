use serde::{Deserialize, Serialize};

/// Knobs for one import pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportOptions {
    /// Reject a `filterColumn` that declares a second filter kind instead of
    /// letting the last one replace the first.
    pub strict_filter_kinds: bool,
    /// Maximum nesting below the `autoFilter` element, counting skipped subtrees.
    pub max_depth: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            strict_filter_kinds: false,
            max_depth: 64,
        }
    }
}

impl ImportOptions {
    pub fn strict() -> Self {
        Self {
            strict_filter_kinds: true,
            ..Self::default()
        }
    }
}
