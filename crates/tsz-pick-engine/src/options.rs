//! Per-query options.

use serde::Deserialize;
use tsz_pick_common::limits;

use crate::record::Omit;

/// Output bounds applied by the fact aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickLimits {
    /// Applied to call and construct signatures separately
    pub max_signatures: usize,
    pub max_properties: usize,
    pub max_declarations: usize,
    /// In UTF-16 code units, ellipsis included
    pub max_snippet_len: usize,
}

impl Default for PickLimits {
    fn default() -> Self {
        Self {
            max_signatures: limits::MAX_SIGNATURES,
            max_properties: limits::MAX_PROPERTIES,
            max_declarations: limits::MAX_DECLARATIONS,
            max_snippet_len: limits::MAX_SNIPPET_LEN,
        }
    }
}

/// Options for a single query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickOptions {
    pub limits: PickLimits,
    /// Lists to leave empty in the result
    pub omit: Omit,
}

impl PickOptions {
    pub fn with_omit(mut self, omit: Omit) -> Self {
        self.omit = omit;
        self
    }

    pub fn with_limits(mut self, limits: PickLimits) -> Self {
        self.limits = limits;
        self
    }
}
