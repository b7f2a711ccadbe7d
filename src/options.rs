//! Parser limits, carried in the input document so callers can tighten them
//! for untrusted markup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    /// Transform functions folded per attribute; the rest are ignored.
    #[serde(default = "default_max_transform_functions")]
    pub max_transform_functions: usize,
    /// Segments kept per path `d` attribute.
    #[serde(default = "default_max_path_segments")]
    pub max_path_segments: usize,
}

fn default_max_transform_functions() -> usize {
    256
}

fn default_max_path_segments() -> usize {
    100_000
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_transform_functions: default_max_transform_functions(),
            max_path_segments: default_max_path_segments(),
        }
    }
}
