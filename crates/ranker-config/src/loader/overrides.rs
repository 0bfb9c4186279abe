//! Command-line overrides
//!
//! Unlike [`super::merge`], every field that is set is applied, even when it
//! equals the built-in default.

use crate::Config;

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub top_k: Option<usize>,
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(top_k) = self.top_k {
            config.search.top_k = top_k;
        }
        if let Some(size) = self.chunk_size {
            config.chunking.chunk_size = size;
        }
        if let Some(overlap) = self.chunk_overlap {
            config.chunking.chunk_overlap = overlap;
        }
    }
}
