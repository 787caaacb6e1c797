//! Style resolution: the cascade and per-element resolved styles.

mod cascade;
mod resolved;

pub use cascade::resolve;
pub use resolved::{
    length_to_px, Provenance, ResolvedStyle, Sourced, TextDecoration, PT_TO_PX, ROOT_FONT_SIZE,
};

use crate::dom::NodeId;

/// Resolved styles for every element in a document, indexed by node ID.
///
/// Non-element nodes have no entry.
#[derive(Debug)]
pub struct StyleMap {
    styles: Vec<Option<ResolvedStyle>>,
}

impl StyleMap {
    pub(crate) fn from_vec(styles: Vec<Option<ResolvedStyle>>) -> Self {
        Self { styles }
    }

    /// Get the resolved style for an element.
    pub fn get(&self, id: NodeId) -> Option<&ResolvedStyle> {
        if id.is_none() {
            return None;
        }
        self.styles.get(id.0 as usize).and_then(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
