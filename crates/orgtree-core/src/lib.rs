#![forbid(unsafe_code)]

//! Org-chart reconstruction (headless).
//!
//! Takes a flat list of employee records, each naming itself and its manager, and rebuilds the
//! implied tree as an arena of nodes addressed by [`NodeId`] handles.
//!
//! Design goals:
//! - all-or-nothing builds: a failed build never hands out a partial index
//! - no silent data loss: unresolved managers and cycles become root candidates and are reported
//! - deterministic ordering: every listing follows input record order

pub mod error;
pub mod hierarchy;
pub mod index;
pub mod record;
pub mod search;

pub use error::{Error, Result};
pub use hierarchy::{BuildOptions, BuildReport, HierarchyBuilder, UnresolvedManager};
pub use index::{MAX_TREE_EXPORT_DEPTH, Node, NodeId, NodeIndex};
pub use record::{Record, records_from_json};
pub use search::SearchField;

/// Builds an index with the default [`BuildOptions`].
pub fn build(records: &[Record]) -> Result<(NodeIndex, BuildReport)> {
    HierarchyBuilder::new().build(records)
}

#[cfg(test)]
mod tests;
