//! Layout collaborator seam.
//!
//! Any tree layout can drive the camera as long as it returns one [`NodeExtent`] per visible
//! node. [`TidyTreeLayout`] is a small deterministic top-down layout for headless use and tests.

use crate::model::NodeExtent;
use orgtree_core::{NodeId, NodeIndex};
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: NodeId,
    /// Depth relative to the layout root.
    pub depth: usize,
    pub extent: NodeExtent,
}

pub trait TreeLayout {
    /// Positions `root` and all of its descendants. Unknown roots yield an empty layout.
    fn layout(&self, index: &NodeIndex, root: NodeId) -> Vec<PositionedNode>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidyTreeLayout {
    pub node_width: f64,
    pub node_height: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
}

impl Default for TidyTreeLayout {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 72.0,
            horizontal_gap: 24.0,
            vertical_gap: 56.0,
        }
    }
}

impl TreeLayout for TidyTreeLayout {
    fn layout(&self, index: &NodeIndex, root: NodeId) -> Vec<PositionedNode> {
        // Pre-order visits every parent before its children, so depths resolve front to back and
        // centring resolves back to front.
        let order = index.subtree(root);
        if order.is_empty() {
            return Vec::new();
        }

        let mut depth: FxHashMap<NodeId, usize> = FxHashMap::default();
        depth.insert(root, 0);
        for &id in &order {
            let d = depth.get(&id).copied().unwrap_or_default();
            for child in index[id].children() {
                depth.insert(*child, d + 1);
            }
        }

        let slot_width = self.node_width + self.horizontal_gap;
        let mut x: FxHashMap<NodeId, f64> = FxHashMap::default();
        let mut next_slot = 0usize;
        for &id in &order {
            if index[id].children().is_empty() {
                x.insert(id, next_slot as f64 * slot_width);
                next_slot += 1;
            }
        }
        for &id in order.iter().rev() {
            let children = index[id].children();
            let (Some(first), Some(last)) = (children.first(), children.last()) else {
                continue;
            };
            let x0 = x.get(first).copied().unwrap_or_default();
            let x1 = x.get(last).copied().unwrap_or_default();
            x.insert(id, (x0 + x1) / 2.0);
        }

        let row_height = self.node_height + self.vertical_gap;
        order
            .into_iter()
            .map(|id| {
                let d = depth.get(&id).copied().unwrap_or_default();
                PositionedNode {
                    id,
                    depth: d,
                    extent: NodeExtent::new(
                        x.get(&id).copied().unwrap_or_default(),
                        d as f64 * row_height,
                        self.node_width,
                        self.node_height,
                    ),
                }
            })
            .collect()
    }
}

/// Extents only, in layout order.
pub fn extents(positioned: &[PositionedNode]) -> Vec<NodeExtent> {
    positioned.iter().map(|p| p.extent).collect()
}
