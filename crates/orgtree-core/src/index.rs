//! Arena of org-chart nodes addressed by stable [`NodeId`] handles.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{Error, Result};

/// Deepest subtree [`NodeIndex::to_tree_value`] will nest. Deeper hierarchies go through
/// [`NodeIndex::to_flat_values`].
pub const MAX_TREE_EXPORT_DEPTH: usize = 256;

/// Handle to a node inside one [`NodeIndex`].
///
/// Handles are positions in the index's insertion order. They are only meaningful for the index
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub(crate) id: String,
    pub(crate) manager_id: Option<String>,
    pub(crate) name: String,
    pub(crate) children: Vec<NodeId>,
    #[serde(skip)]
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(id: String, manager_id: Option<String>, name: String) -> Self {
        Self {
            id,
            manager_id,
            name,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The manager reference exactly as read, even when it did not resolve.
    pub fn manager_id(&self) -> Option<&str> {
        self.manager_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct reports, in input record order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The manager this node was linked under, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

pub(crate) type NodeMap = IndexMap<String, Node, FxBuildHasher>;

/// Immutable id → node mapping produced by [`crate::HierarchyBuilder`].
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    nodes: NodeMap,
    roots: Vec<NodeId>,
}

impl NodeIndex {
    pub(crate) fn from_parts(nodes: NodeMap, roots: Vec<NodeId>) -> Self {
        Self { nodes, roots }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.nodes.get_index_of(id).map(NodeId::new)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get_index(id.0).map(|(_, node)| node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .values()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// Root candidates: true roots, unreferenced nodes and cycle members, in first-discovered
    /// order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_root_candidate(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.parent.is_none())
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Resolves the node's `managerId` against the index, whether or not it was linked.
    pub fn manager_of(&self, id: NodeId) -> Option<NodeId> {
        let manager_id = self.get(id)?.manager_id.as_deref()?;
        self.lookup(manager_id)
    }

    /// Linked ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.parent_of(id);
        while let Some(p) = cur {
            out.push(p);
            cur = self.parent_of(p);
        }
        out
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    /// The node and all its descendants in pre-order, siblings in input order.
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self[id].children.iter().rev().copied());
        }
        out
    }

    pub fn descendant_count(&self, root: NodeId) -> usize {
        self.subtree(root).len().saturating_sub(1)
    }

    /// Pre-order walk paired with each node's depth below `root`.
    fn subtree_with_depth(&self, root: NodeId) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            stack.extend(self[id].children.iter().rev().map(|c| (*c, depth + 1)));
        }
        out
    }

    fn node_fields(node: &Node) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(node.id));
        if let Some(manager_id) = &node.manager_id {
            map.insert("managerId".to_string(), json!(manager_id));
        }
        map.insert("name".to_string(), json!(node.name));
        map
    }

    /// Nested JSON export of a subtree: `{ id, managerId?, name, children: [...] }`.
    ///
    /// Returns [`Error::TreeTooDeep`] when the subtree is deeper than
    /// [`MAX_TREE_EXPORT_DEPTH`]. An unknown `root` exports as `null`.
    pub fn to_tree_value(&self, root: NodeId) -> Result<Value> {
        let order = self.subtree_with_depth(root);
        if order.is_empty() {
            return Ok(Value::Null);
        }
        let depth = order.iter().map(|(_, d)| *d).max().unwrap_or_default();
        if depth > MAX_TREE_EXPORT_DEPTH {
            return Err(Error::TreeTooDeep {
                id: self[root].id.clone(),
                depth,
                limit: MAX_TREE_EXPORT_DEPTH,
            });
        }

        // Reverse pre-order finishes every child before its parent.
        let mut built: FxHashMap<NodeId, Value> = FxHashMap::default();
        for (id, _) in order.into_iter().rev() {
            let node = &self[id];
            let children = node
                .children
                .iter()
                .filter_map(|c| built.remove(c))
                .collect();
            let mut map = Self::node_fields(node);
            map.insert("children".to_string(), Value::Array(children));
            built.insert(id, Value::Object(map));
        }
        Ok(built.remove(&root).unwrap_or(Value::Null))
    }

    /// Flat JSON export of a subtree in pre-order: one `{ id, managerId?, name, children: [ids] }`
    /// entry per node. Depth does not matter here.
    pub fn to_flat_values(&self, root: NodeId) -> Vec<Value> {
        self.subtree(root)
            .into_iter()
            .map(|id| {
                let node = &self[id];
                let mut map = Self::node_fields(node);
                map.insert(
                    "children".to_string(),
                    Value::Array(
                        node.children
                            .iter()
                            .map(|c| json!(self[*c].id))
                            .collect(),
                    ),
                );
                Value::Object(map)
            })
            .collect()
    }
}

impl std::ops::Index<NodeId> for NodeIndex {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
