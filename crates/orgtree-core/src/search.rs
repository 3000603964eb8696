//! Field search over a [`NodeIndex`].

use crate::index::{Node, NodeId, NodeIndex};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    Id,
    #[default]
    Name,
    ManagerId,
}

impl SearchField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::ManagerId => "managerId",
        }
    }

    fn value(self, node: &Node) -> Option<&str> {
        match self {
            Self::Id => Some(node.id()),
            Self::Name => Some(node.name()),
            Self::ManagerId => node.manager_id(),
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "managerid" | "manager" | "manager_id" => Ok(Self::ManagerId),
            _ => Err(()),
        }
    }
}

impl NodeIndex {
    /// Case-insensitive substring search over one field.
    ///
    /// Results follow index order. A blank query matches nothing, and `ManagerId` searches skip
    /// nodes without a manager reference.
    pub fn search(&self, query: &str, field: SearchField) -> Vec<NodeId> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|(_, node)| {
                field
                    .value(node)
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// [`NodeIndex::search`] resolved to nodes.
    pub fn search_nodes(&self, query: &str, field: SearchField) -> Vec<&Node> {
        self.search(query, field)
            .into_iter()
            .map(|id| &self[id])
            .collect()
    }
}
