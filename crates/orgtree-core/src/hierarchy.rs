//! Two-pass flat-to-tree reconstruction.
//!
//! 1. Node pass: one node per record with a usable identifier. A repeated identifier replaces
//!    the earlier node entirely and moves to the later record's position.
//! 2. Link pass: every node whose manager resolves is appended to that manager's children in
//!    index order. Unresolved references and manager cycles leave the node unlinked, so it
//!    becomes a root candidate with its `managerId` intact.

use crate::index::{Node, NodeId, NodeIndex, NodeMap};
use crate::record::{ID_FIELDS, MANAGER_FIELDS, NAME_FIELDS, Record};
use crate::{Error, Result};
use serde::Serialize;

pub const DEFAULT_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Display name for records without any name field.
    pub default_name: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedManager {
    pub node_id: String,
    pub manager_id: String,
}

/// Non-fatal findings collected while building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub records_seen: usize,
    pub skipped_without_id: usize,
    /// Identifiers that were overwritten by a later record, once per overwrite.
    pub duplicate_ids: Vec<String>,
    pub unresolved_managers: Vec<UnresolvedManager>,
    pub cycle_members: Vec<String>,
}

impl BuildReport {
    pub fn has_warnings(&self) -> bool {
        self.skipped_without_id > 0
            || !self.duplicate_ids.is_empty()
            || !self.unresolved_managers.is_empty()
            || !self.cycle_members.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    options: BuildOptions,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn build(&self, records: &[Record]) -> Result<(NodeIndex, BuildReport)> {
        let mut report = BuildReport {
            records_seen: records.len(),
            ..Default::default()
        };

        let mut nodes = self.node_pass(records, &mut report);
        if nodes.is_empty() {
            return Err(Error::EmptyInput {
                records_seen: report.records_seen,
            });
        }

        let roots = link_pass(&mut nodes, &mut report);

        tracing::debug!(
            nodes = nodes.len(),
            roots = roots.len(),
            skipped = report.skipped_without_id,
            duplicates = report.duplicate_ids.len(),
            unresolved = report.unresolved_managers.len(),
            cycle_members = report.cycle_members.len(),
            "hierarchy built"
        );

        Ok((NodeIndex::from_parts(nodes, roots), report))
    }

    fn node_pass(&self, records: &[Record], report: &mut BuildReport) -> NodeMap {
        let mut nodes = NodeMap::default();
        for (row, record) in records.iter().enumerate() {
            let Some(id) = record.first_of(ID_FIELDS) else {
                tracing::warn!(row, "record has no identifier; skipped");
                report.skipped_without_id += 1;
                continue;
            };
            let manager_id = record.first_of(MANAGER_FIELDS).map(str::to_string);
            let name = record
                .first_of(NAME_FIELDS)
                .unwrap_or(self.options.default_name.as_str())
                .to_string();

            if nodes.shift_remove(id).is_some() {
                tracing::warn!(id, row, "duplicate identifier; later record wins");
                report.duplicate_ids.push(id.to_string());
            }
            nodes.insert(id.to_string(), Node::new(id.to_string(), manager_id, name));
        }
        nodes
    }
}

fn link_pass(nodes: &mut NodeMap, report: &mut BuildReport) -> Vec<NodeId> {
    let managers: Vec<Option<usize>> = nodes
        .values()
        .map(|n| {
            n.manager_id
                .as_deref()
                .and_then(|m| nodes.get_index_of(m))
        })
        .collect();
    let in_cycle = cycle_members(&managers);

    let mut roots = Vec::new();
    for (idx, manager) in managers.iter().enumerate() {
        match manager {
            Some(m) if !in_cycle[idx] => {
                nodes[*m].children.push(NodeId::new(idx));
                nodes[idx].parent = Some(NodeId::new(*m));
            }
            Some(_) => {
                let node = &nodes[idx];
                tracing::warn!(
                    id = node.id.as_str(),
                    manager_id = node.manager_id.as_deref().unwrap_or_default(),
                    "manager chain loops back to this node; treated as a root"
                );
                report.cycle_members.push(node.id.clone());
                roots.push(NodeId::new(idx));
            }
            None => {
                let node = &nodes[idx];
                if let Some(manager_id) = &node.manager_id {
                    tracing::warn!(
                        id = node.id.as_str(),
                        manager_id = manager_id.as_str(),
                        "manager not found; treated as a root"
                    );
                    report.unresolved_managers.push(UnresolvedManager {
                        node_id: node.id.clone(),
                        manager_id: manager_id.clone(),
                    });
                }
                roots.push(NodeId::new(idx));
            }
        }
    }
    roots
}

/// Marks every node that sits on a manager cycle.
///
/// Each node has at most one outgoing manager edge, so one walk per unvisited node finds every
/// cycle in linear time.
fn cycle_members(managers: &[Option<usize>]) -> Vec<bool> {
    const UNVISITED: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    let mut state = vec![UNVISITED; managers.len()];
    let mut in_cycle = vec![false; managers.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..managers.len() {
        if state[start] != UNVISITED {
            continue;
        }
        path.clear();
        let mut cur = Some(start);
        while let Some(v) = cur {
            match state[v] {
                UNVISITED => {
                    state[v] = ON_PATH;
                    path.push(v);
                    cur = managers[v];
                }
                ON_PATH => {
                    if let Some(pos) = path.iter().position(|&p| p == v) {
                        for &member in &path[pos..] {
                            in_cycle[member] = true;
                        }
                    }
                    break;
                }
                _ => break,
            }
        }
        for &v in &path {
            state[v] = DONE;
        }
    }
    in_cycle
}
