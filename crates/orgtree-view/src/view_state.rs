//! Current root selection, parent navigation and live search state.
//!
//! The controller borrows the [`NodeIndex`] it navigates, so it cannot outlive a rebuild: a new
//! upload means a new index and a fresh [`ViewStateController::load`].

use crate::config::ViewConfig;
use crate::fit::compute_fit_transform;
use crate::model::{FitTransform, NodeExtent, Viewport};
use crate::{Error, Result};
use orgtree_core::{Node, NodeId, NodeIndex, SearchField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Loaded,
}

/// Outcome of [`ViewStateController::go_to_parent`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(NodeId),
    NoOp,
}

#[derive(Debug, Clone)]
struct Loaded<'idx> {
    index: &'idx NodeIndex,
    root: NodeId,
}

#[derive(Debug, Clone, Default)]
pub struct ViewStateController<'idx> {
    config: ViewConfig,
    loaded: Option<Loaded<'idx>>,
    search_query: String,
    search_field: SearchField,
    search_results: Vec<NodeId>,
}

impl<'idx> ViewStateController<'idx> {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn state(&self) -> ViewState {
        if self.loaded.is_some() {
            ViewState::Loaded
        } else {
            ViewState::Empty
        }
    }

    /// Points the controller at a freshly built index. The initial root is the first root
    /// candidate.
    pub fn load(&mut self, index: &'idx NodeIndex) -> Result<NodeId> {
        let root = index
            .roots()
            .first()
            .copied()
            .or_else(|| index.iter().next().map(|(id, _)| id))
            .ok_or(Error::EmptyIndex)?;
        self.loaded = Some(Loaded { index, root });
        self.clear_search();
        tracing::debug!(nodes = index.len(), root = index[root].id(), "view loaded");
        Ok(root)
    }

    pub fn reset(&mut self) {
        self.loaded = None;
        self.clear_search();
        tracing::debug!("view reset");
    }

    pub fn index(&self) -> Option<&'idx NodeIndex> {
        self.loaded.as_ref().map(|l| l.index)
    }

    pub fn current_root(&self) -> Option<NodeId> {
        self.loaded.as_ref().map(|l| l.root)
    }

    /// The current root as a reference into the index (never a copy).
    pub fn current_root_node(&self) -> Option<&'idx Node> {
        let loaded = self.loaded.as_ref()?;
        loaded.index.get(loaded.root)
    }

    /// Re-roots the view. Selecting a node commits the search, so query and results are cleared.
    pub fn select_root(&mut self, node: NodeId) -> Result<()> {
        let loaded = self.loaded.as_mut().ok_or(Error::NotLoaded)?;
        if !loaded.index.contains(node) {
            return Err(Error::UnknownNode {
                index: node.index(),
            });
        }
        loaded.root = node;
        tracing::debug!(root = loaded.index[node].id(), "root selected");
        self.clear_search();
        Ok(())
    }

    /// [`Self::select_root`] by identifier.
    pub fn select_root_by_id(&mut self, id: &str) -> Result<NodeId> {
        let index = self.index().ok_or(Error::NotLoaded)?;
        let node = index.lookup(id).ok_or_else(|| Error::UnknownId { id: id.to_string() })?;
        self.select_root(node)?;
        Ok(node)
    }

    pub fn can_go_to_parent(&self) -> bool {
        self.parent_target().is_some()
    }

    /// Moves the root to its manager when the current root's `managerId` resolves.
    pub fn go_to_parent(&mut self) -> Navigation {
        let Some(parent) = self.parent_target() else {
            return Navigation::NoOp;
        };
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.root = parent;
            tracing::debug!(root = loaded.index[parent].id(), "moved to parent");
        }
        Navigation::Moved(parent)
    }

    fn parent_target(&self) -> Option<NodeId> {
        let loaded = self.loaded.as_ref()?;
        loaded.index.manager_of(loaded.root)
    }

    pub fn set_search(&mut self, query: &str, field: SearchField) -> &[NodeId] {
        self.search_query = query.to_string();
        self.search_field = field;
        self.search_results = match &self.loaded {
            Some(loaded) => loaded.index.search(query, field),
            None => Vec::new(),
        };
        &self.search_results
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.search_results.clear();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_field(&self) -> SearchField {
        self.search_field
    }

    pub fn search_results(&self) -> &[NodeId] {
        &self.search_results
    }

    /// The current root and its descendants, in pre-order.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        match &self.loaded {
            Some(loaded) => loaded.index.subtree(loaded.root),
            None => Vec::new(),
        }
    }

    pub fn fit(&self, extents: &[NodeExtent], viewport: Viewport) -> FitTransform {
        compute_fit_transform(extents, viewport, &self.config)
    }
}
