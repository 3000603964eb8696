#![forbid(unsafe_code)]

//! Navigation and camera state over an [`orgtree_core::NodeIndex`].
//!
//! Node placement is left to a [`layout::TreeLayout`] implementation; this crate only consumes
//! the resulting extents to fit the visible subtree into a viewport.

pub mod config;
pub mod fit;
pub mod geom;
pub mod layout;
pub mod model;
pub mod view_state;

pub use config::ViewConfig;
pub use fit::compute_fit_transform;
pub use layout::{PositionedNode, TidyTreeLayout, TreeLayout};
pub use model::{Bounds, FitTransform, NodeExtent, Viewport};
pub use view_state::{Navigation, ViewState, ViewStateController};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no hierarchy is loaded")]
    NotLoaded,
    #[error("the loaded hierarchy has no nodes")]
    EmptyIndex,
    #[error("node handle {index} does not belong to the loaded hierarchy")]
    UnknownNode { index: usize },
    #[error("no node with id `{id}`")]
    UnknownId { id: String },
    #[error("invalid view config: {message}")]
    InvalidConfig { message: String },
    #[error("view config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
