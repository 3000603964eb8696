#![forbid(unsafe_code)]

//! `orgtree` rebuilds an organisational tree from flat employee records and drives a zoomable
//! view over it.
//!
//! # Features
//!
//! - `view`: enable re-rooting, search state and viewport fit transforms (`orgtree::view`)

pub use orgtree_core::*;

#[cfg(feature = "view")]
pub mod view {
    pub use orgtree_view::layout::extents;
    pub use orgtree_view::{
        Bounds, FitTransform, Navigation, NodeExtent, PositionedNode, TidyTreeLayout, TreeLayout,
        ViewConfig, ViewState, ViewStateController, Viewport, compute_fit_transform, geom,
    };
    pub use orgtree_view::Error as ViewError;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Build(#[from] orgtree_core::Error),
        #[error(transparent)]
        View(#[from] ViewError),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Parses JSON records, builds the index and reports problems in one call.
    pub fn build_from_json(
        text: &str,
    ) -> Result<(orgtree_core::NodeIndex, orgtree_core::BuildReport)> {
        let records = orgtree_core::records_from_json(text)?;
        Ok(orgtree_core::build(&records)?)
    }

    /// Lays out the subtree under `root` and fits it into `viewport`.
    pub fn fit_subtree(
        index: &orgtree_core::NodeIndex,
        root: orgtree_core::NodeId,
        layout: &dyn TreeLayout,
        viewport: Viewport,
        config: &ViewConfig,
    ) -> FitTransform {
        let placed = layout.layout(index, root);
        compute_fit_transform(&extents(&placed), viewport, config)
    }

    /// Loads a freshly built index into a new controller.
    pub fn load_view<'idx>(
        index: &'idx orgtree_core::NodeIndex,
        config: ViewConfig,
    ) -> Result<ViewStateController<'idx>> {
        let mut view = ViewStateController::new(config);
        view.load(index)?;
        Ok(view)
    }
}
