mod error;
mod measure;
mod place;
pub(crate) mod types;
pub use error::LayoutError;
pub use types::*;

use measure::measure_subtree;
use place::{Axes, Placer};

use crate::config::LayoutConfig;
use crate::geometry::Rect;
use crate::model::{ContentProvider, ModelNode};
use std::collections::BTreeSet;

/// Lays out the visible part of the tree rooted at `root`.
///
/// Runs a post-order sizing pass followed by a pre-order placement pass. The
/// result depends only on the arguments: the same tree, sizes and config
/// always produce bit-identical geometry. `None` yields an empty tree with a
/// zero-size bounding box.
pub fn compute_layout<N, P>(
    root: Option<&N>,
    provider: &P,
    config: &LayoutConfig,
) -> Result<LayoutTree<N::Id>, LayoutError>
where
    N: ModelNode,
    P: ContentProvider<N> + ?Sized,
{
    let _span = tracing::debug_span!("compute_layout", orientation = ?config.orientation).entered();
    config.validate()?;

    let Some(root) = root else {
        tracing::debug!("empty model, nothing to lay out");
        return Ok(LayoutTree::empty(config.orientation));
    };

    let mut seen = BTreeSet::new();
    let measured = measure_subtree(root, provider, config, &mut seen)?;
    let root_id = measured.id.clone();

    let axes = Axes::new(
        config.orientation,
        measured.subtree_depth,
        config.content_margin,
    );
    let mut placer = Placer::new(config, axes);
    let subtree_frame = placer.place(measured, 0.0, 0.0, None, 0);
    let bounds = Rect::new(
        0.0,
        0.0,
        subtree_frame.width + config.content_margin * 2.0,
        subtree_frame.height + config.content_margin * 2.0,
    );

    tracing::debug!(
        nodes = placer.nodes.len(),
        edges = placer.edges.len(),
        width = bounds.width,
        height = bounds.height,
        "layout complete"
    );

    Ok(LayoutTree {
        root: Some(root_id),
        nodes: placer.nodes,
        edges: placer.edges,
        bounds,
        orientation: config.orientation,
    })
}
