use std::collections::BTreeSet;

use crate::config::LayoutConfig;
use crate::geometry::Size;
use crate::model::{ContentProvider, ModelNode};

use super::LayoutError;

/// A visible node with its extents resolved, in (breadth, depth) terms.
#[derive(Debug)]
pub(super) struct Measured<K> {
    pub id: K,
    pub breadth: f32,
    pub depth: f32,
    pub subtree_breadth: f32,
    pub subtree_depth: f32,
    pub has_hidden_children: bool,
    pub children: Vec<Measured<K>>,
}

/// Post-order sizing pass. Hidden descendants of collapsed nodes are never
/// visited, so the provider is not asked about them.
pub(super) fn measure_subtree<N, P>(
    node: &N,
    provider: &P,
    config: &LayoutConfig,
    seen: &mut BTreeSet<N::Id>,
) -> Result<Measured<N::Id>, LayoutError>
where
    N: ModelNode,
    P: ContentProvider<N> + ?Sized,
{
    let id = node.identity();
    if seen.contains(&id) {
        return Err(LayoutError::DuplicateIdentity {
            identity: id.to_string(),
        });
    }
    seen.insert(id.clone());

    let size = provider.content_size(node);
    if !size.is_valid() {
        tracing::warn!(identity = %id, width = size.width, height = size.height, "rejecting content size");
        return Err(LayoutError::InvalidContentSize {
            identity: id.to_string(),
            width: size.width,
            height: size.height,
        });
    }
    let (breadth, depth) = oriented_extent(size, config);

    let collapsed = provider.is_collapsed(node);
    let mut children = Vec::new();
    let mut has_hidden_children = false;
    if collapsed {
        has_hidden_children = node.children().next().is_some();
    } else {
        for child in node.children() {
            children.push(measure_subtree(child, provider, config, seen)?);
        }
    }

    let mut subtree_breadth = breadth;
    let mut subtree_depth = depth;
    if !children.is_empty() {
        subtree_breadth = subtree_breadth.max(children_run(&children, config.sibling_spacing));
        let deepest = children
            .iter()
            .map(|child| child.subtree_depth)
            .fold(0.0, f32::max);
        subtree_depth += config.level_spacing + deepest;
    }

    Ok(Measured {
        id,
        breadth,
        depth,
        subtree_breadth,
        subtree_depth,
        has_hidden_children,
        children,
    })
}

/// Breadth of the children laid side by side with sibling spacing between them.
pub(super) fn children_run<K>(children: &[Measured<K>], sibling_spacing: f32) -> f32 {
    if children.is_empty() {
        return 0.0;
    }
    let total: f32 = children.iter().map(|child| child.subtree_breadth).sum();
    total + sibling_spacing * (children.len() as f32 - 1.0)
}

/// Splits a content size into (breadth, depth) for the configured orientation.
pub(super) fn oriented_extent(size: Size, config: &LayoutConfig) -> (f32, f32) {
    if config.orientation.is_vertical() {
        (size.width, size.height)
    } else {
        (size.height, size.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Orientation;
    use crate::model::{TreeNode, UniformSize};

    fn config() -> LayoutConfig {
        LayoutConfig::default()
            .with_orientation(Orientation::Down)
            .with_spacing(10.0, 30.0)
    }

    #[test]
    fn leaf_extent_is_its_content() {
        let leaf = TreeNode::new(1u32);
        let mut seen = BTreeSet::new();
        let measured =
            measure_subtree(&leaf, &UniformSize(Size::new(40.0, 20.0)), &config(), &mut seen)
                .expect("valid");
        assert_eq!(measured.subtree_breadth, 40.0);
        assert_eq!(measured.subtree_depth, 20.0);
    }

    #[test]
    fn parent_extent_sums_children_and_spacing() {
        let root = TreeNode::new(1u32).with_children([TreeNode::new(2), TreeNode::new(3)]);
        let mut seen = BTreeSet::new();
        let measured =
            measure_subtree(&root, &UniformSize(Size::new(40.0, 20.0)), &config(), &mut seen)
                .expect("valid");
        assert_eq!(measured.subtree_breadth, 90.0);
        assert_eq!(measured.subtree_depth, 20.0 + 30.0 + 20.0);
    }

    #[test]
    fn wide_parent_keeps_its_own_breadth() {
        let root = TreeNode::new(1u32)
            .with_size(300.0, 20.0)
            .with_children([TreeNode::new(2), TreeNode::new(3)]);
        let provider = |node: &TreeNode<u32>| node.size.unwrap_or(Size::new(40.0, 20.0));
        let mut seen = BTreeSet::new();
        let measured = measure_subtree(&root, &provider, &config(), &mut seen).expect("valid");
        assert_eq!(measured.subtree_breadth, 300.0);
    }

    #[test]
    fn horizontal_orientation_swaps_axes() {
        let config = config().with_orientation(Orientation::Right);
        assert_eq!(oriented_extent(Size::new(40.0, 20.0), &config), (20.0, 40.0));
    }

    #[test]
    fn collapsed_children_are_not_visited() {
        let root = TreeNode::new(1u32)
            .collapsed(true)
            .with_children([TreeNode::new(2).with_size(-1.0, 5.0)]);
        let provider = |node: &TreeNode<u32>| node.size.unwrap_or(Size::new(10.0, 10.0));
        let mut seen = BTreeSet::new();
        let measured = measure_subtree(&root, &provider, &config(), &mut seen).expect("valid");
        assert!(measured.children.is_empty());
        assert!(measured.has_hidden_children);
        assert_eq!(seen.len(), 1);
    }
}
