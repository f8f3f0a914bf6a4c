//! Host-side model boundary.
//!
//! The layout engine reads a tree through two small capability traits:
//! [`ModelNode`] (identity, ordered children, collapse flag) and
//! [`ContentProvider`] (intrinsic size per node, collapse predicate). Neither
//! is ever asked to mutate anything.
//!
//! [`TreeNode`] is a ready-made owned model for hosts that do not already have
//! one, and for fixtures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{ContentSize, Size};

/// A node in the host's model tree.
///
/// Children are yielded in display order. The model must be acyclic; a cycle
/// recurses without bound.
pub trait ModelNode {
    /// Stable key used to match nodes across layout passes. Its `Display`
    /// form names the node in errors.
    type Id: Clone + Ord + fmt::Debug + fmt::Display;

    fn identity(&self) -> Self::Id;

    fn children(&self) -> impl Iterator<Item = &Self>;

    fn is_collapsed(&self) -> bool {
        false
    }
}

/// Supplies what a node displays, reduced to the two facts layout needs.
pub trait ContentProvider<N: ModelNode> {
    fn content_size(&self, node: &N) -> ContentSize;

    /// Defaults to the node's own flag.
    fn is_collapsed(&self, node: &N) -> bool {
        node.is_collapsed()
    }
}

impl<N, F> ContentProvider<N> for F
where
    N: ModelNode,
    F: Fn(&N) -> ContentSize,
{
    fn content_size(&self, node: &N) -> ContentSize {
        self(node)
    }
}

/// Every node gets the same size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSize(pub Size);

impl<N: ModelNode> ContentProvider<N> for UniformSize {
    fn content_size(&self, _node: &N) -> ContentSize {
        self.0
    }
}

/// Reads [`TreeNode::size`], falling back to a default for nodes without one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetSizes {
    pub fallback: Size,
}

impl<K: Clone + Ord + fmt::Debug + fmt::Display> ContentProvider<TreeNode<K>> for PresetSizes {
    fn content_size(&self, node: &TreeNode<K>) -> ContentSize {
        node.size.unwrap_or(self.fallback)
    }
}

/// Nodes that carry a text label; used by [`crate::label::LabelSizer`].
pub trait Labeled {
    fn label(&self) -> &str;

    /// Size that overrides label measurement, if the node fixes one.
    fn preset_size(&self) -> Option<Size> {
        None
    }
}

/// Owned, serde-friendly model tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<K> {
    pub id: K,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode<K>>,
}

impl<K> TreeNode<K> {
    pub fn new(id: K) -> Self {
        Self {
            id,
            label: None,
            size: None,
            collapsed: false,
            children: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn with_child(mut self, child: TreeNode<K>) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode<K>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Number of nodes in this subtree, hidden ones included.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::len).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<K: PartialEq> TreeNode<K> {
    pub fn find(&self, id: &K) -> Option<&TreeNode<K>> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &K) -> Option<&mut TreeNode<K>> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Detaches the descendant with `id` (never `self`) and returns it.
    pub fn remove(&mut self, id: &K) -> Option<TreeNode<K>> {
        if let Some(idx) = self.children.iter().position(|child| &child.id == id) {
            return Some(self.children.remove(idx));
        }
        self.children.iter_mut().find_map(|child| child.remove(id))
    }
}

impl<K: Clone + Ord + fmt::Debug + fmt::Display> ModelNode for TreeNode<K> {
    type Id = K;

    fn identity(&self) -> K {
        self.id.clone()
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

impl<K> Labeled for TreeNode<K> {
    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    fn preset_size(&self) -> Option<Size> {
        self.size
    }
}
