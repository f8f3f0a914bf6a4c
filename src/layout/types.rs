use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Orientation;
use crate::geometry::{Point, Rect};

/// Geometry of one visible node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryNode<K> {
    pub id: K,
    pub parent: Option<K>,
    /// Visible children, in display order.
    pub children: Vec<K>,
    /// Distance from the root; the root is level 0.
    pub level: usize,
    pub frame: Rect,
    /// Own frame united with every visible descendant's frame.
    pub subtree_frame: Rect,
    /// Collapsed in the model with at least one hidden child.
    pub collapsed: bool,
}

/// Connector from a parent to one of its visible children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryEdge<K> {
    pub parent: K,
    pub child: K,
    pub parent_anchor: Point,
    pub child_anchor: Point,
    /// Polyline from `parent_anchor` to `child_anchor`, both included.
    pub points: Vec<Point>,
}

/// Result of one layout pass. Immutable; the next pass replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree<K> {
    pub(super) root: Option<K>,
    pub(super) nodes: BTreeMap<K, GeometryNode<K>>,
    pub(super) edges: Vec<GeometryEdge<K>>,
    pub(super) bounds: Rect,
    pub(super) orientation: Orientation,
}

impl<K: Ord> LayoutTree<K> {
    pub fn empty(orientation: Orientation) -> Self {
        Self {
            root: None,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            bounds: Rect::ZERO,
            orientation,
        }
    }

    pub fn root(&self) -> Option<&K> {
        self.root.as_ref()
    }

    pub fn root_node(&self) -> Option<&GeometryNode<K>> {
        self.root.as_ref().and_then(|id| self.nodes.get(id))
    }

    /// Size of the canvas needed to show the whole tree, margin included.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &K) -> Option<&GeometryNode<K>> {
        self.nodes.get(id)
    }

    pub fn frame(&self, id: &K) -> Option<Rect> {
        self.nodes.get(id).map(|node| node.frame)
    }

    /// Nodes sorted by identity.
    pub fn nodes(&self) -> impl Iterator<Item = &GeometryNode<K>> {
        self.nodes.values()
    }

    /// Edges in pre-order: a parent's edges precede its children's edges.
    pub fn edges(&self) -> &[GeometryEdge<K>] {
        &self.edges
    }

    pub fn parent_of(&self, id: &K) -> Option<&K> {
        self.nodes.get(id).and_then(|node| node.parent.as_ref())
    }

    pub fn children_of(&self, id: &K) -> &[K] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors<'a>(&'a self, id: &'a K) -> impl Iterator<Item = &'a K> + 'a {
        let mut cursor = self.parent_of(id);
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = self.parent_of(current);
            Some(current)
        })
    }
}
