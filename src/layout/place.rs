use std::collections::BTreeMap;

use crate::config::{ConnectorStyle, LayoutConfig, Orientation};
use crate::geometry::{Point, Rect};

use super::measure::{Measured, children_run};
use super::types::{GeometryEdge, GeometryNode};

/// Maps abstract (breadth, depth) coordinates to screen space.
///
/// Breadth runs along x for vertical trees and along y for horizontal ones.
/// Mirrored orientations flip depth against the total depth of the tree so the
/// root sits on the far edge.
#[derive(Debug, Clone, Copy)]
pub(super) struct Axes {
    orientation: Orientation,
    total_depth: f32,
    margin: f32,
}

impl Axes {
    pub(super) fn new(orientation: Orientation, total_depth: f32, margin: f32) -> Self {
        Self {
            orientation,
            total_depth,
            margin,
        }
    }

    pub(super) fn point(&self, breadth: f32, depth: f32) -> Point {
        let depth = if self.orientation.is_mirrored() {
            self.total_depth - depth
        } else {
            depth
        };
        if self.orientation.is_vertical() {
            Point::new(breadth + self.margin, depth + self.margin)
        } else {
            Point::new(depth + self.margin, breadth + self.margin)
        }
    }

    pub(super) fn rect(&self, breadth: f32, depth: f32, breadth_len: f32, depth_len: f32) -> Rect {
        let depth = if self.orientation.is_mirrored() {
            self.total_depth - depth - depth_len
        } else {
            depth
        };
        if self.orientation.is_vertical() {
            Rect::new(
                breadth + self.margin,
                depth + self.margin,
                breadth_len,
                depth_len,
            )
        } else {
            Rect::new(
                depth + self.margin,
                breadth + self.margin,
                depth_len,
                breadth_len,
            )
        }
    }
}

/// Top-down placement pass; collects geometry for every visible node.
pub(super) struct Placer<'a, K> {
    config: &'a LayoutConfig,
    axes: Axes,
    pub(super) nodes: BTreeMap<K, GeometryNode<K>>,
    pub(super) edges: Vec<GeometryEdge<K>>,
}

impl<'a, K: Clone + Ord> Placer<'a, K> {
    pub(super) fn new(config: &'a LayoutConfig, axes: Axes) -> Self {
        Self {
            config,
            axes,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Places `node` centred in the breadth slice starting at `slice_start`
    /// with its near edge at `depth_pos`. Returns the screen subtree frame.
    pub(super) fn place(
        &mut self,
        node: Measured<K>,
        slice_start: f32,
        depth_pos: f32,
        parent: Option<K>,
        level: usize,
    ) -> Rect {
        let Measured {
            id,
            breadth,
            depth,
            subtree_breadth,
            has_hidden_children,
            children,
            ..
        } = node;

        let center = slice_start + subtree_breadth / 2.0;
        let frame = self.axes.rect(center - breadth / 2.0, depth_pos, breadth, depth);
        let mut subtree_frame = frame;

        let spacing = self.config.sibling_spacing;
        let child_depth_pos = depth_pos + depth + self.config.level_spacing;
        let mut cursor = center - children_run(&children, spacing) / 2.0;
        let mut child_ids = Vec::with_capacity(children.len());
        for child in children {
            let child_center = cursor + child.subtree_breadth / 2.0;
            let advance = child.subtree_breadth + spacing;
            let edge = self.edge(
                &id,
                &child.id,
                (center, depth_pos + depth),
                (child_center, child_depth_pos),
            );
            self.edges.push(edge);
            child_ids.push(child.id.clone());
            let child_frame = self.place(child, cursor, child_depth_pos, Some(id.clone()), level + 1);
            subtree_frame = subtree_frame.union(&child_frame);
            cursor += advance;
        }

        self.nodes.insert(
            id.clone(),
            GeometryNode {
                id,
                parent,
                children: child_ids,
                level,
                frame,
                subtree_frame,
                collapsed: has_hidden_children,
            },
        );
        subtree_frame
    }

    fn edge(
        &self,
        parent: &K,
        child: &K,
        parent_anchor: (f32, f32),
        child_anchor: (f32, f32),
    ) -> GeometryEdge<K> {
        let start = self.axes.point(parent_anchor.0, parent_anchor.1);
        let end = self.axes.point(child_anchor.0, child_anchor.1);
        let points = match self.config.connector_style {
            ConnectorStyle::Direct => vec![start, end],
            ConnectorStyle::Orthogonal => {
                let elbow = parent_anchor.1 + self.config.level_spacing / 2.0;
                vec![
                    start,
                    self.axes.point(parent_anchor.0, elbow),
                    self.axes.point(child_anchor.0, elbow),
                    end,
                ]
            }
        };
        GeometryEdge {
            parent: parent.clone(),
            child: child.clone(),
            parent_anchor: start,
            child_anchor: end,
            points,
        }
    }
}
