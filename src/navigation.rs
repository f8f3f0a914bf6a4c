//! Keyboard-style movement over a laid-out tree, and the selection it drives.
//!
//! Navigation reads only the [`LayoutTree`], so hidden (collapsed) nodes are
//! never targets.

use std::collections::BTreeSet;

use crate::geometry::{Rect, union_all};
use crate::layout::LayoutTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Root,
    Parent,
    /// The visible child most nearly in line with the node along the breadth axis.
    NearestChild,
    PreviousSibling,
    NextSibling,
}

/// Target of moving from `from` in the given direction, if there is one.
pub fn navigate<K: Clone + Ord>(tree: &LayoutTree<K>, from: &K, nav: Navigation) -> Option<K> {
    let node = tree.node(from)?;
    match nav {
        Navigation::Root => tree.root().cloned(),
        Navigation::Parent => node.parent.clone(),
        Navigation::NearestChild => {
            let vertical = tree.orientation().is_vertical();
            let breadth_center = |rect: Rect| {
                let center = rect.center();
                if vertical { center.x } else { center.y }
            };
            let origin = breadth_center(node.frame);
            let mut best: Option<(&K, f32)> = None;
            for child in &node.children {
                let Some(frame) = tree.frame(child) else {
                    continue;
                };
                let distance = (breadth_center(frame) - origin).abs();
                if best.is_none_or(|(_, current)| distance < current) {
                    best = Some((child, distance));
                }
            }
            best.map(|(child, _)| child.clone())
        }
        Navigation::PreviousSibling | Navigation::NextSibling => {
            let siblings = tree.children_of(node.parent.as_ref()?);
            let idx = siblings.iter().position(|id| id == from)?;
            let target = if nav == Navigation::NextSibling {
                idx.checked_add(1)?
            } else {
                idx.checked_sub(1)?
            };
            siblings.get(target).cloned()
        }
    }
}

/// Ordered set of selected node identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K> {
    selected: BTreeSet<K>,
}

impl<K: Ord> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }
}

impl<K: Clone + Ord> Selection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.selected.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    /// The selected identity when exactly one is selected.
    pub fn single(&self) -> Option<&K> {
        if self.selected.len() == 1 {
            self.selected.first()
        } else {
            None
        }
    }

    pub fn select_only(&mut self, id: K) {
        self.selected.clear();
        self.selected.insert(id);
    }

    pub fn add(&mut self, id: K) {
        self.selected.insert(id);
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: K) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drops identities the tree no longer shows. Returns how many were dropped.
    pub fn prune(&mut self, tree: &LayoutTree<K>) -> usize {
        let before = self.selected.len();
        self.selected.retain(|id| tree.contains(id));
        before - self.selected.len()
    }

    /// Union of the selected nodes' frames.
    pub fn bounds(&self, tree: &LayoutTree<K>) -> Option<Rect> {
        let frames: Vec<Rect> = self.selected.iter().filter_map(|id| tree.frame(id)).collect();
        union_all(&frames)
    }

    /// Moves a single selection; does nothing (and returns false) otherwise.
    pub fn move_by(&mut self, tree: &LayoutTree<K>, nav: Navigation) -> bool {
        let Some(target) = self.single().and_then(|id| navigate(tree, id, nav)) else {
            return false;
        };
        self.select_only(target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, Orientation};
    use crate::geometry::Size;
    use crate::layout::compute_layout;
    use crate::model::{TreeNode, UniformSize};

    fn tree(orientation: Orientation) -> LayoutTree<char> {
        let root = TreeNode::new('A').with_children([
            TreeNode::new('B'),
            TreeNode::new('C'),
            TreeNode::new('D').with_child(TreeNode::new('E')).collapsed(true),
        ]);
        compute_layout(
            Some(&root),
            &UniformSize(Size::new(40.0, 20.0)),
            &LayoutConfig::default().with_orientation(orientation),
        )
        .unwrap()
    }

    #[test]
    fn moves_between_relatives() {
        let tree = tree(Orientation::Down);
        assert_eq!(navigate(&tree, &'C', Navigation::Parent), Some('A'));
        assert_eq!(navigate(&tree, &'A', Navigation::Parent), None);
        assert_eq!(navigate(&tree, &'C', Navigation::PreviousSibling), Some('B'));
        assert_eq!(navigate(&tree, &'C', Navigation::NextSibling), Some('D'));
        assert_eq!(navigate(&tree, &'D', Navigation::NextSibling), None);
        assert_eq!(navigate(&tree, &'B', Navigation::PreviousSibling), None);
        assert_eq!(navigate(&tree, &'D', Navigation::Root), Some('A'));
    }

    #[test]
    fn nearest_child_is_the_centred_one() {
        for orientation in [Orientation::Down, Orientation::Left] {
            let tree = tree(orientation);
            assert_eq!(navigate(&tree, &'A', Navigation::NearestChild), Some('C'));
        }
    }

    #[test]
    fn hidden_nodes_are_unreachable() {
        let tree = tree(Orientation::Right);
        assert_eq!(navigate(&tree, &'D', Navigation::NearestChild), None);
        assert_eq!(navigate(&tree, &'E', Navigation::Parent), None);
    }

    #[test]
    fn selection_moves_and_prunes() {
        let tree = tree(Orientation::Down);
        let mut selection = Selection::new();
        selection.select_only('A');
        assert!(selection.move_by(&tree, Navigation::NearestChild));
        assert_eq!(selection.single(), Some(&'C'));

        selection.add('E');
        assert!(!selection.move_by(&tree, Navigation::Parent));
        assert_eq!(selection.prune(&tree), 1);
        assert_eq!(selection.single(), Some(&'C'));
        assert_eq!(selection.bounds(&tree), tree.frame(&'C'));

        assert!(!selection.toggle('C'));
        assert!(selection.is_empty());
        assert_eq!(selection.bounds(&tree), None);
    }
}
