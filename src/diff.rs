//! Transitions between two consecutive layout passes.
//!
//! Nodes are matched by identity. A node present only in the new tree
//! appears, one present only in the old tree disappears, and everything else
//! moves (possibly by zero). New nodes fly in from where their nearest
//! surviving ancestor used to be; removed nodes fly toward where their nearest
//! surviving ancestor went.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{AppearFrom, DisappearTo, TransitionPolicy};
use crate::geometry::Rect;
use crate::layout::LayoutTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Appear,
    Move,
    Disappear,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition<K> {
    pub id: K,
    pub kind: TransitionKind,
    pub start: Rect,
    pub end: Rect,
}

impl<K> Transition<K> {
    /// A move that goes nowhere.
    pub fn is_noop(&self) -> bool {
        self.kind == TransitionKind::Move && self.start == self.end
    }

    /// Frame at animation progress `t`, clamped to `[0, 1]`.
    pub fn frame_at(&self, t: f32) -> Rect {
        self.start.lerp(&self.end, t.clamp(0.0, 1.0))
    }
}

/// Diffs with the default policy: appear from and disappear toward the parent.
pub fn diff<K: Clone + Ord>(
    previous: Option<&LayoutTree<K>>,
    next: &LayoutTree<K>,
) -> Vec<Transition<K>> {
    diff_with(previous, next, &TransitionPolicy::default())
}

/// Emits exactly one transition per identity in either tree, sorted by identity.
pub fn diff_with<K: Clone + Ord>(
    previous: Option<&LayoutTree<K>>,
    next: &LayoutTree<K>,
    policy: &TransitionPolicy,
) -> Vec<Transition<K>> {
    let ids: BTreeSet<&K> = match previous {
        Some(previous) => next.nodes().chain(previous.nodes()).map(|node| &node.id).collect(),
        None => next.nodes().map(|node| &node.id).collect(),
    };

    let mut transitions = Vec::with_capacity(ids.len());
    for id in ids {
        let before = previous.and_then(|tree| tree.frame(id));
        let after = next.frame(id);
        let transition = match (before, after) {
            (Some(start), Some(end)) => Transition {
                id: id.clone(),
                kind: TransitionKind::Move,
                start,
                end,
            },
            (None, Some(end)) => {
                let start = match (policy.appear, previous) {
                    (AppearFrom::Parent, Some(previous)) => {
                        anchored_frame(next, previous, id, end)
                    }
                    _ => end,
                };
                Transition {
                    id: id.clone(),
                    kind: TransitionKind::Appear,
                    start,
                    end,
                }
            }
            (Some(start), None) => {
                let end = match (policy.disappear, previous) {
                    (DisappearTo::Parent, Some(previous)) => {
                        anchored_frame(previous, next, id, start)
                    }
                    _ => start,
                };
                Transition {
                    id: id.clone(),
                    kind: TransitionKind::Disappear,
                    start,
                    end,
                }
            }
            (None, None) => continue,
        };
        transitions.push(transition);
    }

    if tracing::enabled!(tracing::Level::TRACE) {
        let count = |kind: TransitionKind| transitions.iter().filter(|t| t.kind == kind).count();
        tracing::trace!(
            appear = count(TransitionKind::Appear),
            moved = count(TransitionKind::Move),
            disappear = count(TransitionKind::Disappear),
            "layout diff"
        );
    }
    transitions
}

/// `frame`'s size centred on the frame, in `target`, of the nearest ancestor
/// (walking `source`) that `target` also contains. Falls back to `frame`.
fn anchored_frame<K: Ord>(source: &LayoutTree<K>, target: &LayoutTree<K>, id: &K, frame: Rect) -> Rect {
    source
        .ancestors(id)
        .find_map(|ancestor| target.frame(ancestor))
        .map(|anchor| Rect::from_center(anchor.center(), frame.size()))
        .unwrap_or(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, Orientation};
    use crate::geometry::Size;
    use crate::layout::compute_layout;
    use crate::model::{TreeNode, UniformSize};

    const BOX: UniformSize = UniformSize(Size::new(40.0, 20.0));

    fn config() -> LayoutConfig {
        LayoutConfig::default()
            .with_orientation(Orientation::Down)
            .with_spacing(10.0, 30.0)
    }

    fn layout(root: &TreeNode<&'static str>) -> LayoutTree<&'static str> {
        compute_layout(Some(root), &BOX, &config()).unwrap()
    }

    #[test]
    fn first_layout_appears_in_place() {
        let root = TreeNode::new("A").with_children([TreeNode::new("B")]);
        let next = layout(&root);
        let transitions = diff(None, &next);
        assert_eq!(transitions.len(), 2);
        for t in &transitions {
            assert_eq!(t.kind, TransitionKind::Appear);
            assert_eq!(t.start, t.end);
        }
    }

    #[test]
    fn identical_trees_only_move_in_place() {
        let root = TreeNode::new("A").with_children([TreeNode::new("B"), TreeNode::new("C")]);
        let tree = layout(&root);
        let transitions = diff(Some(&tree), &tree);
        assert_eq!(transitions.len(), 3);
        assert!(transitions.iter().all(Transition::is_noop));
    }

    #[test]
    fn new_child_flies_in_from_parent() {
        let before = TreeNode::new("A").with_children([TreeNode::new("B")]);
        let after = TreeNode::new("A").with_children([TreeNode::new("B"), TreeNode::new("C")]);
        let previous = layout(&before);
        let next = layout(&after);
        let transitions = diff(Some(&previous), &next);
        let ids: Vec<_> = transitions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);

        let c = &transitions[2];
        assert_eq!(c.kind, TransitionKind::Appear);
        assert_eq!(c.start.center(), previous.frame(&"A").unwrap().center());
        assert_eq!(c.start.size(), c.end.size());
        assert_eq!(c.end, next.frame(&"C").unwrap());
        assert_eq!(transitions[0].kind, TransitionKind::Move);
        assert!(!transitions[0].is_noop(), "A re-centres over the wider run");
        assert!(transitions[1].is_noop(), "B keeps the first slice");
    }

    #[test]
    fn removed_subtree_flies_toward_surviving_ancestor() {
        let before = TreeNode::new("A").with_children([
            TreeNode::new("B").with_child(TreeNode::new("D").with_child(TreeNode::new("F"))),
            TreeNode::new("C"),
        ]);
        let mut after = before.clone();
        after.remove(&"D");
        let previous = layout(&before);
        let next = layout(&after);
        let transitions = diff(Some(&previous), &next);
        let b_center = next.frame(&"B").unwrap().center();
        for id in ["D", "F"] {
            let t = transitions.iter().find(|t| t.id == id).unwrap();
            assert_eq!(t.kind, TransitionKind::Disappear);
            assert_eq!(t.start, previous.frame(&id).unwrap());
            assert_eq!(t.end.center(), b_center);
        }
    }

    #[test]
    fn in_place_policy_skips_anchoring() {
        let before = TreeNode::new("A").with_children([TreeNode::new("B")]);
        let after = TreeNode::new("A").with_children([TreeNode::new("C")]);
        let policy = TransitionPolicy {
            appear: AppearFrom::InPlace,
            disappear: DisappearTo::InPlace,
        };
        let previous = layout(&before);
        let next = layout(&after);
        let transitions = diff_with(Some(&previous), &next, &policy);
        let b = transitions.iter().find(|t| t.id == "B").unwrap();
        let c = transitions.iter().find(|t| t.id == "C").unwrap();
        assert_eq!(b.end, b.start);
        assert_eq!(c.start, c.end);
    }

    #[test]
    fn replaced_root_has_no_anchor() {
        let previous = layout(&TreeNode::new("A"));
        let next = layout(&TreeNode::new("Z"));
        let transitions = diff(Some(&previous), &next);
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].kind, TransitionKind::Disappear);
        assert_eq!(transitions[0].start, transitions[0].end);
        assert_eq!(transitions[1].kind, TransitionKind::Appear);
        assert_eq!(transitions[1].start, transitions[1].end);
    }

    #[test]
    fn frame_at_clamps_progress() {
        let t = Transition {
            id: 1u8,
            kind: TransitionKind::Move,
            start: Rect::new(0.0, 0.0, 10.0, 10.0),
            end: Rect::new(10.0, 0.0, 10.0, 10.0),
        };
        assert_eq!(t.frame_at(-1.0), t.start);
        assert_eq!(t.frame_at(0.5).x, 5.0);
        assert_eq!(t.frame_at(2.0), t.end);
    }
}
