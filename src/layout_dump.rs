use crate::diff::{Transition, TransitionKind};
use crate::layout::LayoutTree;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub orientation: String,
    pub root: Option<String>,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<TransitionDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub parent: Option<String>,
    pub level: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub subtree: [f32; 4],
    pub collapsed: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct TransitionDump {
    pub id: String,
    pub kind: TransitionKind,
    pub start: [f32; 4],
    pub end: [f32; 4],
}

impl LayoutDump {
    pub fn from_layout<K: Ord + fmt::Display>(tree: &LayoutTree<K>) -> Self {
        let nodes = tree
            .nodes()
            .map(|node| NodeDump {
                id: node.id.to_string(),
                parent: node.parent.as_ref().map(ToString::to_string),
                level: node.level,
                x: node.frame.x,
                y: node.frame.y,
                width: node.frame.width,
                height: node.frame.height,
                subtree: [
                    node.subtree_frame.x,
                    node.subtree_frame.y,
                    node.subtree_frame.width,
                    node.subtree_frame.height,
                ],
                collapsed: node.collapsed,
            })
            .collect();

        let edges = tree
            .edges()
            .iter()
            .map(|edge| EdgeDump {
                from: edge.parent.to_string(),
                to: edge.child.to_string(),
                points: edge.points.iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect();

        let bounds = tree.bounds();
        LayoutDump {
            orientation: format!("{:?}", tree.orientation()).to_lowercase(),
            root: tree.root().map(ToString::to_string),
            width: bounds.width,
            height: bounds.height,
            nodes,
            edges,
            transitions: Vec::new(),
        }
    }

    pub fn with_transitions<K: fmt::Display>(mut self, transitions: &[Transition<K>]) -> Self {
        self.transitions = transitions
            .iter()
            .map(|t| TransitionDump {
                id: t.id.to_string(),
                kind: t.kind,
                start: [t.start.x, t.start.y, t.start.width, t.start.height],
                end: [t.end.x, t.end.y, t.end.width, t.end.height],
            })
            .collect();
        self
    }
}

pub fn write_layout_dump<K: Ord + fmt::Display>(
    path: &Path,
    tree: &LayoutTree<K>,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(tree);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, Orientation};
    use crate::diff::diff;
    use crate::geometry::Size;
    use crate::layout::compute_layout;
    use crate::model::{TreeNode, UniformSize};

    fn tree() -> LayoutTree<u32> {
        let root = TreeNode::new(1).with_children([TreeNode::new(2), TreeNode::new(3)]);
        compute_layout(
            Some(&root),
            &UniformSize(Size::new(40.0, 20.0)),
            &LayoutConfig::default().with_orientation(Orientation::Down),
        )
        .unwrap()
    }

    #[test]
    fn dump_serializes_nodes_and_edges() {
        let tree = tree();
        let transitions = diff(None, &tree);
        let dump = LayoutDump::from_layout(&tree).with_transitions(&transitions);
        let value = serde_json::to_value(&dump).unwrap();
        assert_eq!(value["orientation"], "down");
        assert_eq!(value["root"], "1");
        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["edges"][0]["from"], "1");
        assert_eq!(value["transitions"][2]["kind"], "appear");
    }

    #[test]
    fn writes_pretty_json_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        write_layout_dump(&path, &tree()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["nodes"][1]["parent"], "1");
        assert!(value.get("transitions").is_none());
    }
}
