pub mod config;
pub mod diff;
pub mod geometry;
pub mod label;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod navigation;
pub mod session;

pub use config::{
    AppearFrom, Config, ConnectorStyle, DisappearTo, LabelConfig, LayoutConfig, Orientation,
    TransitionPolicy, load_config,
};
pub use diff::{Transition, TransitionKind, diff, diff_with};
pub use geometry::{ContentSize, Point, Rect, Size};
pub use label::LabelSizer;
pub use layout::{GeometryEdge, GeometryNode, LayoutError, LayoutTree, compute_layout};
pub use model::{ContentProvider, Labeled, ModelNode, PresetSizes, TreeNode, UniformSize};
pub use navigation::{Navigation, Selection, navigate};
pub use session::{LayoutSession, LayoutUpdate};
