mod controller;
mod curve;
mod details;
mod draw;
mod error;
mod expansion;
mod fit;
mod mindmap_view;
mod node;
mod settings;
mod transition;
mod tree;
mod viewport;

pub mod layouts;

pub use self::controller::{ClickOutcome, EdgeFrame, Frame, MindMap, NodeFrame};
pub use self::curve::bump;
pub use self::details::{DetailsPopup, NodeDetails};
pub use self::error::{Error, Result};
pub use self::expansion::Expansion;
pub use self::fit::auto_fit;
pub use self::mindmap_view::MindMapView;
pub use self::node::{Level, Link, RoadmapNode};
pub use self::settings::{
    Settings, SettingsAnimation, SettingsInteraction, SettingsLayout, SettingsNavigation,
    SettingsStyle,
};
pub use self::transition::{ease_cubic_in_out, EdgeSample, NodeSample, Phase, Transition};
pub use self::tree::{NodeId, Tree, TreeNode};
pub use self::viewport::Viewport;

#[cfg(feature = "events")]
pub mod events;
