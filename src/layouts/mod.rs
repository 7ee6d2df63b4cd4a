pub mod tidy;

mod layout;
mod orientation;

pub use layout::{compute_layout, Layout, PositionedNode, TreeLayout};
pub use orientation::{Orientation, Spacing};
pub use tidy::Tidy;
