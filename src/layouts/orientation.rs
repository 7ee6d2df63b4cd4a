use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Direction in which the tree grows from the root.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Levels grow to the right. Depth maps to x, breadth to y.
    Horizontal,
    /// Levels grow downward. Breadth maps to x, depth to y.
    #[default]
    Vertical,
}

impl Orientation {
    /// Picks horizontal only when the viewport is wider than `ratio` times its
    /// height, so portrait and near-square viewports get a vertical tree.
    pub fn for_viewport(size: Vec2, ratio: f32) -> Self {
        if size.x > size.y * ratio {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Maps (breadth, depth) coordinates onto the canvas.
    pub fn to_canvas(self, breadth: f32, depth: f32) -> Pos2 {
        match self {
            Orientation::Horizontal => Pos2::new(depth, breadth),
            Orientation::Vertical => Pos2::new(breadth, depth),
        }
    }

    /// Breadth component of a canvas position.
    pub fn breadth_of(self, pos: Pos2) -> f32 {
        match self {
            Orientation::Horizontal => pos.y,
            Orientation::Vertical => pos.x,
        }
    }

    /// Depth component of a canvas position.
    pub fn depth_of(self, pos: Pos2) -> f32 {
        match self {
            Orientation::Horizontal => pos.x,
            Orientation::Vertical => pos.y,
        }
    }
}

/// Distance between neighbouring nodes along both layout axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Spacing {
    /// Step between siblings.
    pub breadth: f32,
    /// Step between levels.
    pub depth: f32,
}

impl Spacing {
    pub const fn new(breadth: f32, depth: f32) -> Self {
        Self { breadth, depth }
    }
}
