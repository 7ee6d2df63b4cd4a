use egui::{epaint::CubicBezierShape, Color32, Pos2, Stroke};

use crate::layouts::Orientation;

/// Control points of the cubic "bump" connector from `from` to `to`.
///
/// The curve leaves and enters both ends along the depth axis, so the tangent
/// at each end is parallel to the direction in which the tree grows.
pub fn bump(from: Pos2, to: Pos2, orientation: Orientation) -> [Pos2; 4] {
    match orientation {
        Orientation::Horizontal => {
            let mx = f32::midpoint(from.x, to.x);
            [from, Pos2::new(mx, from.y), Pos2::new(mx, to.y), to]
        }
        Orientation::Vertical => {
            let my = f32::midpoint(from.y, to.y);
            [from, Pos2::new(from.x, my), Pos2::new(to.x, my), to]
        }
    }
}

pub fn bump_shape(points: [Pos2; 4], stroke: Stroke) -> CubicBezierShape {
    CubicBezierShape::from_points_stroke(points, false, Color32::TRANSPARENT, stroke)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_bends_along_x() {
        let pts = bump(Pos2::new(0., 0.), Pos2::new(220., 40.), Orientation::Horizontal);
        assert_eq!(pts[1], Pos2::new(110., 0.));
        assert_eq!(pts[2], Pos2::new(110., 40.));
        assert_eq!(pts[3], Pos2::new(220., 40.));
    }

    #[test]
    fn vertical_bends_along_y() {
        let pts = bump(Pos2::new(0., 0.), Pos2::new(-80., 180.), Orientation::Vertical);
        assert_eq!(pts[1], Pos2::new(0., 90.));
        assert_eq!(pts[2], Pos2::new(-80., 90.));
    }

    #[test]
    fn degenerate_curve_is_a_point() {
        let p = Pos2::new(5., 5.);
        assert!(bump(p, p, Orientation::Vertical).iter().all(|c| *c == p));
    }
}
