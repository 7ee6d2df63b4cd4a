use egui::{Pos2, Rect, Vec2};

use crate::{
    layouts::Orientation,
    settings::{SettingsLayout, SettingsNavigation},
    Viewport,
};

/// Computes the initial transform that shows the whole visible tree.
///
/// The scale never exceeds 1 and is clamped to the navigation zoom range.
/// A vertical tree is centered horizontally with the root pinned near the top
/// edge, a horizontal tree is centered vertically with the root pinned near
/// the left edge.
pub fn auto_fit(
    bounds: Rect,
    size: Vec2,
    orientation: Orientation,
    layout: &SettingsLayout,
    navigation: &SettingsNavigation,
) -> Viewport {
    let valid = bounds.is_finite() && bounds.min.x <= bounds.max.x && bounds.min.y <= bounds.max.y;
    let (min, max) = if valid {
        (bounds.min, bounds.max)
    } else {
        (Pos2::ZERO, Pos2::ZERO)
    };
    let tree_size = max - min;

    let scale_x = ratio(size.x, tree_size.x + layout.fit_margin);
    let scale_y = ratio(size.y, tree_size.y + layout.fit_margin);
    let mut scale = scale_x.min(scale_y).min(1.);
    if !scale.is_finite() || scale <= 0. {
        log::warn!("degenerate viewport {size:?}, falling back to minimal zoom");
        scale = navigation.min_zoom;
    }
    let scale = scale.clamp(navigation.min_zoom, navigation.max_zoom.max(navigation.min_zoom));

    let (width, height) = (finite_or_zero(size.x), finite_or_zero(size.y));
    let pan = match orientation {
        Orientation::Horizontal => Vec2::new(
            layout.fit_pin_margin - min.x * scale,
            height / 2. - (min.y + tree_size.y / 2.) * scale,
        ),
        Orientation::Vertical => Vec2::new(
            width / 2. - (min.x + tree_size.x / 2.) * scale,
            layout.fit_pin_margin - min.y * scale,
        ),
    };

    Viewport::new(pan, scale)
}

fn ratio(available: f32, needed: f32) -> f32 {
    if needed <= 0. || !needed.is_finite() || !available.is_finite() {
        return f32::NAN;
    }
    available.max(0.) / needed
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.)
    } else {
        0.
    }
}
