use egui::{
    epaint::{CircleShape, TextShape},
    Align2, Color32, FontId, Pos2, Shape, Stroke, Vec2,
};

use crate::{controller::NodeFrame, layouts::Orientation};

use super::DrawContext;

/// One darkening step: color channels scaled by 0.7.
pub fn darker(c: Color32) -> Color32 {
    let k = 0.7;
    Color32::from_rgba_unmultiplied(
        (f32::from(c.r()) * k).round() as u8,
        (f32::from(c.g()) * k).round() as u8,
        (f32::from(c.b()) * k).round() as u8,
        c.a(),
    )
}

/// Where the label of a node goes relative to its marker center.
///
/// Nodes with children carry the label on the root side, leaves on the far
/// side: before/after the marker in a horizontal tree, above/below it in a
/// vertical one. `offset` is the gap in screen units.
pub fn label_anchor(
    center: Pos2,
    orientation: Orientation,
    has_children: bool,
    offset: Vec2,
) -> (Pos2, Align2) {
    match (orientation, has_children) {
        (Orientation::Horizontal, true) => (center - Vec2::new(offset.x, 0.), Align2::RIGHT_CENTER),
        (Orientation::Horizontal, false) => (center + Vec2::new(offset.x, 0.), Align2::LEFT_CENTER),
        (Orientation::Vertical, true) => (center - Vec2::new(0., offset.y), Align2::CENTER_CENTER),
        (Orientation::Vertical, false) => (center + Vec2::new(0., offset.y), Align2::CENTER_CENTER),
    }
}

pub(super) fn marker_shapes(n: &NodeFrame, ctx: &DrawContext) -> Vec<Shape> {
    let mut res = Vec::with_capacity(2);
    let center = ctx.viewport.canvas_to_screen_pos(n.pos);
    let radius = ctx.viewport.canvas_to_screen_size(ctx.style.node_radius) * n.radius;
    if radius <= 0. {
        return res;
    }

    let stroke = Stroke::new(
        ctx.viewport.canvas_to_screen_size(ctx.style.node_stroke_width),
        darker(n.color),
    );

    if ctx.style.mark_collapsed && n.collapsed {
        res.push(Shape::circle_stroke(
            center,
            radius + stroke.width * 2.,
            Stroke::new(stroke.width, n.color.gamma_multiply(0.6)),
        ));
    }

    res.push(
        CircleShape {
            center,
            radius,
            fill: n.color,
            stroke,
        }
        .into(),
    );
    res
}

pub(super) fn label_shapes(
    n: &NodeFrame,
    orientation: Orientation,
    ctx: &DrawContext,
) -> Vec<Shape> {
    let size = ctx.viewport.canvas_to_screen_size(ctx.style.label_size);
    if size < 1. || n.label_alpha <= 0. {
        return Vec::new();
    }

    let color = ctx.ctx.style().visuals.text_color();
    let galley = ctx
        .painter
        .layout_no_wrap(n.name.to_string(), FontId::proportional(size), color);

    let gap = ctx.viewport.canvas_to_screen_size(ctx.style.label_offset);
    // vertical labels also clear part of the line height
    let offset = Vec2::new(gap, gap + size / 3.);
    let center = ctx.viewport.canvas_to_screen_pos(n.pos);
    let (anchor, align) = label_anchor(center, orientation, n.has_children, offset);
    let pos = align.anchor_size(anchor, galley.size()).min;

    let mut res = Vec::with_capacity(9);
    if let Some(halo) = ctx.style.label_halo {
        let w = (size / 8.).max(1.);
        for d in [
            Vec2::new(-w, 0.),
            Vec2::new(w, 0.),
            Vec2::new(0., -w),
            Vec2::new(0., w),
            Vec2::new(-w, -w),
            Vec2::new(w, -w),
            Vec2::new(-w, w),
            Vec2::new(w, w),
        ] {
            let mut s = TextShape::new(pos + d, galley.clone(), halo);
            s.override_text_color = Some(halo);
            s.opacity_factor = n.label_alpha;
            res.push(s.into());
        }
    }

    let mut text = TextShape::new(pos, galley, color);
    text.opacity_factor = n.label_alpha;
    res.push(text.into());
    res
}
