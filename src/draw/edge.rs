use egui::{Color32, Shape, Stroke};

use crate::{controller::EdgeFrame, curve::bump_shape};

use super::DrawContext;

pub(super) fn shape(e: &EdgeFrame, ctx: &DrawContext) -> Shape {
    let points = e.points.map(|p| ctx.viewport.canvas_to_screen_pos(p));
    let stroke = Stroke::new(
        ctx.viewport.canvas_to_screen_size(ctx.style.edge_width),
        tint(e.color, ctx.style.edge_alpha),
    );
    bump_shape(points, stroke).into()
}

fn tint(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tint_keeps_hue() {
        let c = tint(Color32::from_rgb(10, 20, 30), 255);
        assert_eq!(c, Color32::from_rgb(10, 20, 30));
        assert_eq!(tint(Color32::RED, 0).a(), 0);
    }
}
