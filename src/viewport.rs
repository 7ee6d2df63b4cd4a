use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Pan and zoom applied to the whole canvas.
///
/// `screen = pan + canvas * zoom`, with `pan` measured from the top left
/// corner of the widget.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current pan offset
    pub pan: Vec2,
    /// Current zoom factor
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.,
        }
    }
}

impl Viewport {
    pub fn new(pan: Vec2, zoom: f32) -> Self {
        Self { pan, zoom }
    }

    pub fn canvas_to_screen_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    pub fn canvas_to_screen_size(&self, size: f32) -> f32 {
        size * self.zoom
    }

    pub fn screen_to_canvas_pos(&self, pos: Pos2) -> Pos2 {
        ((pos.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Multiplies zoom by `factor`, clamped to `[min, max]`, keeping the
    /// canvas point under `center` in place. Returns the applied zoom change.
    pub fn zoom_at(&mut self, center: Pos2, factor: f32, min: f32, max: f32) -> f32 {
        if !factor.is_finite() || factor <= 0. {
            return 0.;
        }

        let new_zoom = (self.zoom * factor).clamp(min, max);
        let diff = new_zoom - self.zoom;
        if diff == 0. {
            return 0.;
        }

        let canvas_center = (center.to_vec2() - self.pan) / self.zoom;
        self.pan += canvas_center * self.zoom - canvas_center * new_zoom;
        self.zoom = new_zoom;

        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_canvas_conversion() {
        let v = Viewport::new(Vec2::new(10., 20.), 2.);
        let canvas = Pos2::new(5., -5.);
        let screen = v.canvas_to_screen_pos(canvas);
        assert_eq!(screen, Pos2::new(20., 10.));
        assert_eq!(v.screen_to_canvas_pos(screen), canvas);
        assert_eq!(v.canvas_to_screen_size(8.), 16.);
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut v = Viewport::new(Vec2::new(30., 40.), 1.);
        let cursor = Pos2::new(200., 100.);
        let before = v.screen_to_canvas_pos(cursor);

        let diff = v.zoom_at(cursor, 1.5, 0.1, 4.);
        assert!((diff - 0.5).abs() < 1e-6);

        let after = v.screen_to_canvas_pos(cursor);
        assert!((before - after).length() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut v = Viewport::default();
        v.zoom_at(Pos2::ZERO, 100., 0.1, 4.);
        assert_eq!(v.zoom, 4.);
        v.zoom_at(Pos2::ZERO, 1e-6, 0.1, 4.);
        assert_eq!(v.zoom, 0.1);

        let pan = v.pan;
        assert_eq!(v.zoom_at(Pos2::new(50., 50.), 0.5, 0.1, 4.), 0.);
        assert_eq!(v.pan, pan);
    }

    #[test]
    fn invalid_factor_is_ignored() {
        let mut v = Viewport::default();
        assert_eq!(v.zoom_at(Pos2::ZERO, f32::NAN, 0.1, 4.), 0.);
        assert_eq!(v.zoom_at(Pos2::ZERO, 0., 0.1, 4.), 0.);
        assert_eq!(v, Viewport::default());
    }
}
