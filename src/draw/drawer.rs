use egui::{Context, Painter, Shape};

use crate::{controller::Frame, settings::SettingsStyle, Viewport};

use super::{edge, node};

/// Everything needed to turn a [`Frame`] into shapes.
pub struct DrawContext<'a> {
    pub ctx: &'a Context,
    pub painter: &'a Painter,
    pub style: &'a SettingsStyle,
    /// Transform to absolute screen coordinates, widget offset included.
    pub viewport: Viewport,
}

pub struct Drawer<'a> {
    ctx: &'a DrawContext<'a>,
    frame: &'a Frame<'a>,
    delayed: Vec<Shape>,
}

impl<'a> Drawer<'a> {
    pub fn new(frame: &'a Frame<'a>, ctx: &'a DrawContext<'a>) -> Self {
        Drawer {
            ctx,
            frame,
            delayed: Vec::new(),
        }
    }

    /// Connectors first, then markers, labels on top of everything.
    pub fn draw(mut self) {
        self.draw_edges();
        self.draw_nodes();
        self.draw_postponed();
    }

    fn draw_postponed(&mut self) {
        self.ctx.painter.extend(std::mem::take(&mut self.delayed));
    }

    fn draw_edges(&mut self) {
        for e in &self.frame.edges {
            self.ctx.painter.add(edge::shape(e, self.ctx));
        }
    }

    fn draw_nodes(&mut self) {
        let orientation = self.frame.orientation;
        for n in &self.frame.nodes {
            self.ctx.painter.extend(node::marker_shapes(n, self.ctx));
            self.delayed
                .extend(node::label_shapes(n, orientation, self.ctx));
        }
    }
}
