use egui::{Id, PointerButton, Pos2, Response, Sense, Ui, Vec2, Widget};

#[cfg(feature = "events")]
use crate::events::{
    Event, EventSink, PayloadDetailsClose, PayloadDetailsOpen, PayloadFit, PayloadNodeClick,
    PayloadNodeToggle, PayloadPan, PayloadZoom,
};
use crate::{
    draw::{drawer::Drawer, DrawContext},
    settings::{SettingsInteraction, SettingsStyle},
    DetailsPopup, MindMap, NodeId,
};

/// Clicks within this many screen points of a marker edge still hit it.
const HIT_SLACK: f32 = 4.;

/// Scroll distance egui reports for one mouse wheel notch.
const SCROLL_NOTCH: f32 = 50.;

/// Multiplicative zoom for one frame of input.
///
/// Pinch is already a factor. Scroll is scaled by its distance, so a wheel
/// notch zooms by about `1 + speed` however egui spreads it over frames.
fn zoom_factor(pinch: f32, scroll: f32, speed: f32) -> f32 {
    if pinch != 1. && pinch.is_finite() && pinch > 0. {
        return pinch;
    }
    if scroll == 0. || !scroll.is_finite() {
        return 1.;
    }
    (scroll / SCROLL_NOTCH * speed).exp()
}

/// Widget drawing a [`MindMap`] and routing pointer input into it.
///
/// Drag pans, scroll or pinch zooms around the pointer, a click on a node
/// toggles it and opens its details, a double click on the background fits
/// the tree back into view.
///
/// ```no_run
/// # fn show(ui: &mut egui::Ui, mind_map: &mut egui_mindmap::MindMap) {
/// ui.add(&mut egui_mindmap::MindMapView::new(mind_map));
/// # }
/// ```
pub struct MindMapView<'a> {
    mm: &'a mut MindMap,

    settings_style: SettingsStyle,
    settings_interaction: SettingsInteraction,

    custom_id: Option<String>,

    #[cfg(feature = "events")]
    events_sink: Option<&'a dyn EventSink>,
}

impl Widget for &mut MindMapView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (resp, p) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let now = ui.input(|i| i.time);

        self.mm.advance(now);
        self.handle_resize(&resp, now);
        self.handle_navigation(ui, &resp, now);
        self.handle_click(&resp, now);

        let mut viewport = self.mm.viewport();
        viewport.pan += resp.rect.left_top().to_vec2();
        let frame = self.mm.frame(now);
        Drawer::new(
            &frame,
            &DrawContext {
                ctx: ui.ctx(),
                painter: &p,
                style: &self.settings_style,
                viewport,
            },
        )
        .draw();

        self.handle_details(ui);

        if self.mm.is_animating(now) {
            ui.ctx().request_repaint();
        }

        resp
    }
}

impl<'a> MindMapView<'a> {
    /// Creates the widget with default style and interaction settings.
    pub fn new(mm: &'a mut MindMap) -> Self {
        Self {
            mm,

            settings_style: SettingsStyle::default(),
            settings_interaction: SettingsInteraction::default(),

            custom_id: None,

            #[cfg(feature = "events")]
            events_sink: Option::default(),
        }
    }

    pub fn with_styles(mut self, settings_style: &SettingsStyle) -> Self {
        self.settings_style = settings_style.clone();
        self
    }

    pub fn with_interactions(mut self, settings_interaction: &SettingsInteraction) -> Self {
        self.settings_interaction = settings_interaction.clone();
        self
    }

    /// Distinguishes popups of several widgets shown at once.
    pub fn with_id(mut self, custom_id: Option<String>) -> Self {
        self.custom_id = custom_id;
        self
    }

    #[cfg(feature = "events")]
    /// Supply a sink that will receive interaction events.
    /// Works with `crossbeam::channel::Sender<Event>`, closures `Fn(Event)`, or custom
    /// implementations.
    pub fn with_event_sink(mut self, sink: &'a dyn EventSink) -> Self {
        self.events_sink = Some(sink);
        self
    }
}

impl MindMapView<'_> {
    fn handle_resize(&mut self, resp: &Response, now: f64) {
        let size = resp.rect.size();
        if self.mm.resize(size, now) {
            self.publish_fit();
        }
    }

    fn handle_navigation(&mut self, ui: &Ui, resp: &Response, now: f64) {
        if !self.mm.settings().navigation.zoom_and_pan_enabled {
            return;
        }

        self.handle_zoom(ui, resp);
        self.handle_pan(resp);

        if resp.double_clicked() && self.hovered_node(resp, now).is_none() {
            self.mm.fit();
            self.publish_fit();
        }
    }

    fn handle_zoom(&mut self, ui: &Ui, resp: &Response) {
        if !resp.hovered() {
            return;
        }

        let speed = self.mm.settings().navigation.zoom_speed;
        let (pinch, scroll, pointer) =
            ui.input(|i| (i.zoom_delta(), i.smooth_scroll_delta.y, i.pointer.hover_pos()));

        let factor = zoom_factor(pinch, scroll, speed);
        if factor == 1. {
            return;
        }

        let center = pointer.unwrap_or(resp.rect.center()) - resp.rect.left_top().to_vec2();
        let diff = self.mm.zoom_at(center, factor);
        self.publish_zoom(diff);
    }

    fn handle_pan(&mut self, resp: &Response) {
        let delta = resp.drag_delta();
        if (resp.dragged_by(PointerButton::Middle) || resp.dragged_by(PointerButton::Primary))
            && delta != Vec2::ZERO
        {
            self.mm.pan_by(delta);
            self.publish_pan(delta);
        }
    }

    fn handle_click(&mut self, resp: &Response, now: f64) {
        if !resp.clicked() {
            return;
        }
        let Some(id) = self.hovered_node(resp, now) else {
            return;
        };

        self.set_node_clicked(id);

        if self.settings_interaction.details_on_click && self.mm.show_details(id).is_some() {
            self.set_details_opened(id);
        }
        if self.settings_interaction.toggle_on_click && self.mm.toggle(id, now) {
            self.set_node_toggled(id);
        }
    }

    fn handle_details(&mut self, ui: &Ui) {
        let Some(details) = self.mm.open_details() else {
            return;
        };

        let id = Id::new(("egui_mindmap_details", self.custom_id.as_deref()));
        if DetailsPopup::new(details).with_id(id).show(ui.ctx()) {
            if let Some(closed) = self.mm.close_details() {
                self.set_details_closed(&closed.name);
            }
        }
    }

    fn hovered_node(&self, resp: &Response, now: f64) -> Option<NodeId> {
        let pos = resp.hover_pos()?;
        let local = Self::local_pos(resp, pos);
        let zoom = self.mm.viewport().zoom;
        let radius = self.settings_style.node_radius + HIT_SLACK / zoom;
        self.mm.node_at(local, radius, now)
    }

    /// Convert a screen-space position to widget-local position
    fn local_pos(resp: &Response, p: Pos2) -> Pos2 {
        (p - resp.rect.left_top()).to_pos2()
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn set_node_clicked(&self, id: NodeId) {
        #[cfg(feature = "events")]
        self.publish_event(Event::NodeClick(PayloadNodeClick { id: id.index() }));
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn set_node_toggled(&self, id: NodeId) {
        #[cfg(feature = "events")]
        self.publish_event(Event::NodeToggle(PayloadNodeToggle {
            id: id.index(),
            expanded: self.mm.expansion().is_expanded(id),
        }));
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn set_details_opened(&self, id: NodeId) {
        #[cfg(feature = "events")]
        self.publish_event(Event::DetailsOpen(PayloadDetailsOpen { id: id.index() }));
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn set_details_closed(&self, name: &str) {
        #[cfg(feature = "events")]
        self.publish_event(Event::DetailsClose(PayloadDetailsClose {
            name: name.to_string(),
        }));
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn publish_pan(&self, diff: Vec2) {
        #[cfg(feature = "events")]
        self.publish_event(Event::Pan(PayloadPan {
            diff: diff.into(),
            new_pan: self.mm.viewport().pan.into(),
        }));
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn publish_zoom(&self, diff: f32) {
        if diff == 0. {
            return;
        }

        #[cfg(feature = "events")]
        self.publish_event(Event::Zoom(PayloadZoom {
            diff,
            new_zoom: self.mm.viewport().zoom,
        }));
    }

    #[allow(clippy::unused_self)]
    fn publish_fit(&self) {
        #[cfg(feature = "events")]
        {
            let v = self.mm.viewport();
            self.publish_event(Event::Fit(PayloadFit {
                pan: v.pan.into(),
                zoom: v.zoom,
            }));
        }
    }

    #[cfg(feature = "events")]
    fn publish_event(&self, event: Event) {
        if let Some(sink) = self.events_sink {
            sink.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_without_input_is_identity() {
        assert_eq!(zoom_factor(1., 0., 0.1), 1.);
        assert_eq!(zoom_factor(f32::NAN, f32::NAN, 0.1), 1.);
    }

    #[test]
    fn pinch_is_used_as_is() {
        assert_eq!(zoom_factor(1.25, 0., 0.1), 1.25);
        assert_eq!(zoom_factor(0.8, 30., 0.1), 0.8);
    }

    #[test]
    fn scroll_zoom_does_not_depend_on_frame_split() {
        let notch = zoom_factor(1., SCROLL_NOTCH, 0.1);
        let split: f32 = (0..5).map(|_| zoom_factor(1., SCROLL_NOTCH / 5., 0.1)).product();
        assert!((notch - split).abs() < 1e-5);
        assert!((notch - 0.1_f32.exp()).abs() < 1e-6);

        let back = zoom_factor(1., -SCROLL_NOTCH, 0.1);
        assert!((notch * back - 1.).abs() < 1e-6);
    }
}
