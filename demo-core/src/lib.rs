use eframe::{App, CreationContext};
use egui::{CollapsingHeader, Color32, ScrollArea, Ui, Vec2};
use egui_mindmap::{
    MindMap, MindMapView, Settings, SettingsAnimation, SettingsInteraction, SettingsLayout,
    SettingsNavigation, SettingsStyle,
};

mod datasets;

pub use datasets::{Dataset, DOMAIN_COLORS};

#[cfg(feature = "events")]
pub const EVENTS_LIMIT: usize = 200;

#[cfg(feature = "events")]
pub use crossbeam::channel::{unbounded, Receiver, Sender};
#[cfg(feature = "events")]
pub use egui_mindmap::events::Event;

/// Size used until the central panel reports its real size.
const INITIAL_SIZE: Vec2 = Vec2::new(800., 600.);

pub struct DemoApp {
    pub dataset: Dataset,
    pub mind_map: Option<MindMap>,
    pub load_error: Option<String>,

    pub settings_layout: SettingsLayout,
    pub settings_navigation: SettingsNavigation,
    pub settings_animation: SettingsAnimation,
    pub settings_interaction: SettingsInteraction,
    pub settings_style: SettingsStyle,
    pub label_halo: bool,

    pub show_sidebar: bool,

    #[cfg(feature = "events")]
    pub last_events: Vec<String>,
    #[cfg(feature = "events")]
    pub event_publisher: crate::Sender<Event>,
    #[cfg(feature = "events")]
    pub event_consumer: crate::Receiver<Event>,
}

impl DemoApp {
    pub fn new(cc: &CreationContext<'_>) -> Self {
        #[cfg(feature = "events")]
        let (event_publisher, event_consumer) = crate::unbounded();

        let mut app = Self {
            dataset: Dataset::General,
            mind_map: None,
            load_error: None,
            settings_layout: SettingsLayout::default(),
            settings_navigation: SettingsNavigation::default(),
            settings_animation: SettingsAnimation::default(),
            settings_interaction: SettingsInteraction::default(),
            settings_style: SettingsStyle::default(),
            label_halo: true,
            show_sidebar: true,
            #[cfg(feature = "events")]
            last_events: Vec::new(),
            #[cfg(feature = "events")]
            event_publisher,
            #[cfg(feature = "events")]
            event_consumer,
        };

        let now = cc.egui_ctx.input(|i| i.time);
        app.load(now);
        app
    }

    fn settings(&self) -> Settings {
        Settings::default()
            .with_layout(self.settings_layout.clone())
            .with_navigation(self.settings_navigation.clone())
            .with_animation(self.settings_animation.clone())
    }

    /// (Re)builds the mind-map for the selected dataset.
    pub fn load(&mut self, now: f64) {
        let size = self.mind_map.as_ref().map_or(INITIAL_SIZE, MindMap::size);
        let res = self
            .dataset
            .load()
            .and_then(|root| MindMap::new(&root, size, self.settings(), now));

        match res {
            Ok(mm) => {
                self.mind_map = Some(mm);
                self.load_error = None;
            }
            Err(err) => {
                log::error!("failed to load {}: {err}", self.dataset.label());
                self.mind_map = None;
                self.load_error = Some(err.to_string());
            }
        }
    }

    fn ui_dataset(&mut self, ui: &mut Ui) {
        let mut selected = self.dataset;
        egui::ComboBox::from_label("Roadmap")
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for d in Dataset::ALL {
                    ui.selectable_value(&mut selected, d, d.label());
                }
            });

        if selected != self.dataset {
            self.dataset = selected;
            let now = ui.input(|i| i.time);
            self.load(now);
        }
    }

    fn ui_layout(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Layout").default_open(true).show(ui, |ui| {
            let mut reload = false;
            reload |= ui
                .add(
                    egui::Slider::new(&mut self.settings_layout.collapse_depth, 0..=4)
                        .text("expanded levels"),
                )
                .on_hover_text("Nodes at this depth and deeper start collapsed")
                .changed();
            reload |= ui
                .add(
                    egui::Slider::new(&mut self.settings_layout.horizontal_ratio, 0.5..=3.0)
                        .text("horizontal ratio"),
                )
                .changed();
            let animation_changed = ui
                .add(
                    egui::Slider::new(&mut self.settings_animation.duration, 0.0..=2.0)
                        .text("animation, s"),
                )
                .changed();
            if animation_changed {
                if let Some(mm) = self.mind_map.as_mut() {
                    mm.set_animation(self.settings_animation.clone());
                }
            }

            if reload || ui.button("Reload").clicked() {
                let now = ui.input(|i| i.time);
                self.load(now);
            }
        });
    }

    fn ui_navigation(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Navigation").default_open(true).show(ui, |ui| {
            let mut changed = ui
                .checkbox(&mut self.settings_navigation.zoom_and_pan_enabled, "zoom & pan")
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.settings_navigation.zoom_speed, 0.01..=0.5)
                        .text("zoom speed"),
                )
                .changed();
            let Some(mm) = self.mind_map.as_mut() else {
                return;
            };
            if changed {
                mm.set_navigation(self.settings_navigation.clone());
            }
            if ui.button("Fit to screen").clicked() {
                mm.fit();
            }
        });
    }

    fn ui_interaction(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Interaction").show(ui, |ui| {
            ui.checkbox(
                &mut self.settings_interaction.toggle_on_click,
                "expand/collapse on click",
            );
            ui.checkbox(
                &mut self.settings_interaction.details_on_click,
                "details on click",
            );
        });
    }

    fn ui_style(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Style").show(ui, |ui| {
            let style = &mut self.settings_style;
            ui.add(egui::Slider::new(&mut style.node_radius, 2.0..=20.0).text("node radius"));
            ui.add(egui::Slider::new(&mut style.label_size, 6.0..=24.0).text("label size"));
            ui.checkbox(&mut style.mark_collapsed, "mark collapsed nodes");
            ui.checkbox(&mut self.label_halo, "label halo");
        });
    }

    fn ui_legend(ui: &mut Ui) {
        CollapsingHeader::new("Domains").default_open(true).show(ui, |ui| {
            for (name, color) in DOMAIN_COLORS {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.), egui::Sense::hover());
                    ui.painter().circle_filled(rect.center(), 5., color);
                    ui.label(name);
                });
            }
        });
    }

    fn ui_debug(&self, ui: &mut Ui) {
        CollapsingHeader::new("Debug").show(ui, |ui| {
            let Some(mm) = self.mind_map.as_ref() else {
                return;
            };
            let v = mm.viewport();
            ui.label(format!("nodes: {}", mm.tree().len()));
            ui.label(format!("visible: {}", mm.layout().len()));
            ui.label(format!("orientation: {:?}", mm.orientation()));
            ui.label(format!("zoom: {:.2}", v.zoom));
            ui.label(format!("pan: [{:.1}, {:.1}]", v.pan.x, v.pan.y));
            ui.label(format!("layout: {:.3} ms", mm.last_layout_ms()));
        });
    }

    #[cfg(feature = "events")]
    fn ui_events(&mut self, ui: &mut Ui) {
        while let Ok(event) = self.event_consumer.try_recv() {
            self.last_events.push(format!("{event:?}"));
        }
        if self.last_events.len() > EVENTS_LIMIT {
            let excess = self.last_events.len() - EVENTS_LIMIT;
            self.last_events.drain(..excess);
        }

        CollapsingHeader::new("Events").show(ui, |ui| {
            if ui.button("clear").clicked() {
                self.last_events.clear();
            }
            ScrollArea::vertical().max_height(200.).show(ui, |ui| {
                for e in self.last_events.iter().rev() {
                    ui.label(egui::RichText::new(e).monospace().small());
                }
            });
        });
    }

    fn style(&self, ui: &Ui) -> SettingsStyle {
        let halo = self
            .label_halo
            .then(|| ui.visuals().panel_fill)
            .filter(|c| *c != Color32::TRANSPARENT);
        self.settings_style.clone().with_label_halo(halo)
    }
}

impl App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.show_sidebar {
            egui::SidePanel::right("right")
                .default_width(280.0)
                .min_width(280.0)
                .show(ctx, |ui| {
                    ScrollArea::vertical().show(ui, |ui| {
                        self.ui_dataset(ui);
                        ui.separator();
                        self.ui_layout(ui);
                        self.ui_navigation(ui);
                        self.ui_interaction(ui);
                        self.ui_style(ui);
                        Self::ui_legend(ui);
                        self.ui_debug(ui);
                        #[cfg(feature = "events")]
                        self.ui_events(ui);
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if ui
                .small_button(if self.show_sidebar { "▶" } else { "◀" })
                .on_hover_text("Toggle side panel")
                .clicked()
            {
                self.show_sidebar = !self.show_sidebar;
            }

            if let Some(err) = &self.load_error {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("Failed to load roadmap: {err}"),
                );
                return;
            }

            let style = self.style(ui);
            let interaction = self.settings_interaction.clone();
            let Some(mm) = self.mind_map.as_mut() else {
                return;
            };

            let view = MindMapView::new(mm)
                .with_styles(&style)
                .with_interactions(&interaction);

            #[cfg(feature = "events")]
            let view = view.with_event_sink(&self.event_publisher);

            let mut view = view;
            ui.add(&mut view);
        });
    }
}
