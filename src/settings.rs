use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::layouts::{Orientation, Spacing};

/// Controls how the visible subtree is positioned and initially fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsLayout {
    /// Horizontal orientation is used when `width > height * horizontal_ratio`.
    pub horizontal_ratio: f32,

    /// Node spacing for the left-to-right orientation.
    pub spacing_horizontal: Spacing,

    /// Node spacing for the top-to-bottom orientation.
    pub spacing_vertical: Spacing,

    /// Gap between adjacent siblings, in units of breadth spacing.
    pub sibling_separation: f32,

    /// Gap between adjacent nodes with different parents, in units of breadth spacing.
    pub cousin_separation: f32,

    /// Nodes deeper than this start collapsed when a dataset is loaded.
    pub collapse_depth: usize,

    /// Extra room added to both sides of the tree bounds when fitting.
    pub fit_margin: f32,

    /// Distance of the root from the leading viewport edge after fitting.
    pub fit_pin_margin: f32,
}

impl Default for SettingsLayout {
    fn default() -> Self {
        Self {
            horizontal_ratio: 1.2,
            spacing_horizontal: Spacing::new(40., 220.),
            spacing_vertical: Spacing::new(80., 180.),
            sibling_separation: 1.,
            cousin_separation: 2.,
            collapse_depth: 1,
            fit_margin: 100.,
            fit_pin_margin: 60.,
        }
    }
}

impl SettingsLayout {
    pub fn with_collapse_depth(mut self, depth: usize) -> Self {
        self.collapse_depth = depth;
        self
    }

    pub fn with_horizontal_ratio(mut self, ratio: f32) -> Self {
        self.horizontal_ratio = ratio;
        self
    }

    pub fn spacing(&self, orientation: Orientation) -> Spacing {
        match orientation {
            Orientation::Horizontal => self.spacing_horizontal,
            Orientation::Vertical => self.spacing_vertical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsNavigation {
    /// Drag to pan, scroll or pinch to zoom.
    pub zoom_and_pan_enabled: bool,

    /// Relative zoom change per scroll notch.
    pub zoom_speed: f32,

    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self {
            zoom_and_pan_enabled: true,
            zoom_speed: 0.1,
            min_zoom: 0.1,
            max_zoom: 4.,
        }
    }
}

impl SettingsNavigation {
    pub fn with_zoom_and_pan_enabled(mut self, enabled: bool) -> Self {
        self.zoom_and_pan_enabled = enabled;
        self
    }

    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    pub fn with_zoom_range(mut self, min: f32, max: f32) -> Self {
        self.min_zoom = min;
        self.max_zoom = max;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsAnimation {
    /// Duration of expand/collapse transitions in seconds.
    pub duration: f32,
}

impl Default for SettingsAnimation {
    fn default() -> Self {
        Self { duration: 0.4 }
    }
}

impl SettingsAnimation {
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }
}

/// Settings owned by [`crate::MindMap`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub layout: SettingsLayout,
    pub navigation: SettingsNavigation,
    pub animation: SettingsAnimation,
}

impl Settings {
    pub fn with_layout(mut self, layout: SettingsLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_navigation(mut self, navigation: SettingsNavigation) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn with_animation(mut self, animation: SettingsAnimation) -> Self {
        self.animation = animation;
        self
    }
}

/// What a click on a node does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsInteraction {
    /// Toggle expansion of nodes with children.
    pub toggle_on_click: bool,

    /// Open the details popup for nodes with descriptive content.
    pub details_on_click: bool,
}

impl Default for SettingsInteraction {
    fn default() -> Self {
        Self {
            toggle_on_click: true,
            details_on_click: true,
        }
    }
}

impl SettingsInteraction {
    pub fn with_toggle_on_click(mut self, enabled: bool) -> Self {
        self.toggle_on_click = enabled;
        self
    }

    pub fn with_details_on_click(mut self, enabled: bool) -> Self {
        self.details_on_click = enabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsStyle {
    /// Marker radius in canvas units.
    pub node_radius: f32,

    /// Marker outline width in canvas units.
    pub node_stroke_width: f32,

    /// Connector width in canvas units.
    pub edge_width: f32,

    /// Opacity of connectors, tinted with the child color.
    pub edge_alpha: u8,

    pub label_size: f32,

    /// Gap between marker and label in canvas units.
    pub label_offset: f32,

    /// Outline drawn behind labels for readability. `None` disables it.
    pub label_halo: Option<Color32>,

    /// Draw an outer ring around collapsed nodes that hide children.
    pub mark_collapsed: bool,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            node_radius: 8.,
            node_stroke_width: 1.5,
            edge_width: 1.5,
            edge_alpha: 150,
            label_size: 12.,
            label_offset: 14.,
            label_halo: None,
            mark_collapsed: true,
        }
    }
}

impl SettingsStyle {
    pub fn with_node_radius(mut self, radius: f32) -> Self {
        self.node_radius = radius;
        self
    }

    pub fn with_label_halo(mut self, halo: Option<Color32>) -> Self {
        self.label_halo = halo;
        self
    }

    pub fn with_label_size(mut self, size: f32) -> Self {
        self.label_size = size;
        self
    }
}
