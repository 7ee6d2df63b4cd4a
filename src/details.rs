use egui::{Color32, Context, Id, RichText, ScrollArea, Ui};

use crate::{Level, Link, RoadmapNode};

/// Descriptive payload of a node, as shown in the details popup.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDetails {
    pub name: String,
    pub color: Color32,
    pub level: Option<Level>,
    pub details: Option<String>,
    pub certifications: Vec<Link>,
    pub resources: Vec<Link>,
}

impl NodeDetails {
    pub(crate) fn from_source(src: &RoadmapNode, color: Color32) -> Self {
        Self {
            name: src.name.clone(),
            color,
            level: src.level,
            details: src.details.clone(),
            certifications: src.certifications.clone(),
            resources: src.resources.clone(),
        }
    }

    /// True when there is nothing to show besides the name.
    ///
    /// Empty `details` strings and empty link lists count as absent.
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.details.as_deref().is_none_or(str::is_empty)
            && self.certifications.is_empty()
            && self.resources.is_empty()
    }
}

/// Modal popup presenting [`NodeDetails`].
///
/// Blocks interaction with the rest of the UI while open. Closes on the close
/// button, a click on the backdrop or the escape key.
pub struct DetailsPopup<'a> {
    details: &'a NodeDetails,
    id: Id,
}

impl<'a> DetailsPopup<'a> {
    pub fn new(details: &'a NodeDetails) -> Self {
        Self {
            details,
            id: Id::new("egui_mindmap_details"),
        }
    }

    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    /// Shows the popup. Returns `true` when the user asked to close it.
    pub fn show(self, ctx: &Context) -> bool {
        let mut close_clicked = false;

        let resp = egui::Modal::new(self.id).show(ctx, |ui| {
            ui.set_max_width(520.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Details").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✖").on_hover_text("Close (Esc)").clicked() {
                        close_clicked = true;
                    }
                });
            });
            ui.separator();

            ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                self.body(ui);
            });
        });

        close_clicked || resp.should_close()
    }

    fn body(&self, ui: &mut Ui) {
        let d = self.details;

        ui.label(RichText::new(&d.name).heading().strong().color(d.color));
        ui.add_space(6.0);

        if let Some(level) = d.level {
            ui.label(
                RichText::new(format!("Level: {level}"))
                    .small()
                    .background_color(ui.visuals().faint_bg_color),
            );
            ui.add_space(6.0);
        }

        if let Some(text) = d.details.as_deref().filter(|t| !t.is_empty()) {
            ui.label(text);
            ui.add_space(6.0);
        }

        links_section(ui, "Certifications", &d.certifications);
        links_section(ui, "Learning Resources", &d.resources);
    }
}

fn links_section(ui: &mut Ui, title: &str, links: &[Link]) {
    if links.is_empty() {
        return;
    }

    ui.label(RichText::new(title).strong());
    for link in links {
        ui.horizontal(|ui| {
            ui.label("•");
            ui.hyperlink_to(&link.name, &link.url);
        });
    }
    ui.add_space(6.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details_of(src: &RoadmapNode) -> NodeDetails {
        NodeDetails::from_source(src, Color32::BLACK)
    }

    #[test]
    fn plain_node_has_no_details() {
        assert!(details_of(&RoadmapNode::new("Linux", "#000")).is_empty());
    }

    #[test]
    fn any_payload_field_counts() {
        assert!(!details_of(&RoadmapNode::new("a", "#000").with_details("x")).is_empty());
        assert!(!details_of(&RoadmapNode::new("a", "#000").with_level(Level::Beginner)).is_empty());
        assert!(!details_of(
            &RoadmapNode::new("a", "#000").with_resource(Link::new("docs", "https://a.b"))
        )
        .is_empty());
        assert!(!details_of(
            &RoadmapNode::new("a", "#000").with_certification(Link::new("OSCP", "#"))
        )
        .is_empty());
    }

    #[test]
    fn blank_details_text_is_ignored() {
        assert!(details_of(&RoadmapNode::new("a", "#000").with_details("")).is_empty());
    }

    #[test]
    fn payload_is_copied_from_source() {
        let src = RoadmapNode::new("Fundamentals", "#f43f5e")
            .with_level(Level::Beginner)
            .with_certification(Link::new("CompTIA Security+", "#"));
        let d = NodeDetails::from_source(&src, Color32::RED);

        assert_eq!(d.name, "Fundamentals");
        assert_eq!(d.color, Color32::RED);
        assert_eq!(d.level, Some(Level::Beginner));
        assert_eq!(d.certifications.len(), 1);
        assert!(d.resources.is_empty());
    }
}
