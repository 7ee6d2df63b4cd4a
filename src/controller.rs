use egui::{Color32, Pos2, Vec2};
use instant::Instant;

use crate::{
    curve::bump,
    fit::auto_fit,
    layouts::{compute_layout, Orientation, Tidy, TreeLayout},
    settings::{Settings, SettingsAnimation, SettingsNavigation},
    transition::{Phase, Transition},
    Expansion, NodeDetails, NodeId, Result, RoadmapNode, Tree, Viewport,
};

/// What a click on a node did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickOutcome {
    /// Expansion of the node was flipped.
    pub toggled: bool,
    /// Payload handed to the details popup, if the node carries any.
    pub details: Option<NodeDetails>,
}

/// Node as it should be drawn at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeFrame<'a> {
    pub id: NodeId,
    pub name: &'a str,
    pub color: Color32,
    pub phase: Phase,
    /// Canvas position.
    pub pos: Pos2,
    /// Relative marker radius.
    pub radius: f32,
    pub label_alpha: f32,
    /// Has children in the full tree, visible or not.
    pub has_children: bool,
    /// Has children that are currently hidden.
    pub collapsed: bool,
}

/// Connector as it should be drawn at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeFrame {
    pub parent: NodeId,
    pub child: NodeId,
    /// Color of the child node.
    pub color: Color32,
    pub phase: Phase,
    /// Canvas control points of the bump curve.
    pub points: [Pos2; 4],
}

/// Snapshot of the diagram. Edges come first in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub orientation: Orientation,
    pub nodes: Vec<NodeFrame<'a>>,
    pub edges: Vec<EdgeFrame>,
}

/// Owns the state of one mind-map: the tree, which parts of it are expanded,
/// the current layout, the running transition and the viewport transform.
///
/// Time is passed in explicitly as seconds (`egui::InputState::time` in the
/// widget), which keeps every operation deterministic.
#[derive(Debug, Clone)]
pub struct MindMap {
    tree: Tree,
    expansion: Expansion,
    layout: TreeLayout,
    transition: Transition,
    viewport: Viewport,
    size: Vec2,
    settings: Settings,
    details: Option<NodeDetails>,
    last_layout_ms: f32,
}

impl MindMap {
    /// Builds the tree, collapses it per [`crate::SettingsLayout::collapse_depth`],
    /// lays it out for `size` and fits it without animation.
    ///
    /// # Errors
    ///
    /// Fails like [`Tree::new`] when the dataset is invalid.
    pub fn new(root: &RoadmapNode, size: Vec2, settings: Settings, now: f64) -> Result<Self> {
        let tree = Tree::new(root)?;
        let expansion = Expansion::new(&tree, settings.layout.collapse_depth);

        let mut mm = Self {
            tree,
            expansion,
            layout: TreeLayout::default(),
            transition: Transition::default(),
            viewport: Viewport::default(),
            size,
            settings,
            details: None,
            last_layout_ms: 0.,
        };
        mm.relayout();
        mm.transition = Transition::settled(&mm.layout, now);
        mm.fit();

        log::info!(
            "loaded roadmap `{}`: {} nodes, {} visible",
            root.name,
            mm.tree.len(),
            mm.layout.len()
        );

        Ok(mm)
    }

    /// Replaces the dataset. Expansion, viewport and any open popup are
    /// discarded and rebuilt from scratch.
    ///
    /// # Errors
    ///
    /// Fails like [`Tree::new`]; the current map is kept in that case.
    pub fn set_dataset(&mut self, root: &RoadmapNode, now: f64) -> Result<()> {
        *self = Self::new(root, self.size, self.settings.clone(), now)?;
        Ok(())
    }

    /// Re-lays out for a new viewport size and fits again. Expansion state is
    /// kept, the change is not animated. Returns `false` if the size is the
    /// same.
    pub fn resize(&mut self, size: Vec2, now: f64) -> bool {
        if size == self.size {
            return false;
        }

        log::debug!("resize {:?} -> {size:?}", self.size);
        self.size = size;
        self.relayout();
        self.transition = Transition::settled(&self.layout, now);
        self.fit();
        true
    }

    /// Flips expansion of `id` and animates to the new layout. Leaves and
    /// unknown ids are ignored.
    pub fn toggle(&mut self, id: NodeId, now: f64) -> bool {
        if !self.tree.has_children(id) || !self.expansion.toggle(id) {
            return false;
        }

        log::trace!(
            "toggle {:?} `{}`: expanded={}",
            id,
            self.tree.node(id).map_or("", |n| n.name()),
            self.expansion.is_expanded(id)
        );

        self.relayout();
        self.transition = self.transition.retarget(
            &self.layout,
            id,
            now,
            f64::from(self.settings.animation.duration.max(0.)),
        );
        true
    }

    /// Opens the details of `id` if it has descriptive content and toggles it
    /// if it has children. Both can happen on one click.
    pub fn click(&mut self, id: NodeId, now: f64) -> ClickOutcome {
        let details = self.show_details(id).cloned();
        let toggled = self.toggle(id, now);
        ClickOutcome { toggled, details }
    }

    /// Opens the popup for `id` unless the node has nothing to show.
    pub fn show_details(&mut self, id: NodeId) -> Option<&NodeDetails> {
        let details = self.tree.details(id).filter(|d| !d.is_empty())?;
        self.details = Some(details.clone());
        self.details.as_ref()
    }

    /// Details currently shown in the popup.
    pub fn open_details(&self) -> Option<&NodeDetails> {
        self.details.as_ref()
    }

    pub fn close_details(&mut self) -> Option<NodeDetails> {
        self.details.take()
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.viewport.pan_by(delta);
        }
    }

    /// Zooms by `factor` around the widget-local `center`. Returns the
    /// applied zoom change, zero if clamped away.
    pub fn zoom_at(&mut self, center: Pos2, factor: f32) -> f32 {
        let nav = &self.settings.navigation;
        self.viewport.zoom_at(center, factor, nav.min_zoom, nav.max_zoom)
    }

    /// Applies new navigation settings in place. The current zoom is clamped
    /// into the new range around the middle of the viewport; expansion and
    /// pan are kept.
    pub fn set_navigation(&mut self, navigation: SettingsNavigation) {
        self.settings.navigation = navigation;
        let center = (self.size / 2.).to_pos2();
        self.zoom_at(center, 1.);
    }

    /// Applies to transitions started after this call.
    pub fn set_animation(&mut self, animation: SettingsAnimation) {
        self.settings.animation = animation;
    }

    /// Resets the viewport to the auto-fit transform of the current layout.
    pub fn fit(&mut self) {
        self.viewport = auto_fit(
            self.layout.bounds(),
            self.size,
            self.layout.orientation(),
            &self.settings.layout,
            &self.settings.navigation,
        );
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.transition.is_running(now)
    }

    /// Drops finished exits once the transition is over.
    pub fn advance(&mut self, now: f64) {
        self.transition.prune(now);
    }

    /// Nodes and connectors interpolated at `now`.
    pub fn frame(&self, now: f64) -> Frame<'_> {
        let nodes = self
            .transition
            .nodes(now)
            .into_iter()
            .filter_map(|s| {
                let node = self.tree.node(s.id)?;
                Some(NodeFrame {
                    id: s.id,
                    name: node.name(),
                    color: node.color(),
                    phase: s.phase,
                    pos: s.pos,
                    radius: s.radius,
                    label_alpha: s.label_alpha,
                    has_children: self.tree.has_children(s.id),
                    collapsed: !self.expansion.hidden_children(s.id).is_empty(),
                })
            })
            .collect();

        let orientation = self.layout.orientation();
        let edges = self
            .transition
            .edges(now)
            .into_iter()
            .filter_map(|s| {
                let child = self.tree.node(s.child)?;
                Some(EdgeFrame {
                    parent: s.parent,
                    child: s.child,
                    color: child.color(),
                    phase: s.phase,
                    points: bump(s.from, s.to, orientation),
                })
            })
            .collect();

        Frame {
            orientation,
            nodes,
            edges,
        }
    }

    /// Topmost visible node whose marker of canvas radius `radius` contains
    /// the widget-local `pos`. Exiting nodes are not clickable.
    pub fn node_at(&self, pos: Pos2, radius: f32, now: f64) -> Option<NodeId> {
        let canvas = self.viewport.screen_to_canvas_pos(pos);
        self.transition
            .nodes(now)
            .into_iter()
            .filter(|s| s.phase != Phase::Exiting)
            .map(|s| (s.id, (s.pos - canvas).length()))
            .filter(|(_, dist)| *dist <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn orientation(&self) -> Orientation {
        self.layout.orientation()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Time spent in the last layout computation, in milliseconds.
    pub fn last_layout_ms(&self) -> f32 {
        self.last_layout_ms
    }

    fn relayout(&mut self) {
        let t0 = Instant::now();
        let orientation =
            Orientation::for_viewport(self.size, self.settings.layout.horizontal_ratio);
        let engine = Tidy::from(&self.settings.layout);
        self.layout = compute_layout(
            &engine,
            &self.tree,
            &self.expansion,
            orientation,
            &self.settings.layout,
        );
        self.last_layout_ms = t0.elapsed().as_secs_f32() * 1000.0;

        log::debug!(
            "layout {:?}: {} visible nodes in {:.3}ms",
            orientation,
            self.layout.len(),
            self.last_layout_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Level, SettingsLayout};

    fn roadmap() -> RoadmapNode {
        RoadmapNode::new("A", "#4f46e5").with_children(vec![
            RoadmapNode::new("B", "#16a34a").with_children(vec![
                RoadmapNode::new("C", "#dc2626"),
                RoadmapNode::new("D", "#d97706").with_details("x"),
            ]),
            RoadmapNode::new("E", "#0891b2").with_level(Level::Beginner),
        ])
    }

    fn mind_map(size: Vec2) -> MindMap {
        MindMap::new(&roadmap(), size, Settings::default(), 0.).unwrap()
    }

    fn id(mm: &MindMap, name: &str) -> NodeId {
        mm.tree().find(name).unwrap()
    }

    #[test]
    fn initial_render_is_settled() {
        // 800 > 1.2 * 600
        let mm = mind_map(Vec2::new(800., 600.));
        assert!(!mm.is_animating(0.));
        assert_eq!(mm.orientation(), Orientation::Horizontal);
        assert_eq!(mind_map(Vec2::new(500., 800.)).orientation(), Orientation::Vertical);

        let frame = mm.frame(0.);
        assert_eq!(frame.nodes.len(), 3);
        assert_eq!(frame.edges.len(), 2);
        for n in &frame.nodes {
            assert_eq!(n.pos, mm.layout().pos(n.id).unwrap());
            assert_eq!(n.radius, 1.);
        }
        let b = frame.nodes.iter().find(|n| n.name == "B").unwrap();
        assert!(b.collapsed && b.has_children);
    }

    #[test]
    fn toggle_animates_and_settles() {
        let mut mm = mind_map(Vec2::new(800., 600.));
        let b = id(&mm, "B");
        assert!(mm.toggle(b, 1.));
        assert!(mm.is_animating(1.2));
        assert_eq!(mm.frame(1.2).nodes.len(), 5);
        assert!(!mm.is_animating(1.5));
        mm.advance(1.5);
        assert!(mm.frame(1.5).nodes.iter().all(|n| n.phase == Phase::Persisting));
    }

    #[test]
    fn toggle_leaf_or_unknown_is_noop() {
        let mut mm = mind_map(Vec2::new(800., 600.));
        let visible = mm.expansion().visible_nodes();
        assert!(!mm.toggle(id(&mm, "E"), 1.));
        assert!(!mm.toggle(NodeId::new(999), 1.));
        assert_eq!(mm.expansion().visible_nodes(), visible);
        assert!(!mm.is_animating(1.));
    }

    #[test]
    fn click_with_level_opens_details_without_toggle() {
        let mut mm = mind_map(Vec2::new(800., 600.));
        let out = mm.click(id(&mm, "E"), 1.);
        assert!(!out.toggled);
        assert_eq!(out.details.unwrap().level, Some(Level::Beginner));
        assert!(mm.open_details().is_some());
        assert!(mm.close_details().is_some());
        assert!(mm.open_details().is_none());
    }

    #[test]
    fn click_on_plain_parent_only_toggles() {
        let mut mm = mind_map(Vec2::new(800., 600.));
        let out = mm.click(id(&mm, "B"), 1.);
        assert!(out.toggled);
        assert!(out.details.is_none());
        assert!(mm.open_details().is_none());
    }

    #[test]
    fn resize_flips_orientation_and_keeps_expansion() {
        let mut mm = mind_map(Vec2::new(500., 1000.));
        let b = id(&mm, "B");
        mm.toggle(b, 0.);
        assert_eq!(mm.orientation(), Orientation::Vertical);

        assert!(mm.resize(Vec2::new(1000., 500.), 0.1));
        assert_eq!(mm.orientation(), Orientation::Horizontal);
        assert!(mm.expansion().is_expanded(b));
        assert!(!mm.is_animating(0.1));
        assert_eq!(mm.frame(0.1).nodes.len(), 5);

        assert!(!mm.resize(Vec2::new(1000., 500.), 0.2));
    }

    #[test]
    fn zero_size_is_finite() {
        let mm = mind_map(Vec2::ZERO);
        let v = mm.viewport();
        assert_eq!(v.zoom, mm.settings().navigation.min_zoom);
        assert!(v.pan.is_finite());
        assert!(mm.frame(0.).nodes.iter().all(|n| n.pos.is_finite()));
    }

    #[test]
    fn pan_and_zoom_are_not_refitted() {
        let mut mm = mind_map(Vec2::new(800., 600.));
        let fitted = mm.viewport();
        mm.pan_by(Vec2::new(10., -5.));
        assert_eq!(mm.viewport().pan, fitted.pan + Vec2::new(10., -5.));

        let diff = mm.zoom_at(Pos2::new(400., 300.), 100.);
        assert_eq!(mm.viewport().zoom, 4.);
        assert!(diff > 0.);

        mm.fit();
        assert_eq!(mm.viewport(), fitted);

        mm.zoom_at(Pos2::new(400., 300.), 2.);
        let zoomed = mm.viewport();
        mm.toggle(id(&mm, "B"), 1.);
        assert_eq!(mm.viewport(), zoomed);
    }

    #[test]
    fn hit_test_uses_viewport() {
        let mm = mind_map(Vec2::new(800., 600.));
        let b = id(&mm, "B");
        let screen = mm
            .viewport()
            .canvas_to_screen_pos(mm.layout().pos(b).unwrap());
        assert_eq!(mm.node_at(screen + Vec2::new(3., 0.), 8., 0.), Some(b));
        assert_eq!(mm.node_at(Pos2::new(-500., -500.), 8., 0.), None);
    }

    #[test]
    fn set_dataset_discards_state() {
        let mut mm = mind_map(Vec2::new(800., 600.));
        mm.toggle(id(&mm, "B"), 0.);
        mm.pan_by(Vec2::new(100., 100.));
        mm.show_details(id(&mm, "D"));

        let other =
            RoadmapNode::new("Root", "#000").with_child(RoadmapNode::new("Only", "#fff"));
        mm.set_dataset(&other, 1.).unwrap();
        assert_eq!(mm.tree().len(), 2);
        assert!(mm.open_details().is_none());
        assert!(!mm.is_animating(1.));
        assert_eq!(mm.frame(1.).nodes.len(), 2);
    }

    #[test]
    fn collapse_depth_setting_is_respected() {
        let settings =
            Settings::default().with_layout(SettingsLayout::default().with_collapse_depth(5));
        let mm = MindMap::new(&roadmap(), Vec2::new(800., 600.), settings, 0.).unwrap();
        assert_eq!(mm.layout().len(), 5);
    }

    #[test]
    fn invalid_dataset_is_rejected() {
        let bad = RoadmapNode::new("A", "not-a-color");
        assert!(MindMap::new(&bad, Vec2::new(100., 100.), Settings::default(), 0.).is_err());
    }

    #[test]
    fn navigation_settings_apply_in_place() {
        let mut mm = mind_map(Vec2::new(800., 600.));
        let b = id(&mm, "B");
        mm.toggle(b, 0.);
        mm.zoom_at(Pos2::new(400., 300.), 3.);
        assert_eq!(mm.viewport().zoom, 3.);

        mm.set_navigation(SettingsNavigation::default().with_zoom_range(0.5, 2.));
        assert_eq!(mm.viewport().zoom, 2.);
        assert!(mm.expansion().is_expanded(b));
        assert_eq!(mm.layout().len(), 5);
        assert_eq!(mm.zoom_at(Pos2::new(400., 300.), 10.), 0.);

        mm.set_animation(SettingsAnimation::default().with_duration(0.));
        mm.toggle(b, 1.);
        assert!(!mm.is_animating(1.));
    }

}
