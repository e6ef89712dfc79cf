//! Event handling for an interactive viewer.
//!
//! The node set is immutable between reloads; every handled event derives a
//! fresh view state and recomposes synchronously, so no partial state is ever
//! observable between events.

use foundation::math::Vec2;
use foundation::time::Time;
use layers::{LayerDescriptor, ViewState, compose};
use scene::NodeSet;
use scene::query::{SearchQuery, search};
use scene::selection::SelectionSet;
use scene::visibility::LodPolicy;
use tracing::{debug, info};

use crate::camera::CameraState;
use crate::config::ViewerConfig;
use crate::debounce::Debouncer;
use crate::journal::{Journal, JournalEntry};

#[derive(Debug, Clone)]
pub enum ViewerEvent {
    /// Pan/zoom from the rendering surface. Applied immediately.
    ViewportChanged { center: Vec2, zoom: f64 },
    /// A search box edit at `at`. Applied after the debounce quiet period.
    SearchInput { text: String, at: Time },
    /// Clock advance; flushes a due search edit.
    Tick(Time),
    /// A freshly loaded dataset and its content fingerprint.
    Reload { nodes: NodeSet, fingerprint: String },
}

#[derive(Debug)]
pub struct ViewerSession {
    config: ViewerConfig,
    policy: LodPolicy,
    nodes: NodeSet,
    fingerprint: String,
    camera: CameraState,
    pending_search: Debouncer<String>,
    query: String,
    highlight: SelectionSet,
    layers: Vec<LayerDescriptor>,
    journal: Journal,
}

impl ViewerSession {
    pub fn new(
        nodes: NodeSet,
        fingerprint: impl Into<String>,
        policy: LodPolicy,
        config: ViewerConfig,
    ) -> Self {
        let camera = CameraState::initial(&nodes, &config);
        let pending_search = Debouncer::new(config.debounce_secs());
        let mut session = Self {
            config,
            policy,
            nodes,
            fingerprint: fingerprint.into(),
            camera,
            pending_search,
            query: String::new(),
            highlight: SelectionSet::new(),
            layers: Vec::new(),
            journal: Journal::new(),
        };
        session.recompose();
        info!(
            nodes = session.nodes.len(),
            zoom = session.camera.zoom,
            "viewer session started"
        );
        session
    }

    /// Apply one event. Returns whether the composed layer list changed.
    pub fn handle(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::ViewportChanged { center, zoom } => {
                self.camera = CameraState::requested(center, zoom, &self.config);
                self.journal
                    .emit("viewport", format!("zoom {:.2}", self.camera.zoom));
                self.recompose()
            }
            ViewerEvent::SearchInput { text, at } => {
                self.pending_search.push(text, at);
                false
            }
            ViewerEvent::Tick(now) => match self.pending_search.poll(now) {
                Some(text) => self.apply_search(text),
                None => false,
            },
            ViewerEvent::Reload { nodes, fingerprint } => {
                if fingerprint == self.fingerprint {
                    debug!("reload skipped; dataset unchanged");
                    self.journal.emit("reload", "unchanged");
                    return false;
                }
                info!(nodes = nodes.len(), "dataset reloaded");
                self.nodes = nodes;
                self.fingerprint = fingerprint;
                self.highlight = search(&self.nodes, &SearchQuery::new(self.query.as_str()));
                self.journal.emit("reload", "scene rebuilt");
                self.recompose()
            }
        }
    }

    fn apply_search(&mut self, text: String) -> bool {
        self.highlight = search(&self.nodes, &SearchQuery::new(text.as_str()));
        self.journal
            .emit("search", format!("{:?} -> {} hits", text, self.highlight.len()));
        self.query = text;
        self.recompose()
    }

    fn recompose(&mut self) -> bool {
        let view = ViewState::at_zoom(self.camera.zoom).with_highlight(&self.highlight);
        let next = compose(&self.nodes, &self.policy, &view);
        let changed = next != self.layers;
        debug!(layers = next.len(), changed, "recomposed");
        self.layers = next;
        changed
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlight(&self) -> &SelectionSet {
        &self.highlight
    }

    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    pub fn search_pending(&self) -> bool {
        self.pending_search.is_pending()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Hand the recorded transitions to the caller, typically once per frame.
    pub fn drain_journal(&mut self) -> Vec<JournalEntry> {
        self.journal.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewerEvent, ViewerSession};
    use crate::config::ViewerConfig;
    use crate::journal::JOURNAL_CAPACITY;
    use foundation::math::Vec2;
    use foundation::time::Time;
    use layers::LayerSlot;
    use pretty_assertions::assert_eq;
    use scene::visibility::LodPolicy;
    use scene::{LayoutConfig, NodeKind, NodeSet, Row, aggregate, layout};

    fn scene(rows: &[Row]) -> NodeSet {
        layout(&aggregate(rows), &LayoutConfig::seeded(3))
    }

    fn session() -> ViewerSession {
        let rows = [
            Row::new("Sales", 120.0).purpose("Client").trip_id("S-1"),
            Row::new("Engineering", 300.0).purpose("Conference").trip_id("E-1"),
        ];
        ViewerSession::new(
            scene(&rows),
            "v1",
            LodPolicy::default(),
            ViewerConfig::default(),
        )
    }

    fn slots(session: &ViewerSession) -> Vec<LayerSlot> {
        session.layers().iter().map(|l| l.slot).collect()
    }

    #[test]
    fn starts_at_overview() {
        let s = session();
        assert_eq!(s.camera().zoom, 3.5);
        assert_eq!(
            slots(&s),
            vec![LayerSlot::DepartmentCircles, LayerSlot::DepartmentLabels]
        );
    }

    #[test]
    fn viewport_change_recomposes_immediately() {
        let mut s = session();
        let center = s.camera().center;
        assert!(s.handle(ViewerEvent::ViewportChanged { center, zoom: 8.0 }));
        assert!(slots(&s).contains(&LayerSlot::RouteDiscs));
        // Same view again changes nothing.
        assert!(!s.handle(ViewerEvent::ViewportChanged { center, zoom: 8.0 }));
    }

    #[test]
    fn viewport_zoom_is_clamped() {
        let mut s = session();
        s.handle(ViewerEvent::ViewportChanged {
            center: Vec2::ZERO,
            zoom: 99.0,
        });
        assert_eq!(s.camera().zoom, 20.0);
    }

    #[test]
    fn search_applies_after_quiet_period() {
        let mut s = session();
        assert!(!s.handle(ViewerEvent::SearchInput {
            text: "sales".into(),
            at: Time(1.0),
        }));
        assert!(!s.handle(ViewerEvent::Tick(Time(1.1))));
        assert!(s.highlight().is_empty());

        assert!(s.handle(ViewerEvent::Tick(Time(1.2))));
        assert_eq!(s.query(), "sales");
        assert_eq!(s.highlight().len(), 1);
        assert_eq!(slots(&s).last(), Some(&LayerSlot::Highlight));
    }

    #[test]
    fn only_last_search_edit_is_applied() {
        let mut s = session();
        for (i, text) in ["e", "en", "eng"].into_iter().enumerate() {
            s.handle(ViewerEvent::SearchInput {
                text: text.into(),
                at: Time(i as f64 * 0.05),
            });
        }
        s.handle(ViewerEvent::Tick(Time(1.0)));
        assert_eq!(s.query(), "eng");
        assert!(!s.search_pending());
        let hits: Vec<_> = s
            .highlight()
            .iter()
            .filter_map(|i| s.nodes().get(i))
            .map(|n| n.label.clone())
            .collect();
        assert_eq!(hits, vec!["Engineering".to_string()]);
    }

    #[test]
    fn clearing_search_removes_highlight() {
        let mut s = session();
        s.handle(ViewerEvent::SearchInput {
            text: "s-1".into(),
            at: Time(0.0),
        });
        s.handle(ViewerEvent::Tick(Time(0.5)));
        assert_eq!(slots(&s).last(), Some(&LayerSlot::Highlight));
        s.handle(ViewerEvent::SearchInput {
            text: "  ".into(),
            at: Time(1.0),
        });
        s.handle(ViewerEvent::Tick(Time(1.5)));
        assert!(s.highlight().is_empty());
        assert!(!slots(&s).contains(&LayerSlot::Highlight));
    }

    #[test]
    fn journal_stays_bounded_under_viewport_churn() {
        let mut s = session();
        let center = s.camera().center;
        for i in 0..10_000 {
            s.handle(ViewerEvent::ViewportChanged {
                center,
                zoom: 3.0 + (i % 10) as f64,
            });
        }
        assert_eq!(s.journal().len(), JOURNAL_CAPACITY);
        assert_eq!(s.drain_journal().len(), JOURNAL_CAPACITY);
        assert!(s.journal().is_empty());
    }

    #[test]
    fn reload_with_same_fingerprint_is_ignored() {
        let mut s = session();
        let replacement = scene(&[Row::new("Legal", 1.0)]);
        assert!(!s.handle(ViewerEvent::Reload {
            nodes: replacement,
            fingerprint: "v1".into(),
        }));
        assert_eq!(s.nodes().of_kind(NodeKind::Department).count(), 2);
    }

    #[test]
    fn reload_swaps_scene_and_reapplies_search() {
        let mut s = session();
        s.handle(ViewerEvent::SearchInput {
            text: "legal".into(),
            at: Time(0.0),
        });
        s.handle(ViewerEvent::Tick(Time(1.0)));
        assert!(s.highlight().is_empty());

        let replacement = scene(&[Row::new("Legal", 1.0), Row::new("Sales", 2.0)]);
        assert!(s.handle(ViewerEvent::Reload {
            nodes: replacement,
            fingerprint: "v2".into(),
        }));
        assert_eq!(s.fingerprint(), "v2");
        assert_eq!(s.highlight().len(), 1);
        assert_eq!(
            s.journal().kinds(),
            vec!["search", "reload"]
        );
    }
}
