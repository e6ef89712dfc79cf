//! Level-of-detail visibility policy.
//!
//! Pure functions of zoom: the same zoom always yields the same opacities and the
//! same active set. There is no hysteresis and no history.

use serde::{Deserialize, Serialize};

use crate::node::NodeKind;

/// Half-open visibility window `[min, max)` on the zoom axis.
///
/// `max = None` means unbounded.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodWindow {
    pub min: f64,
    pub max: Option<f64>,
}

impl LodWindow {
    pub const fn starting_at(min: f64) -> Self {
        Self { min, max: None }
    }

    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn contains(&self, zoom: f64) -> bool {
        zoom >= self.min && self.max.is_none_or(|max| zoom < max)
    }

    /// 1 inside the window, 0 outside, fading linearly to 0 over the last
    /// `fade_width` zoom units before a finite upper bound.
    pub fn opacity(&self, zoom: f64, fade_width: f64) -> f32 {
        if !self.contains(zoom) {
            return 0.0;
        }
        match self.max {
            Some(max) if fade_width > 0.0 && zoom > max - fade_width => {
                ((max - zoom) / fade_width).clamp(0.0, 1.0) as f32
            }
            _ => 1.0,
        }
    }
}

/// Set of node kinds, stored as a bitmask.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u8);

impl KindSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: NodeKind) -> bool {
        let changed = !self.contains(kind);
        self.0 |= kind.bit();
        changed
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Kinds in hierarchy order, coarsest first.
    pub fn iter(&self) -> impl Iterator<Item = NodeKind> + '_ {
        NodeKind::ALL.into_iter().filter(|k| self.contains(*k))
    }

    /// The finest (deepest) kind in the set.
    pub fn finest(&self) -> Option<NodeKind> {
        self.iter().last()
    }
}

impl FromIterator<NodeKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = NodeKind>>(iter: I) -> Self {
        let mut set = Self::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// Per-kind zoom windows for markers/discs and for text labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodPolicy {
    pub department: LodWindow,
    pub purpose: LodWindow,
    pub transport: LodWindow,
    pub route: LodWindow,
    pub trip: LodWindow,
    pub purpose_labels: LodWindow,
    pub transport_labels: LodWindow,
    pub route_labels: LodWindow,
    pub fade_width: f64,
}

impl Default for LodPolicy {
    fn default() -> Self {
        Self {
            department: LodWindow::starting_at(0.0),
            purpose: LodWindow::starting_at(4.0),
            transport: LodWindow::starting_at(6.0),
            route: LodWindow::starting_at(7.5),
            trip: LodWindow::starting_at(4.0),
            purpose_labels: LodWindow::between(4.0, 12.0),
            transport_labels: LodWindow::between(6.0, 12.0),
            route_labels: LodWindow::starting_at(7.5),
            fade_width: 0.5,
        }
    }
}

impl LodPolicy {
    pub fn window(&self, kind: NodeKind) -> LodWindow {
        match kind {
            NodeKind::Department => self.department,
            NodeKind::PurposeGroup => self.purpose,
            NodeKind::TransportGroup => self.transport,
            NodeKind::RouteGroup => self.route,
            NodeKind::Trip => self.trip,
        }
    }

    /// Label window; departments and trips label with their marker window.
    pub fn label_window(&self, kind: NodeKind) -> LodWindow {
        match kind {
            NodeKind::PurposeGroup => self.purpose_labels,
            NodeKind::TransportGroup => self.transport_labels,
            NodeKind::RouteGroup => self.route_labels,
            NodeKind::Department | NodeKind::Trip => self.window(kind),
        }
    }

    pub fn opacity(&self, kind: NodeKind, zoom: f64) -> f32 {
        self.window(kind).opacity(zoom, self.fade_width)
    }

    pub fn label_opacity(&self, kind: NodeKind, zoom: f64) -> f32 {
        self.label_window(kind).opacity(zoom, self.fade_width)
    }

    pub fn active_kinds(&self, zoom: f64) -> KindSet {
        NodeKind::ALL
            .into_iter()
            .filter(|k| self.opacity(*k, zoom) > 0.0)
            .collect()
    }
}

/// Opacity of `kind` at `zoom` under the reference thresholds.
pub fn opacity(kind: NodeKind, zoom: f64) -> f32 {
    LodPolicy::default().opacity(kind, zoom)
}

/// Kinds visible at `zoom` under the reference thresholds.
pub fn active_kinds(zoom: f64) -> KindSet {
    LodPolicy::default().active_kinds(zoom)
}

#[cfg(test)]
mod tests {
    use super::{KindSet, LodPolicy, LodWindow, active_kinds, opacity};
    use crate::node::NodeKind;

    #[test]
    fn overview_zoom_shows_only_departments() {
        let active = active_kinds(3.0);
        assert_eq!(active.iter().collect::<Vec<_>>(), vec![NodeKind::Department]);
    }

    #[test]
    fn mid_zoom_adds_purposes_and_trips() {
        let active = active_kinds(5.0);
        assert_eq!(
            active,
            [NodeKind::Department, NodeKind::PurposeGroup, NodeKind::Trip]
                .into_iter()
                .collect::<KindSet>()
        );
    }

    #[test]
    fn deep_zoom_shows_everything() {
        let active = active_kinds(8.0);
        assert_eq!(active.len(), 5);
        assert_eq!(active.finest(), Some(NodeKind::Trip));
    }

    #[test]
    fn thresholds_are_inclusive_at_min() {
        assert_eq!(opacity(NodeKind::TransportGroup, 6.0), 1.0);
        assert_eq!(opacity(NodeKind::TransportGroup, 5.999), 0.0);
        assert_eq!(opacity(NodeKind::RouteGroup, 7.5), 1.0);
        assert_eq!(opacity(NodeKind::RouteGroup, 7.49), 0.0);
    }

    #[test]
    fn opacity_is_idempotent() {
        for kind in NodeKind::ALL {
            for step in -40..=400 {
                let z = step as f64 * 0.05;
                assert_eq!(opacity(kind, z).to_bits(), opacity(kind, z).to_bits());
            }
        }
    }

    #[test]
    fn starting_at_has_no_upper_bound() {
        let window = LodWindow::starting_at(4.0);
        assert_eq!(window.max, None);
        assert!(!window.contains(3.99));
        assert!(window.contains(1e6));
    }

    #[test]
    fn unbounded_windows_are_binary() {
        for kind in NodeKind::ALL {
            for step in -40..=400 {
                let z = step as f64 * 0.05;
                let o = opacity(kind, z);
                assert!(o == 0.0 || o == 1.0, "{kind:?} at {z} gave {o}");
            }
        }
    }

    #[test]
    fn finite_windows_fade_before_max() {
        let w = LodWindow::between(4.0, 12.0);
        assert_eq!(w.opacity(11.0, 0.5), 1.0);
        assert_eq!(w.opacity(11.5, 0.5), 1.0);
        assert!((w.opacity(11.75, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(w.opacity(12.0, 0.5), 0.0);
        assert_eq!(w.opacity(3.9, 0.5), 0.0);
    }

    #[test]
    fn fade_is_monotone_non_increasing() {
        let w = LodWindow::between(0.0, 2.0);
        let mut prev = 1.0_f32;
        for step in 0..=40 {
            let o = w.opacity(1.5 + step as f64 * 0.0125, 0.5);
            assert!(o <= prev);
            prev = o;
        }
    }

    #[test]
    fn nan_zoom_is_invisible() {
        assert_eq!(opacity(NodeKind::Department, f64::NAN), 0.0);
        assert!(active_kinds(f64::NAN).is_empty());
    }

    #[test]
    fn label_windows_close_at_twelve() {
        let policy = LodPolicy::default();
        assert_eq!(policy.label_opacity(NodeKind::TransportGroup, 10.0), 1.0);
        assert_eq!(policy.label_opacity(NodeKind::TransportGroup, 12.0), 0.0);
        assert_eq!(policy.label_opacity(NodeKind::PurposeGroup, 13.0), 0.0);
        assert_eq!(policy.label_opacity(NodeKind::RouteGroup, 13.0), 1.0);
        assert_eq!(policy.label_opacity(NodeKind::Department, 1.0), 1.0);
    }

    #[test]
    fn department_hidden_below_zero_zoom() {
        assert_eq!(opacity(NodeKind::Department, -1.0), 0.0);
        assert_eq!(opacity(NodeKind::Department, 0.0), 1.0);
    }
}
