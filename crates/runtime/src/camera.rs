use foundation::bounds::Aabb2;
use foundation::math::Vec2;
use scene::{NodeKind, NodeSet};
use serde::Serialize;

use crate::config::ViewerConfig;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CameraState {
    /// Map-space point at the center of the viewport.
    pub center: Vec2,
    pub zoom: f64,
}

impl CameraState {
    /// Opening view: centered on the departments at the initial zoom.
    pub fn initial(nodes: &NodeSet, config: &ViewerConfig) -> Self {
        let center = department_bounds(nodes)
            .map(|b| b.center())
            .unwrap_or(Vec2::ZERO);
        Self {
            center,
            zoom: config.clamp_zoom(config.initial_zoom),
        }
    }

    /// The camera the viewer accepts for a requested center and zoom.
    pub fn requested(center: Vec2, zoom: f64, config: &ViewerConfig) -> Self {
        Self {
            center,
            zoom: config.clamp_zoom(zoom),
        }
        .with_center_or(Vec2::ZERO)
    }

    pub fn pan_by(self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            ..self
        }
        .with_center_or(self.center)
    }

    pub fn zoom_by(self, delta: f64, config: &ViewerConfig) -> Self {
        Self {
            zoom: config.clamp_zoom(self.zoom + delta),
            ..self
        }
    }

    fn with_center_or(self, fallback: Vec2) -> Self {
        if self.center.is_finite() {
            self
        } else {
            Self {
                center: fallback,
                ..self
            }
        }
    }
}

/// Bounding box of the department circles only.
pub fn department_bounds(nodes: &NodeSet) -> Option<Aabb2> {
    nodes
        .of_kind(NodeKind::Department)
        .map(|(_, n)| Aabb2::around(n.position, n.radius))
        .reduce(Aabb2::union)
}
