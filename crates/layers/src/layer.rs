use scene::{NodeIndex, NodeKind};
use serde::Serialize;

use crate::symbology::LayerStyle;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LayerId(pub u64);

/// The fixed draw slots, bottom to top.
///
/// Slot identity is stable across recompositions so a renderer can diff layer
/// lists by id instead of rebuilding buffers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LayerSlot {
    PurposeDiscs,
    TransportDiscs,
    RouteDiscs,
    TripMarkers,
    TransportLabels,
    RouteLabels,
    PurposeLabels,
    DepartmentCircles,
    DepartmentLabels,
    Highlight,
}

impl LayerSlot {
    pub const DRAW_ORDER: [LayerSlot; 10] = [
        LayerSlot::PurposeDiscs,
        LayerSlot::TransportDiscs,
        LayerSlot::RouteDiscs,
        LayerSlot::TripMarkers,
        LayerSlot::TransportLabels,
        LayerSlot::RouteLabels,
        LayerSlot::PurposeLabels,
        LayerSlot::DepartmentCircles,
        LayerSlot::DepartmentLabels,
        LayerSlot::Highlight,
    ];

    pub fn id(self) -> LayerId {
        LayerId(self as u64 + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerSlot::PurposeDiscs => "purpose-discs",
            LayerSlot::TransportDiscs => "transport-discs",
            LayerSlot::RouteDiscs => "route-discs",
            LayerSlot::TripMarkers => "trip-markers",
            LayerSlot::TransportLabels => "transport-labels",
            LayerSlot::RouteLabels => "route-labels",
            LayerSlot::PurposeLabels => "purpose-labels",
            LayerSlot::DepartmentCircles => "department-circles",
            LayerSlot::DepartmentLabels => "department-labels",
            LayerSlot::Highlight => "search-highlight",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Primitive {
    /// Filled circle, optionally stroked.
    Circle,
    /// Text anchored at the node center.
    Text,
}

/// Where a drawable's anchor comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum PositionSource {
    NodeCenter,
}

/// One declarative drawable batch handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerDescriptor {
    pub id: LayerId,
    pub slot: LayerSlot,
    /// Kind of every node in `nodes`; `None` for mixed-kind layers (highlight).
    pub node_kind: Option<NodeKind>,
    pub primitive: Primitive,
    /// Geometry source: the filtered nodes this layer draws, in node order.
    pub nodes: Vec<NodeIndex>,
    pub position: PositionSource,
    pub style: LayerStyle,
    /// Layer-wide opacity in `[0, 1]`.
    pub opacity: f32,
    pub pickable: bool,
}

#[cfg(test)]
mod tests {
    use super::LayerSlot;
    use std::collections::HashSet;

    #[test]
    fn slot_ids_are_unique_and_ordered() {
        let ids: Vec<u64> = LayerSlot::DRAW_ORDER.iter().map(|s| s.id().0).collect();
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn highlight_draws_last() {
        assert_eq!(LayerSlot::DRAW_ORDER.last(), Some(&LayerSlot::Highlight));
    }
}
