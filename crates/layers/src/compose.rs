//! Scene composition: positioned nodes + view state into an ordered layer list.
//!
//! Ordering contract (bottom to top, empty or invisible layers omitted):
//! purpose / transport / route discs, trip markers, transport / route / purpose
//! labels, department circles, department labels, search highlight.
//!
//! Composition reads the node set only; calling it twice with equal arguments
//! yields equal layer lists.

use foundation::color::Rgb;
use scene::selection::SelectionSet;
use scene::visibility::LodPolicy;
use scene::{NodeIndex, NodeKind, NodeSet};
use tracing::debug;

use crate::labels::LabelStyle;
use crate::layer::{LayerDescriptor, LayerSlot, PositionSource, Primitive};
use crate::symbology::{LayerStyle, Paint, SizeRule, Stroke};

/// Everything about the current view that composition depends on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState<'a> {
    pub zoom: f64,
    pub highlight: Option<&'a SelectionSet>,
}

impl<'a> ViewState<'a> {
    pub fn at_zoom(zoom: f64) -> Self {
        Self {
            zoom,
            highlight: None,
        }
    }

    pub fn with_highlight(self, highlight: &'a SelectionSet) -> Self {
        Self {
            highlight: Some(highlight),
            ..self
        }
    }
}

pub fn compose(
    nodes: &NodeSet,
    policy: &LodPolicy,
    view: &ViewState<'_>,
) -> Vec<LayerDescriptor> {
    let zoom = view.zoom;
    let mut out = Vec::new();

    for slot in LayerSlot::DRAW_ORDER {
        let layer = match slot {
            LayerSlot::PurposeDiscs => {
                disc_layer(nodes, policy, zoom, slot, NodeKind::PurposeGroup, 0.08)
            }
            LayerSlot::TransportDiscs => {
                disc_layer(nodes, policy, zoom, slot, NodeKind::TransportGroup, 0.10)
            }
            LayerSlot::RouteDiscs => {
                disc_layer(nodes, policy, zoom, slot, NodeKind::RouteGroup, 0.12)
            }
            LayerSlot::TripMarkers => trip_layer(nodes, policy, zoom),
            LayerSlot::TransportLabels => {
                label_layer(nodes, policy, zoom, slot, NodeKind::TransportGroup)
            }
            LayerSlot::RouteLabels => label_layer(nodes, policy, zoom, slot, NodeKind::RouteGroup),
            LayerSlot::PurposeLabels => {
                label_layer(nodes, policy, zoom, slot, NodeKind::PurposeGroup)
            }
            LayerSlot::DepartmentCircles => department_layer(nodes, policy, zoom),
            LayerSlot::DepartmentLabels => {
                label_layer(nodes, policy, zoom, slot, NodeKind::Department)
            }
            LayerSlot::Highlight => view.highlight.and_then(|h| highlight_layer(nodes, h)),
        };
        if let Some(layer) = layer {
            out.push(layer);
        }
    }

    debug!(zoom, layers = out.len(), "composed scene");
    out
}

fn of_kind(nodes: &NodeSet, kind: NodeKind) -> Vec<NodeIndex> {
    nodes.of_kind(kind).map(|(i, _)| i).collect()
}

fn kind_layer(
    nodes: &NodeSet,
    slot: LayerSlot,
    kind: NodeKind,
    primitive: Primitive,
    style: LayerStyle,
    opacity: f32,
    pickable: bool,
) -> Option<LayerDescriptor> {
    if opacity <= 0.0 {
        return None;
    }
    let members = of_kind(nodes, kind);
    if members.is_empty() {
        return None;
    }
    Some(LayerDescriptor {
        id: slot.id(),
        slot,
        node_kind: Some(kind),
        primitive,
        nodes: members,
        position: PositionSource::NodeCenter,
        style,
        opacity,
        pickable,
    })
}

fn disc_layer(
    nodes: &NodeSet,
    policy: &LodPolicy,
    zoom: f64,
    slot: LayerSlot,
    kind: NodeKind,
    fill_alpha: f32,
) -> Option<LayerDescriptor> {
    let style = LayerStyle::disc(fill_alpha, fill_alpha * 2.5);
    let opacity = policy.opacity(kind, zoom);
    kind_layer(nodes, slot, kind, Primitive::Circle, style, opacity, false)
}

fn trip_layer(nodes: &NodeSet, policy: &LodPolicy, zoom: f64) -> Option<LayerDescriptor> {
    let style = LayerStyle {
        fill: Some(Paint::department(0.85)),
        stroke: None,
        size: SizeRule::TRIP_MARKER,
        text: None,
    };
    let opacity = policy.opacity(NodeKind::Trip, zoom);
    kind_layer(
        nodes,
        LayerSlot::TripMarkers,
        NodeKind::Trip,
        Primitive::Circle,
        style,
        opacity,
        true,
    )
}

fn label_layer(
    nodes: &NodeSet,
    policy: &LodPolicy,
    zoom: f64,
    slot: LayerSlot,
    kind: NodeKind,
) -> Option<LayerDescriptor> {
    let style = LayerStyle::label(LabelStyle::for_kind(kind));
    let opacity = policy.label_opacity(kind, zoom);
    kind_layer(nodes, slot, kind, Primitive::Text, style, opacity, false)
}

fn department_layer(nodes: &NodeSet, policy: &LodPolicy, zoom: f64) -> Option<LayerDescriptor> {
    let style = LayerStyle {
        fill: Some(Paint::department(0.35)),
        stroke: Some(Stroke {
            paint: Paint::department(1.0),
            width_px: 2.0,
        }),
        size: SizeRule::NodeRadius,
        text: None,
    };
    let opacity = policy.opacity(NodeKind::Department, zoom);
    kind_layer(
        nodes,
        LayerSlot::DepartmentCircles,
        NodeKind::Department,
        Primitive::Circle,
        style,
        opacity,
        true,
    )
}

/// Highlight rings at full opacity, regardless of zoom.
fn highlight_layer(nodes: &NodeSet, highlight: &SelectionSet) -> Option<LayerDescriptor> {
    let members: Vec<NodeIndex> = highlight
        .iter()
        .filter(|i| nodes.get(*i).is_some())
        .collect();
    if members.is_empty() {
        return None;
    }
    Some(LayerDescriptor {
        id: LayerSlot::Highlight.id(),
        slot: LayerSlot::Highlight,
        node_kind: None,
        primitive: Primitive::Circle,
        nodes: members,
        position: PositionSource::NodeCenter,
        style: LayerStyle {
            fill: None,
            stroke: Some(Stroke {
                paint: Paint::fixed(Rgb::WHITE, 1.0),
                width_px: 3.0,
            }),
            size: SizeRule::Halo { pad_px: 4.0 },
            text: None,
        },
        opacity: 1.0,
        pickable: false,
    })
}
