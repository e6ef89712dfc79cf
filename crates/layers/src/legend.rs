use foundation::color::Rgb;
use scene::NodeKind;
use scene::palette::kind_color;
use scene::visibility::LodPolicy;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Swatch {
    pub kind: NodeKind,
    pub name: &'static str,
    pub color: Rgb,
}

/// LOD legend read-out for the UI: what the current zoom shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub zoom: f64,
    pub label: &'static str,
    pub swatches: Vec<Swatch>,
}

pub fn legend(policy: &LodPolicy, zoom: f64) -> Legend {
    let active = policy.active_kinds(zoom);
    let label = match active.finest() {
        None => "Nothing visible",
        Some(NodeKind::Department) => "Departments",
        Some(NodeKind::PurposeGroup) => "Departments by purpose",
        Some(NodeKind::TransportGroup) => "Purposes by transport mode",
        Some(NodeKind::RouteGroup) | Some(NodeKind::Trip) => {
            if active.contains(NodeKind::RouteGroup) {
                "Routes and individual trips"
            } else if active.contains(NodeKind::TransportGroup) {
                "Transport modes and trips"
            } else {
                "Purposes and trips"
            }
        }
    };
    let swatches = active
        .iter()
        .map(|kind| Swatch {
            kind,
            name: swatch_name(kind),
            color: kind_color(kind),
        })
        .collect();
    Legend {
        zoom,
        label,
        swatches,
    }
}

fn swatch_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Department => "Department",
        NodeKind::PurposeGroup => "Purpose",
        NodeKind::TransportGroup => "Transport mode",
        NodeKind::RouteGroup => "Route",
        NodeKind::Trip => "Trip",
    }
}
