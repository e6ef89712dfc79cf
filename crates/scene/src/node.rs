use foundation::color::Rgb;
use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a node inside a [`crate::NodeSet`] arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

/// The five hierarchy levels, coarsest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Department,
    PurposeGroup,
    TransportGroup,
    RouteGroup,
    Trip,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Department,
        NodeKind::PurposeGroup,
        NodeKind::TransportGroup,
        NodeKind::RouteGroup,
        NodeKind::Trip,
    ];

    /// Number of ancestors a node of this kind has.
    pub fn depth(self) -> usize {
        match self {
            NodeKind::Department => 0,
            NodeKind::PurposeGroup => 1,
            NodeKind::TransportGroup => 2,
            NodeKind::RouteGroup => 3,
            NodeKind::Trip => 4,
        }
    }

    pub fn bit(self) -> u8 {
        1 << self.depth()
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Department => "department",
            NodeKind::PurposeGroup => "purpose",
            NodeKind::TransportGroup => "transport",
            NodeKind::RouteGroup => "route",
            NodeKind::Trip => "trip",
        }
    }
}

/// Ancestor labels of a node, outermost first.
///
/// A department has an empty path; a trip carries
/// `[department, purpose, transport, route]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ParentPath(Vec<String>);

impl ParentPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn department(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Path of the parent node's own parent, i.e. this path minus its last segment.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }
}

/// Summed statistic carried by every group node.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupMetric {
    pub emissions: f64,
    pub trip_count: u64,
}

impl GroupMetric {
    pub fn add_trip(&mut self, emission: f64) {
        self.emissions += emission;
        self.trip_count += 1;
    }
}

/// Raw values carried by a trip leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripMetric {
    pub emission: f64,
    pub cost: Option<f64>,
    pub trip_id: Option<String>,
}

/// Per-kind payload; each variant carries only what is meaningful for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeDetail {
    Department(GroupMetric),
    PurposeGroup(GroupMetric),
    TransportGroup(GroupMetric),
    RouteGroup(GroupMetric),
    Trip(TripMetric),
}

impl NodeDetail {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeDetail::Department(_) => NodeKind::Department,
            NodeDetail::PurposeGroup(_) => NodeKind::PurposeGroup,
            NodeDetail::TransportGroup(_) => NodeKind::TransportGroup,
            NodeDetail::RouteGroup(_) => NodeKind::RouteGroup,
            NodeDetail::Trip(_) => NodeKind::Trip,
        }
    }

    pub fn group_metric(&self) -> Option<&GroupMetric> {
        match self {
            NodeDetail::Department(m)
            | NodeDetail::PurposeGroup(m)
            | NodeDetail::TransportGroup(m)
            | NodeDetail::RouteGroup(m) => Some(m),
            NodeDetail::Trip(_) => None,
        }
    }

    /// Emission total for groups, raw emission for trips.
    pub fn emissions(&self) -> f64 {
        match self {
            NodeDetail::Trip(t) => t.emission,
            other => other.group_metric().map_or(0.0, |m| m.emissions),
        }
    }
}

/// One positioned visual element of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub position: Vec2,
    /// Visual footprint: map units for groups, screen pixels for trip markers.
    pub radius: f64,
    /// Text size for the node's label.
    pub label_size: f32,
    pub color: Rgb,
    pub path: ParentPath,
    pub detail: NodeDetail,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.detail.kind()
    }

    /// Path under which this node's children are registered.
    pub fn own_path(&self) -> ParentPath {
        self.path.child(self.label.clone())
    }
}
