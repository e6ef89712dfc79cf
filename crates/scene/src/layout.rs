//! Nested radial placement of the aggregated hierarchy.
//!
//! - Departments sit on a Fermat spiral (golden-angle phyllotaxis), so any number
//!   of clusters pack without overlap and without a configured grid.
//! - Purposes ring their department at a fixed radius; transport modes, routes and
//!   trips nest inside their parent group.
//!
//! Group positions depend only on input order. Trip positions are drawn from the
//! random source passed to [`layout_with_rng`]; [`layout`] seeds it from
//! [`LayoutConfig::trip_seed`] when set.

use std::f64::consts::TAU;

use foundation::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::aggregate::{DepartmentGroup, HierarchyForest, RouteGroup, TransportGroup};
use crate::node::{Node, NodeDetail, ParentPath};
use crate::node_set::NodeSet;

/// Golden angle in degrees.
pub const GOLDEN_ANGLE_DEG: f64 = 137.508;

pub const PURPOSE_LABEL_SIZE: f32 = 18.0;
pub const TRANSPORT_LABEL_SIZE: f32 = 14.0;
pub const ROUTE_LABEL_SIZE: f32 = 11.0;
pub const TRIP_LABEL_SIZE: f32 = 8.0;

/// Placement constants, in map units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub department_spacing: f64,
    pub department_cluster_radius: f64,
    pub purpose_group_radius: f64,
    pub transport_group_radius: f64,
    pub route_group_radius: f64,
    /// Seed for trip scatter; `None` draws from OS entropy.
    pub trip_seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            department_spacing: 700.0,
            department_cluster_radius: 180.0,
            purpose_group_radius: 60.0,
            transport_group_radius: 24.0,
            route_group_radius: 10.0,
            trip_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutConfigError {
    #[error("layout constant `{name}` must be finite and non-negative, got {value}")]
    InvalidConstant { name: &'static str, value: f64 },
}

impl LayoutConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            trip_seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        for (name, value) in [
            ("department_spacing", self.department_spacing),
            ("department_cluster_radius", self.department_cluster_radius),
            ("purpose_group_radius", self.purpose_group_radius),
            ("transport_group_radius", self.transport_group_radius),
            ("route_group_radius", self.route_group_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutConfigError::InvalidConstant { name, value });
            }
        }
        Ok(())
    }
}

/// Lay out `forest`, seeding trip scatter from `config.trip_seed` when present.
pub fn layout(forest: &HierarchyForest, config: &LayoutConfig) -> NodeSet {
    match config.trip_seed {
        Some(seed) => layout_with_rng(forest, config, &mut StdRng::seed_from_u64(seed)),
        None => layout_with_rng(forest, config, &mut rand::thread_rng()),
    }
}

/// Lay out `forest` drawing trip positions from `rng`.
pub fn layout_with_rng<R: Rng + ?Sized>(
    forest: &HierarchyForest,
    config: &LayoutConfig,
    rng: &mut R,
) -> NodeSet {
    let mut nodes = NodeSet::new();

    for (i, (name, dept)) in forest.departments.iter().enumerate() {
        let center = spiral_position(i, config.department_spacing);
        place_department(&mut nodes, i, name, dept, center, config, rng);
    }

    debug!(
        nodes = nodes.len(),
        departments = forest.department_count(),
        "radial layout complete"
    );
    nodes
}

/// Position of the `i`-th department on the golden-angle spiral.
pub fn spiral_position(i: usize, spacing: f64) -> Vec2 {
    let r = spacing * (i as f64).sqrt();
    let theta = (i as f64 * GOLDEN_ANGLE_DEG).to_radians();
    Vec2::from_polar(r, theta)
}

/// Offset of the `i`-th of `n` members evenly spread on a ring.
pub fn ring_offset(i: usize, n: usize, radius: f64) -> Vec2 {
    let theta = TAU * i as f64 / n.max(1) as f64;
    Vec2::from_polar(radius, theta)
}

/// Ring radius used for nested members: collapsed to the center for a single member.
fn nested_ring_radius(n: usize, radius: f64) -> f64 {
    if n == 1 { 0.0 } else { radius }
}

fn place_department<R: Rng + ?Sized>(
    nodes: &mut NodeSet,
    index: usize,
    name: &str,
    dept: &DepartmentGroup,
    center: Vec2,
    config: &LayoutConfig,
    rng: &mut R,
) {
    let id = format!("dept/{index}");
    let path = ParentPath::root();
    let own_path = path.child(name);
    nodes.push(Node {
        id: id.clone(),
        label: name.to_string(),
        position: center,
        radius: dept.radius(),
        label_size: dept.label_size(),
        color: dept.color,
        path,
        detail: NodeDetail::Department(dept.metric),
    });

    let n = dept.purposes.len();
    for (pi, (purpose_name, purpose)) in dept.purposes.iter().enumerate() {
        let purpose_id = format!("{id}/purpose/{pi}");
        let purpose_center = center + ring_offset(pi, n, config.department_cluster_radius);
        let purpose_path = own_path.child(purpose_name);
        nodes.push(Node {
            id: purpose_id.clone(),
            label: purpose_name.to_string(),
            position: purpose_center,
            radius: config.purpose_group_radius,
            label_size: PURPOSE_LABEL_SIZE,
            color: dept.color,
            path: own_path.clone(),
            detail: NodeDetail::PurposeGroup(purpose.metric),
        });

        let m = purpose.modes.len();
        let mode_ring = nested_ring_radius(m, 0.65 * config.purpose_group_radius);
        for (mi, (mode_name, mode)) in purpose.modes.iter().enumerate() {
            let mode_center = purpose_center + ring_offset(mi, m, mode_ring);
            let placement = GroupPlacement {
                id: format!("{purpose_id}/mode/{mi}"),
                label: mode_name,
                center: mode_center,
                path: purpose_path.clone(),
            };
            place_transport(nodes, placement, mode, dept, config, rng);
        }
    }
}

struct GroupPlacement<'a> {
    id: String,
    label: &'a str,
    center: Vec2,
    path: ParentPath,
}

fn place_transport<R: Rng + ?Sized>(
    nodes: &mut NodeSet,
    at: GroupPlacement<'_>,
    mode: &TransportGroup,
    dept: &DepartmentGroup,
    config: &LayoutConfig,
    rng: &mut R,
) {
    let own_path = at.path.child(at.label);
    nodes.push(Node {
        id: at.id.clone(),
        label: at.label.to_string(),
        position: at.center,
        radius: config.transport_group_radius,
        label_size: TRANSPORT_LABEL_SIZE,
        color: dept.color,
        path: at.path,
        detail: NodeDetail::TransportGroup(mode.metric),
    });

    let n = mode.routes.len();
    let ring = nested_ring_radius(n, 0.6 * config.transport_group_radius);
    for (ri, (route_name, route)) in mode.routes.iter().enumerate() {
        let placement = GroupPlacement {
            id: format!("{}/route/{ri}", at.id),
            label: route_name,
            center: at.center + ring_offset(ri, n, ring),
            path: own_path.clone(),
        };
        place_route(nodes, placement, route, dept, config, rng);
    }
}

fn place_route<R: Rng + ?Sized>(
    nodes: &mut NodeSet,
    at: GroupPlacement<'_>,
    route: &RouteGroup,
    dept: &DepartmentGroup,
    config: &LayoutConfig,
    rng: &mut R,
) {
    let own_path = at.path.child(at.label);
    nodes.push(Node {
        id: at.id.clone(),
        label: at.label.to_string(),
        position: at.center,
        radius: config.route_group_radius,
        label_size: ROUTE_LABEL_SIZE,
        color: dept.color,
        path: at.path,
        detail: NodeDetail::RouteGroup(route.metric),
    });

    let scatter = 0.8 * config.route_group_radius;
    for (ti, trip) in route.trips.iter().enumerate() {
        nodes.push(Node {
            id: format!("{}/trip/{ti}", at.id),
            label: trip.label.clone(),
            position: at.center + disk_sample(rng, scatter),
            radius: trip_marker_radius_px(trip.metric.emission),
            label_size: TRIP_LABEL_SIZE,
            color: dept.color,
            path: own_path.clone(),
            detail: NodeDetail::Trip(trip.metric.clone()),
        });
    }
}

/// Area-uniform point inside a disk of `radius`.
fn disk_sample<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> Vec2 {
    let u1: f64 = rng.r#gen();
    let u2: f64 = rng.r#gen();
    Vec2::from_polar(radius * u1.sqrt(), TAU * u2)
}

/// Trip marker radius in screen pixels.
pub fn trip_marker_radius_px(emission: f64) -> f64 {
    2.0 + (emission.max(0.0) / 1000.0).sqrt()
}
