use foundation::math::Vec2;
use foundation::math::precision::stable_total_cmp_f64;

use crate::node::{NodeIndex, NodeKind};
use crate::node_set::NodeSet;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub node: NodeIndex,
    pub kind: NodeKind,
    /// Distance from the pick point to the node center, in map units.
    pub distance: f64,
}

/// Deterministic circle picking.
///
/// Each candidate is a node and its hit radius in map units. A candidate is hit
/// when `point` lies inside or on its circle.
///
/// Ordering contract:
/// - The hit with the closest center wins.
/// - Equal distances resolve to the lower `NodeIndex`.
pub fn pick_circles(
    nodes: &NodeSet,
    candidates: impl IntoIterator<Item = (NodeIndex, f64)>,
    point: Vec2,
) -> Option<PickHit> {
    if !point.is_finite() {
        return None;
    }

    let mut best: Option<PickHit> = None;
    for (index, radius) in candidates {
        let Some(node) = nodes.get(index) else {
            continue;
        };
        let distance = node.position.distance(point);
        if distance.is_nan() || distance > radius {
            continue;
        }

        let hit = PickHit {
            node: index,
            kind: node.kind(),
            distance,
        };
        best = match best {
            None => Some(hit),
            Some(current) => {
                let ord = stable_total_cmp_f64(hit.distance, current.distance)
                    .then_with(|| hit.node.cmp(&current.node));
                if ord.is_lt() { Some(hit) } else { Some(current) }
            }
        };
    }
    best
}
