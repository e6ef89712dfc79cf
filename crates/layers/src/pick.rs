use foundation::math::Vec2;
use scene::NodeSet;
use scene::picking::{PickHit, pick_circles};

use crate::layer::{LayerDescriptor, Primitive};

/// Resolve a pointer position against a composed layer list.
///
/// Mirrors what the rendering surface reports: only pickable circle layers
/// take part, the top-most layer with a hit wins, and within a layer the
/// closest center wins.
pub fn pick(
    nodes: &NodeSet,
    layers: &[LayerDescriptor],
    point: Vec2,
    zoom: f64,
) -> Option<PickHit> {
    layers
        .iter()
        .rev()
        .filter(|l| l.pickable && l.opacity > 0.0 && l.primitive == Primitive::Circle)
        .find_map(|layer| {
            let candidates = layer.nodes.iter().filter_map(|&index| {
                let node = nodes.get(index)?;
                Some((index, layer.style.size.world_size(node, zoom)))
            });
            pick_circles(nodes, candidates, point)
        })
}

#[cfg(test)]
mod tests {
    use super::pick;
    use crate::compose::{ViewState, compose};
    use scene::visibility::LodPolicy;
    use scene::{LayoutConfig, NodeKind, Row, aggregate, layout};

    #[test]
    fn department_wins_over_trips_beneath_it() {
        let rows = [Row::new("Sales", 100.0).trip_id("S-1")];
        let config = LayoutConfig {
            department_cluster_radius: 20.0,
            ..LayoutConfig::seeded(1)
        };
        let nodes = layout(&aggregate(&rows), &config);
        let (_, trip) = nodes.of_kind(NodeKind::Trip).next().expect("trip");

        let layers = compose(&nodes, &LodPolicy::default(), &ViewState::at_zoom(8.0));
        let hit = pick(&nodes, &layers, trip.position, 8.0).expect("hit");
        assert_eq!(hit.kind, NodeKind::Department);
    }

    #[test]
    fn trips_are_pickable_outside_departments() {
        let rows = [Row::new("Sales", 100.0).trip_id("S-1")];
        // Default purpose ring (180) lies outside the department circle (105).
        let nodes = layout(&aggregate(&rows), &LayoutConfig::seeded(1));
        let (index, trip) = nodes.of_kind(NodeKind::Trip).next().expect("trip");

        let layers = compose(&nodes, &LodPolicy::default(), &ViewState::at_zoom(8.0));
        let hit = pick(&nodes, &layers, trip.position, 8.0).expect("hit");
        assert_eq!(hit.node, index);
    }

    #[test]
    fn nothing_is_pickable_in_empty_space() {
        let nodes = layout(&aggregate(&[Row::new("A", 1.0)]), &LayoutConfig::seeded(1));
        let layers = compose(&nodes, &LodPolicy::default(), &ViewState::at_zoom(3.5));
        assert!(pick(&nodes, &layers, foundation::math::Vec2::new(9_999.0, 0.0), 3.5).is_none());
    }
}
