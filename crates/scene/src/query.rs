use crate::node::{NodeDetail, NodeKind};
use crate::node_set::NodeSet;
use crate::selection::SelectionSet;

/// Text search over the scene.
///
/// Matching is a case-insensitive substring test against the label (and, for
/// trips, the trip identifier) of nodes whose kind is in `kinds`. A blank needle matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub needle: String,
    pub kinds: Vec<NodeKind>,
    pub limit: usize,
}

impl SearchQuery {
    /// Searches the pickable kinds (departments and trips).
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            kinds: vec![NodeKind::Department, NodeKind::Trip],
            limit: usize::MAX,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.trim().is_empty()
    }
}

pub fn search(nodes: &NodeSet, query: &SearchQuery) -> SelectionSet {
    let mut out = SelectionSet::new();
    if query.is_blank() {
        return out;
    }
    let needle = query.needle.trim().to_lowercase();

    for (index, node) in nodes.iter() {
        if !query.kinds.contains(&node.kind()) {
            continue;
        }
        let trip_id = match &node.detail {
            NodeDetail::Trip(trip) => trip.trip_id.as_deref(),
            _ => None,
        };
        let matches = |text: &str| text.to_lowercase().contains(&needle);
        if !matches(&node.label) && !trip_id.is_some_and(matches) {
            continue;
        }
        out.insert(index);
        if out.len() >= query.limit {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{SearchQuery, search};
    use crate::aggregate::{Row, aggregate};
    use crate::layout::{LayoutConfig, layout};
    use crate::node::NodeKind;
    use crate::node_set::NodeSet;

    fn scene() -> NodeSet {
        let rows = [
            Row::new("Engineering", 10.0).trip_id("ENG-001"),
            Row::new("Engineering", 20.0).trip_id("ENG-002"),
            Row::new("Sales", 30.0).trip_id("S-77").purpose("Engineering summit"),
        ];
        layout(&aggregate(&rows), &LayoutConfig::seeded(1))
    }

    #[test]
    fn matches_departments_and_trips_case_insensitively() {
        let nodes = scene();
        let hits = search(&nodes, &SearchQuery::new("eng"));
        let kinds: Vec<NodeKind> = hits
            .iter()
            .filter_map(|i| nodes.get(i))
            .map(|n| n.kind())
            .collect();
        // The "Engineering summit" purpose is not a searchable kind.
        assert_eq!(
            kinds,
            vec![NodeKind::Department, NodeKind::Trip, NodeKind::Trip]
        );
    }

    #[test]
    fn structural_ids_are_not_searchable() {
        let nodes = scene();
        for needle in ["route", "purpose", "dept", "mode", "/"] {
            assert!(search(&nodes, &SearchQuery::new(needle)).is_empty(), "{needle}");
        }
    }

    #[test]
    fn blank_query_matches_nothing() {
        let nodes = scene();
        assert!(search(&nodes, &SearchQuery::new("   ")).is_empty());
    }

    #[test]
    fn limit_caps_hits() {
        let nodes = scene();
        let query = SearchQuery {
            limit: 1,
            ..SearchQuery::new("eng")
        };
        assert_eq!(search(&nodes, &query).len(), 1);
    }

    #[test]
    fn search_is_repeatable() {
        let nodes = scene();
        let q = SearchQuery::new("s-77");
        assert_eq!(search(&nodes, &q), search(&nodes, &q));
        assert_eq!(search(&nodes, &q).len(), 1);
    }
}
