use std::collections::HashMap;

use foundation::bounds::Aabb2;
use serde::Serialize;

use crate::node::{Node, NodeIndex, NodeKind, ParentPath};

/// Immutable arena of positioned nodes.
///
/// Parent links are not stored on nodes; a node's parent is the group whose own
/// path equals the node's [`ParentPath`], resolved through a lookup table.
///
/// Ordering contract:
/// - Iteration is preorder: a department, then its purposes depth-first, then the
///   next department.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSet {
    nodes: Vec<Node>,
    by_id: HashMap<String, NodeIndex>,
    by_own_path: HashMap<ParentPath, NodeIndex>,
    children: Vec<Vec<NodeIndex>>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        debug_assert!(
            !self.by_id.contains_key(&node.id),
            "duplicate node id {}",
            node.id
        );

        if let Some(&parent) = self.by_own_path.get(&node.path) {
            self.children[parent.as_usize()].push(index);
        }
        if node.kind() != NodeKind::Trip {
            self.by_own_path.insert(node.own_path(), index);
        }
        self.by_id.insert(node.id.clone(), index);
        self.nodes.push(node);
        self.children.push(Vec::new());
        index
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.as_usize())
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    pub fn by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIndex(i as u32), n))
    }

    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.iter().filter(move |(_, n)| n.kind() == kind)
    }

    /// Resolves the parent through the path table. Departments have none.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        let node = self.get(index)?;
        self.by_own_path.get(&node.path).copied()
    }

    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.children
            .get(index.as_usize())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The department owning `index` (itself for a department).
    pub fn department_of(&self, index: NodeIndex) -> Option<NodeIndex> {
        let node = self.get(index)?;
        match node.path.department() {
            None => Some(index),
            Some(name) => self.by_own_path.get(&ParentPath::root().child(name)).copied(),
        }
    }

    /// Trip leaves under `index`, in preorder.
    pub fn trips_under(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            if node.kind() == NodeKind::Trip {
                out.push(current);
                continue;
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Map-space extent of the group circles. Trips lie inside their route
    /// disk and carry pixel radii, so they do not contribute.
    pub fn bounds(&self) -> Option<Aabb2> {
        self.nodes
            .iter()
            .filter(|n| n.kind() != NodeKind::Trip)
            .map(|n| Aabb2::around(n.position, n.radius))
            .reduce(Aabb2::union)
    }

    pub fn summary(&self) -> SceneSummary {
        let mut counts = KindCounts::default();
        let mut total_emissions = 0.0;
        for node in &self.nodes {
            counts.add(node.kind());
            if node.kind() == NodeKind::Department {
                total_emissions += node.detail.emissions();
            }
        }
        SceneSummary {
            total_emissions,
            department_count: counts.departments,
            trip_count: counts.trips,
            counts,
            bounds: self.bounds(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct KindCounts {
    pub departments: usize,
    pub purposes: usize,
    pub transports: usize,
    pub routes: usize,
    pub trips: usize,
}

impl KindCounts {
    fn add(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Department => self.departments += 1,
            NodeKind::PurposeGroup => self.purposes += 1,
            NodeKind::TransportGroup => self.transports += 1,
            NodeKind::RouteGroup => self.routes += 1,
            NodeKind::Trip => self.trips += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.departments + self.purposes + self.transports + self.routes + self.trips
    }
}

/// Read-outs for the UI layer (totals, counts, extent).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub total_emissions: f64,
    pub department_count: usize,
    pub trip_count: usize,
    pub counts: KindCounts,
    pub bounds: Option<Aabb2>,
}
