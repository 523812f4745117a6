//! Per-vertex path finding state

use crate::core::{EdgeIndex, VertexIndex};

/// Best known route to one vertex
///
/// A vertex other than the source with no predecessor is unreachable, and
/// its cost stays at positive infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInformation {
    minimum_cost: f64,
    predecessor: Option<VertexIndex>,
    connecting_edge: Option<EdgeIndex>,
}

impl PathInformation {
    pub fn new() -> Self {
        Self {
            minimum_cost: f64::INFINITY,
            predecessor: None,
            connecting_edge: None,
        }
    }

    /// Total cost of the best known route, or infinity
    pub fn minimum_cost(&self) -> f64 {
        self.minimum_cost
    }

    /// Vertex preceding this one on the best known route
    pub fn predecessor(&self) -> Option<VertexIndex> {
        self.predecessor
    }

    /// Edge taken from the predecessor to this vertex
    pub fn connecting_edge(&self) -> Option<EdgeIndex> {
        self.connecting_edge
    }

    pub fn is_reachable(&self) -> bool {
        self.minimum_cost.is_finite()
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn set_origin(&mut self) {
        self.minimum_cost = 0.0;
    }

    pub(crate) fn update(&mut self, cost: f64, predecessor: VertexIndex, edge: EdgeIndex) {
        self.minimum_cost = cost;
        self.predecessor = Some(predecessor);
        self.connecting_edge = Some(edge);
    }
}

impl Default for PathInformation {
    fn default() -> Self {
        Self::new()
    }
}

/// A vertex paired with its path state for one engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DijkstraVertex {
    pub vertex: VertexIndex,
    pub path_information: PathInformation,
}

impl DijkstraVertex {
    pub fn new(vertex: VertexIndex) -> Self {
        Self {
            vertex,
            path_information: PathInformation::new(),
        }
    }

    pub fn minimum_cost(&self) -> f64 {
        self.path_information.minimum_cost
    }
}

/// A reconstructed route from the source to a target
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Vertices from source to target, both included
    pub vertices: Vec<VertexIndex>,
    /// Edges taken between consecutive vertices
    pub edges: Vec<EdgeIndex>,
    pub cost: f64,
}

impl ShortestPath {
    /// Number of edges on the route
    pub fn hops(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unreachable() {
        let info = PathInformation::default();
        assert_eq!(info.minimum_cost(), f64::INFINITY);
        assert!(info.predecessor().is_none());
        assert!(info.connecting_edge().is_none());
        assert!(!info.is_reachable());
    }

    #[test]
    fn test_update_and_reset() {
        let mut info = PathInformation::new();
        info.update(4.0, VertexIndex(2), EdgeIndex(7));
        assert_eq!(info.minimum_cost(), 4.0);
        assert_eq!(info.predecessor(), Some(VertexIndex(2)));
        assert_eq!(info.connecting_edge(), Some(EdgeIndex(7)));

        info.reset();
        assert_eq!(info, PathInformation::new());
    }

    #[test]
    fn test_origin_has_no_predecessor() {
        let mut slot = DijkstraVertex::new(VertexIndex(0));
        slot.path_information.set_origin();
        assert_eq!(slot.minimum_cost(), 0.0);
        assert!(slot.path_information.is_reachable());
        assert!(slot.path_information.predecessor().is_none());
    }
}
