//! Graph database implementation
//!
//! [`GraphModel`] owns the classified vertices, edges and text labels in
//! flat arenas, resolves ids to tagged [`ElementRef`]s, and builds the
//! vertex adjacency the shortest-path engine walks.

use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, span, trace, Level};

use crate::core::{
    AttributeView, Database, EdgeIndex, ElementRef, ElementRole, GraphError, GraphResult,
    TextIndex, VertexIndex,
};

use super::document::DiagramDocument;
use super::element::{parse_cost, Edge, ElementCore, NavigableNeighbor, Text, Vertex};

/// Typed weighted graph rebuilt from a diagram
///
/// Elements keep their insertion order. Ids are unique across all roles.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    texts: Vec<Text>,
    /// Every element id, mapped to its role and arena slot
    ids: HashMap<String, ElementRef>,
    /// Set once adjacency has been built
    linked: bool,
}

impl GraphModel {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    fn claim_id(&mut self, role: ElementRole, id: &str, slot: ElementRef) -> GraphResult<()> {
        if self.ids.contains_key(id) {
            return Err(GraphError::malformed(
                role,
                format!("duplicate element id '{}'", id),
            ));
        }
        self.ids.insert(id.to_string(), slot);
        Ok(())
    }

    /// Add a vertex, returning its arena index
    pub fn insert_vertex(&mut self, vertex: Vertex) -> GraphResult<VertexIndex> {
        let index = VertexIndex(self.vertices.len());
        self.claim_id(ElementRole::Vertex, vertex.id(), ElementRef::Vertex(index))?;
        trace!(vertex_id = %vertex.id(), vertex_value = %vertex.value(), "Adding vertex");
        self.vertices.push(vertex);
        Ok(index)
    }

    /// Add an edge, returning its arena index
    ///
    /// Both endpoints must already be vertices of this graph.
    pub fn insert_edge(&mut self, edge: Edge) -> GraphResult<EdgeIndex> {
        for endpoint in [edge.source(), edge.target()] {
            if endpoint.index() >= self.vertices.len() {
                return Err(GraphError::InvalidArgument {
                    argument: "edge endpoint",
                    message: format!(
                        "vertex index {} is out of range for edge '{}'",
                        endpoint.index(),
                        edge.id()
                    ),
                });
            }
        }
        let index = EdgeIndex(self.edges.len());
        self.claim_id(ElementRole::Edge, edge.id(), ElementRef::Edge(index))?;
        trace!(
            edge_id = %edge.id(),
            source = %self.vertices[edge.source().index()].id(),
            target = %self.vertices[edge.target().index()].id(),
            bidirectional = edge.is_bidirectional(),
            "Adding edge"
        );
        self.edges.push(edge);
        Ok(index)
    }

    /// Add a text label and copy its value onto its parent
    pub fn insert_text(&mut self, text: Text) -> GraphResult<TextIndex> {
        if self.try_core(text.parent()).is_none() {
            return Err(GraphError::InvalidArgument {
                argument: "text parent",
                message: format!("parent of text '{}' is not in this graph", text.id()),
            });
        }
        let index = TextIndex(self.texts.len());
        self.claim_id(ElementRole::Text, text.id(), ElementRef::Text(index))?;

        let parent = text.parent();
        trace!(text_id = %text.id(), text_value = %text.value(), parent = ?parent, "Adding text label");
        self.core_mut(parent).set_value(text.value());
        self.texts.push(text);
        Ok(index)
    }

    /// Resolve any element id to its tagged reference
    pub fn element(&self, id: &str) -> Option<ElementRef> {
        self.ids.get(id).copied()
    }

    /// Resolve a vertex id to its index
    pub fn vertex_index(&self, id: &str) -> Option<VertexIndex> {
        match self.element(id)? {
            ElementRef::Vertex(index) => Some(index),
            _ => None,
        }
    }

    /// Resolve an edge id to its index
    pub fn edge_index(&self, id: &str) -> Option<EdgeIndex> {
        match self.element(id)? {
            ElementRef::Edge(index) => Some(index),
            _ => None,
        }
    }

    /// Get a vertex by index
    ///
    /// Panics if the index does not come from this graph.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index.index()]
    }

    /// Get an edge by index
    ///
    /// Panics if the index does not come from this graph.
    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index.index()]
    }

    /// Get a text label by index
    ///
    /// Panics if the index does not come from this graph.
    pub fn text(&self, index: TextIndex) -> &Text {
        &self.texts[index.index()]
    }

    pub fn vertex_by_id(&self, id: &str) -> Option<&Vertex> {
        self.vertex_index(id).map(|index| self.vertex(index))
    }

    pub fn edge_by_id(&self, id: &str) -> Option<&Edge> {
        self.edge_index(id).map(|index| self.edge(index))
    }

    pub fn text_by_id(&self, id: &str) -> Option<&Text> {
        match self.element(id)? {
            ElementRef::Text(index) => Some(self.text(index)),
            _ => None,
        }
    }

    /// Find the vertex whose display value is `label`, if exactly one has it
    pub fn vertex_by_label(&self, label: &str) -> Option<&Vertex> {
        let mut matches = self.vertices.iter().filter(|v| v.value() == label);
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// The shared fields of any element
    pub fn core(&self, element: ElementRef) -> &ElementCore {
        match element {
            ElementRef::Vertex(index) => self.vertex(index).core(),
            ElementRef::Edge(index) => self.edge(index).core(),
            ElementRef::Text(index) => self.text(index).core(),
        }
    }

    fn try_core(&self, element: ElementRef) -> Option<&ElementCore> {
        match element {
            ElementRef::Vertex(index) => self.vertices.get(index.index()).map(Vertex::core),
            ElementRef::Edge(index) => self.edges.get(index.index()).map(Edge::core),
            ElementRef::Text(index) => self.texts.get(index.index()).map(Text::core),
        }
    }

    fn core_mut(&mut self, element: ElementRef) -> &mut ElementCore {
        match element {
            ElementRef::Vertex(index) => self.vertices[index.index()].core_mut(),
            ElementRef::Edge(index) => self.edges[index.index()].core_mut(),
            ElementRef::Text(index) => self.texts[index.index()].core_mut(),
        }
    }

    /// Vertices in insertion order, indexable by [`VertexIndex`]
    pub fn vertex_slice(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Iterate over all text labels
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.texts.iter()
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Whether [`GraphModel::build_links`] has run
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Build vertex adjacency from the edges
    ///
    /// Every edge adds its target to its source's neighbors, and
    /// bidirectional edges also add the reverse entry. All costs are
    /// validated before any adjacency is written. Runs once; later calls
    /// are no-ops.
    pub fn build_links(&mut self) -> GraphResult<()> {
        if self.linked {
            debug!("Links already built");
            return Ok(());
        }

        let link_span = span!(Level::DEBUG, "build_links", edge_count = self.edges.len());
        let _enter = link_span.enter();

        let mut entries = Vec::with_capacity(self.edges.len() * 2);
        for (position, edge) in self.edges.iter().enumerate() {
            let cost = edge.cost()?;
            let index = EdgeIndex(position);
            entries.push((
                edge.source(),
                NavigableNeighbor::new(edge.target(), index, cost),
            ));
            if edge.is_bidirectional() {
                entries.push((
                    edge.target(),
                    NavigableNeighbor::new(edge.source(), index, cost),
                ));
            }
        }

        let link_count = entries.len();
        for (owner, neighbor) in entries {
            self.vertices[owner.index()].neighbors_mut().push(neighbor);
        }
        self.linked = true;

        debug!(link_count, "Adjacency built");
        Ok(())
    }

    /// Change an element's display value
    ///
    /// On an edge of a linked graph the new value must be a valid cost; the
    /// adjacency entries of that edge pick up the new cost.
    pub fn set_value(&mut self, id: &str, value: &str) -> GraphResult<()> {
        let element = self.element(id).ok_or_else(|| GraphError::not_found(id))?;

        if let ElementRef::Edge(edge_index) = element {
            if self.linked {
                let cost = parse_cost(id, value)?;
                for vertex in &mut self.vertices {
                    for neighbor in vertex.neighbors_mut().iter_mut() {
                        if neighbor.connecting_edge == edge_index {
                            neighbor.cost = cost;
                        }
                    }
                }
            }
        }

        trace!(element_id = id, value, "Setting element value");
        self.core_mut(element).set_value(value);
        Ok(())
    }

    /// Set one style property of an element
    ///
    /// Edge directionality is derived at construction and does not follow
    /// later arrow marker changes.
    pub fn set_style_property(&mut self, id: &str, key: &str, value: &str) -> GraphResult<()> {
        let element = self.element(id).ok_or_else(|| GraphError::not_found(id))?;
        trace!(element_id = id, key, value, "Setting style property");
        self.core_mut(element).style_mut().set(key, value);
        Ok(())
    }

    /// Write every element's value and style back to its document cell
    ///
    /// Elements go back to the cell they were classified from; elements
    /// built in memory fall back to the first cell with their id. Returns the number of cells written; elements without a matching
    /// cell are skipped.
    pub fn serialize(&self, document: &mut DiagramDocument) -> usize {
        let cores = self
            .vertices
            .iter()
            .map(Vertex::core)
            .chain(self.edges.iter().map(Edge::core))
            .chain(self.texts.iter().map(Text::core));

        let mut written = 0;
        for core in cores {
            let positioned = core
                .position()
                .filter(|&position| {
                    document
                        .cells()
                        .get(position)
                        .is_some_and(|cell| cell.id() == Some(core.id()))
                });
            let cell = match positioned {
                Some(position) => document.cell_at_mut(position),
                None => document.cell_mut(core.id()),
            };
            if let Some(cell) = cell {
                cell.set_attribute("value", core.value());
                cell.set_attribute("style", &core.style().to_string());
                written += 1;
            }
        }

        debug!(written, "Serialized elements to document");
        written
    }
}

impl Database for GraphModel {
    type Vertex = Vertex;
    type Edge = Edge;

    fn add_vertex(&mut self, vertex: Vertex) -> Result<()> {
        self.insert_vertex(vertex)?;
        Ok(())
    }

    fn add_edge(&mut self, edge: Edge) -> Result<()> {
        self.insert_edge(edge)?;
        Ok(())
    }

    fn get_vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertex_by_id(id)
    }

    fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.edge_by_id(id)
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.texts.clear();
        self.ids.clear();
        self.linked = false;
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellNode, StyleProperties};

    fn vertex(id: &str) -> Vertex {
        Vertex::new(ElementCore::new(id, id, StyleProperties::parse("ellipse;")).unwrap())
    }

    fn edge(id: &str, value: &str, style: &str, source: usize, target: usize) -> Edge {
        let core = ElementCore::new(id, value, StyleProperties::parse(style)).unwrap();
        Edge::new(core, VertexIndex(source), VertexIndex(target))
    }

    fn two_vertices() -> GraphModel {
        let mut graph = GraphModel::new();
        graph.insert_vertex(vertex("A")).unwrap();
        graph.insert_vertex(vertex("B")).unwrap();
        graph
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut graph = two_vertices();
        graph
            .insert_edge(edge("e1", "4", "endArrow=classic;startArrow=none;", 0, 1))
            .unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.vertex_index("B"), Some(VertexIndex(1)));
        assert_eq!(graph.edge_index("e1"), Some(EdgeIndex(0)));
        assert!(graph.vertex_index("e1").is_none());
        assert!(graph.edge_by_id("A").is_none());
        assert_eq!(graph.get_vertex("A").unwrap().value(), "A");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut graph = two_vertices();
        let err = graph.insert_vertex(vertex("A")).unwrap_err();
        assert!(matches!(err, GraphError::MalformedElement { .. }));

        let err = graph.insert_edge(edge("B", "", "", 0, 1)).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_edge_endpoint_out_of_range() {
        let mut graph = two_vertices();
        let err = graph.insert_edge(edge("e", "", "", 0, 7)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument { .. }));
    }

    #[test]
    fn test_text_copies_value_to_parent() {
        let mut graph = two_vertices();
        let e = graph.insert_edge(edge("e1", "", "", 0, 1)).unwrap();
        let core = ElementCore::new("t1", "12", StyleProperties::parse("text;")).unwrap();
        graph.insert_text(Text::new(core, ElementRef::Edge(e))).unwrap();

        assert_eq!(graph.edge_by_id("e1").unwrap().value(), "12");
        assert_eq!(graph.text_by_id("t1").unwrap().parent(), ElementRef::Edge(e));
        assert_eq!(graph.text_count(), 1);
    }

    #[test]
    fn test_build_links_directed_and_bidirectional() {
        let mut graph = two_vertices();
        graph.insert_vertex(vertex("C")).unwrap();
        graph
            .insert_edge(edge("ab", "1", "startArrow=none;endArrow=classic;", 0, 1))
            .unwrap();
        graph.insert_edge(edge("bc", "2.5", "", 1, 2)).unwrap();
        graph.build_links().unwrap();

        let a = graph.vertex_by_id("A").unwrap();
        assert_eq!(
            a.neighbors(),
            &[NavigableNeighbor::new(VertexIndex(1), EdgeIndex(0), 1.0)]
        );

        let b = graph.vertex_by_id("B").unwrap();
        assert_eq!(b.neighbors().len(), 1);
        assert_eq!(b.neighbors()[0].neighbor, VertexIndex(2));

        let c = graph.vertex_by_id("C").unwrap();
        assert_eq!(
            c.neighbors(),
            &[NavigableNeighbor::new(VertexIndex(1), EdgeIndex(1), 2.5)]
        );
    }

    #[test]
    fn test_build_links_runs_once() {
        let mut graph = two_vertices();
        graph.insert_edge(edge("e", "", "", 0, 1)).unwrap();
        graph.build_links().unwrap();
        graph.build_links().unwrap();

        assert!(graph.is_linked());
        assert_eq!(graph.vertex_by_id("A").unwrap().neighbors().len(), 1);
    }

    #[test]
    fn test_build_links_invalid_cost_leaves_no_links() {
        let mut graph = two_vertices();
        graph.insert_edge(edge("ok", "1", "", 0, 1)).unwrap();
        graph.insert_edge(edge("bad", "two", "", 1, 0)).unwrap();

        let err = graph.build_links().unwrap_err();
        assert!(matches!(err, GraphError::InvalidCost { .. }));
        assert!(!graph.is_linked());
        assert!(graph.vertex_by_id("A").unwrap().neighbors().is_empty());
    }

    #[test]
    fn test_set_value_updates_link_cost() {
        let mut graph = two_vertices();
        graph.insert_edge(edge("e", "1", "", 0, 1)).unwrap();
        graph.build_links().unwrap();

        graph.set_value("e", "9").unwrap();
        assert_eq!(graph.edge_by_id("e").unwrap().value(), "9");
        assert_eq!(graph.vertex_by_id("A").unwrap().neighbors()[0].cost, 9.0);
        assert_eq!(graph.vertex_by_id("B").unwrap().neighbors()[0].cost, 9.0);

        assert!(graph.set_value("e", "lots").is_err());
        assert_eq!(graph.edge_by_id("e").unwrap().value(), "9");
        assert!(matches!(
            graph.set_value("zzz", "1").unwrap_err(),
            GraphError::NotFound { .. }
        ));
    }

    #[test]
    fn test_vertex_by_label_requires_unique_match() {
        let mut graph = GraphModel::new();
        let labeled = |id: &str, label: &str| {
            Vertex::new(ElementCore::new(id, label, StyleProperties::parse("ellipse;")).unwrap())
        };
        graph.insert_vertex(labeled("v1", "Home")).unwrap();
        graph.insert_vertex(labeled("v2", "Work")).unwrap();
        graph.insert_vertex(labeled("v3", "Work")).unwrap();

        assert_eq!(graph.vertex_by_label("Home").unwrap().id(), "v1");
        assert!(graph.vertex_by_label("Work").is_none());
        assert!(graph.vertex_by_label("Gym").is_none());
    }

    #[test]
    fn test_serialize_writes_value_and_style() {
        let mut graph = two_vertices();
        graph.set_value("A", "Start").unwrap();
        graph.set_style_property("A", "fillColor", "#FFD700").unwrap();

        let mut document = DiagramDocument::from_cells(vec![
            CellNode::from_pairs([("id", "A"), ("value", "A"), ("style", "ellipse;")]),
            CellNode::from_pairs([("id", "other"), ("value", "untouched")]),
        ]);
        let written = graph.serialize(&mut document);

        assert_eq!(written, 1);
        let cell = document.cell("A").unwrap();
        assert_eq!(cell.attribute("value"), Some("Start"));
        assert_eq!(cell.attribute("style"), Some("ellipse;fillColor=#FFD700;"));
        assert_eq!(
            document.cell("other").unwrap().attribute("value"),
            Some("untouched")
        );
    }

    #[test]
    fn test_serialize_targets_classified_cell_on_shared_id() {
        let mut document = DiagramDocument::from_cells(vec![
            CellNode::from_pairs([("id", "A"), ("value", "decoration")]),
            CellNode::from_pairs([("id", "A"), ("value", "A"), ("style", "ellipse;")]),
        ]);
        let mut graph = GraphModel::new();
        crate::plugins::drawio::ElementClassifier::new()
            .classify(document.cells(), &mut graph)
            .unwrap();
        assert_eq!(graph.vertex_by_id("A").unwrap().core().position(), Some(1));

        graph.set_value("A", "Start").unwrap();
        assert_eq!(graph.serialize(&mut document), 1);

        let cells = document.cells();
        assert_eq!(cells[0].attribute("value"), Some("decoration"));
        assert_eq!(cells[0].attribute("style"), None);
        assert_eq!(cells[1].attribute("value"), Some("Start"));
        assert_eq!(cells[1].attribute("style"), Some("ellipse;"));
    }

    #[test]
    fn test_clear() {
        let mut graph = two_vertices();
        graph.insert_edge(edge("e", "", "", 0, 1)).unwrap();
        graph.build_links().unwrap();
        graph.clear();

        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.is_linked());
        assert!(graph.element("A").is_none());
    }
}
