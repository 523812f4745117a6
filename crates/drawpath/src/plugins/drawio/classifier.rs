//! Element classification
//!
//! Partitions raw diagram cells into vertices, edges and text labels. The
//! passes run in a fixed order (vertices, then edges, then texts) and each
//! pass removes what it matched, so a cell is classified at most once.
//! Each pass walks its cells from the end of the document to the start, so
//! the arenas hold elements in reverse document order. When several labels
//! share a parent, the one earliest in the document is applied last.
//! Edges resolve their endpoints against the vertices already registered,
//! and texts resolve their parent against vertices or edges.

use tracing::{debug, info, span, trace, Level};

use crate::core::{
    AttributeView, ElementRef, ElementRole, GraphError, GraphResult, StyleProperties,
    VertexIndex,
};

use super::database::GraphModel;
use super::element::{Edge, ElementCore, Text, Vertex, EDGE_ATTRIBUTE, TEXT_FLAG, VERTEX_FLAG};

/// Counts produced by one classification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationSummary {
    pub vertices: usize,
    pub edges: usize,
    pub texts: usize,
    /// Styled cells that matched no role
    pub dropped: usize,
    /// Cells without a style attribute, excluded up front
    pub unstyled: usize,
}

/// Classifier turning untyped cells into typed graph elements
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementClassifier;

impl ElementClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `cells` into `graph`
    ///
    /// Fails on the first malformed cell or unresolved reference; the graph
    /// must then be discarded.
    pub fn classify<V: AttributeView>(
        &self,
        cells: &[V],
        graph: &mut GraphModel,
    ) -> GraphResult<ClassificationSummary> {
        let classify_span = span!(Level::INFO, "classify", cell_count = cells.len());
        let _enter = classify_span.enter();

        let candidates: Vec<(usize, &V, StyleProperties)> = cells
            .iter()
            .enumerate()
            .filter_map(|(position, cell)| {
                cell.style_properties().map(|style| (position, cell, style))
            })
            .collect();
        let mut summary = ClassificationSummary {
            unstyled: cells.len() - candidates.len(),
            ..Default::default()
        };
        trace!(unstyled = summary.unstyled, "Excluded cells without style");

        let (vertices, rest): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|(_, _, style)| style.contains(VERTEX_FLAG));
        for (position, cell, style) in vertices.into_iter().rev() {
            let core = ElementCore::from_view(ElementRole::Vertex, cell, style)?
                .at_position(position);
            graph.insert_vertex(Vertex::new(core))?;
            summary.vertices += 1;
        }
        debug!(vertex_count = summary.vertices, "Classified vertices");

        let (edges, rest): (Vec<_>, Vec<_>) = rest
            .into_iter()
            .partition(|(_, cell, _)| cell.has_attribute(EDGE_ATTRIBUTE));
        for (position, cell, style) in edges.into_iter().rev() {
            let core = ElementCore::from_view(ElementRole::Edge, cell, style)?
                .at_position(position);
            let source = resolve_endpoint(graph, core.id(), cell, "source")?;
            let target = resolve_endpoint(graph, core.id(), cell, "target")?;
            graph.insert_edge(Edge::new(core, source, target))?;
            summary.edges += 1;
        }
        debug!(edge_count = summary.edges, "Classified edges");

        let (texts, rest): (Vec<_>, Vec<_>) = rest
            .into_iter()
            .partition(|(_, _, style)| style.contains(TEXT_FLAG));
        for (position, cell, style) in texts.into_iter().rev() {
            let core = ElementCore::from_view(ElementRole::Text, cell, style)?
                .at_position(position);
            let parent = resolve_parent(graph, core.id(), cell)?;
            graph.insert_text(Text::new(core, parent))?;
            summary.texts += 1;
        }
        debug!(text_count = summary.texts, "Classified texts");

        summary.dropped = rest.len();
        info!(
            vertices = summary.vertices,
            edges = summary.edges,
            texts = summary.texts,
            dropped = summary.dropped,
            "Classification completed"
        );
        Ok(summary)
    }
}

fn resolve_endpoint(
    graph: &GraphModel,
    edge_id: &str,
    cell: &impl AttributeView,
    attribute: &'static str,
) -> GraphResult<VertexIndex> {
    let reference = cell
        .attribute(attribute)
        .ok_or_else(|| GraphError::missing_attribute(ElementRole::Edge, Some(edge_id), attribute))?;
    graph.vertex_index(reference).ok_or_else(|| {
        GraphError::dangling(ElementRole::Edge, edge_id, attribute, reference, "vertex")
    })
}

fn resolve_parent(
    graph: &GraphModel,
    text_id: &str,
    cell: &impl AttributeView,
) -> GraphResult<ElementRef> {
    let reference = cell
        .attribute("parent")
        .ok_or_else(|| GraphError::missing_attribute(ElementRole::Text, Some(text_id), "parent"))?;

    if let Some(vertex) = graph.vertex_index(reference) {
        return Ok(ElementRef::Vertex(vertex));
    }
    if let Some(edge) = graph.edge_index(reference) {
        return Ok(ElementRef::Edge(edge));
    }
    Err(GraphError::dangling(
        ElementRole::Text,
        text_id,
        "parent",
        reference,
        "vertex or edge",
    ))
}
