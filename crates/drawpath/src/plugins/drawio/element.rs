//! Typed graph elements
//!
//! Every classified cell shares an [`ElementCore`] (id, value, style). The
//! role-specific data lives in [`Vertex`], [`Edge`] and [`Text`], and
//! cross-references between elements are arena indices rather than
//! pointers.

use tracing::trace;

use crate::core::{
    AttributeView, EdgeIndex, ElementRef, ElementRole, GraphError, GraphResult, StyleProperties,
    VertexIndex,
};

/// Style key marking a vertex
pub const VERTEX_FLAG: &str = "ellipse";
/// Style key marking a floating text label
pub const TEXT_FLAG: &str = "text";
/// Attribute marking an edge (presence only)
pub const EDGE_ATTRIBUTE: &str = "edge";
/// Arrow marker value meaning "no arrowhead"
pub const NO_ARROW: &str = "none";

/// Fields shared by every classified element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementCore {
    id: String,
    value: String,
    style: StyleProperties,
    /// Index of the source cell in its document, when classified from one
    position: Option<usize>,
}

impl ElementCore {
    /// Create a new element core; the id must be non-empty
    pub fn new(
        id: impl Into<String>,
        value: impl Into<String>,
        style: StyleProperties,
    ) -> GraphResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::empty_argument("element id"));
        }
        Ok(Self {
            id,
            value: value.into(),
            style,
            position: None,
        })
    }

    /// Remember which document cell this element came from
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Build the core from a cell, with its already-parsed style
    pub fn from_view(
        role: ElementRole,
        view: &impl AttributeView,
        style: StyleProperties,
    ) -> GraphResult<Self> {
        let id = view
            .attribute("id")
            .ok_or_else(|| GraphError::missing_attribute(role, None, "id"))?;
        Self::new(id, view.attribute("value").unwrap_or(""), style)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn style(&self) -> &StyleProperties {
        &self.style
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub(crate) fn style_mut(&mut self) -> &mut StyleProperties {
        &mut self.style
    }
}

/// Directed adjacency entry built during link building
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigableNeighbor {
    pub neighbor: VertexIndex,
    pub connecting_edge: EdgeIndex,
    pub cost: f64,
}

impl NavigableNeighbor {
    pub fn new(neighbor: VertexIndex, connecting_edge: EdgeIndex, cost: f64) -> Self {
        Self {
            neighbor,
            connecting_edge,
            cost,
        }
    }
}

/// A graph vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    core: ElementCore,
    neighbors: Vec<NavigableNeighbor>,
}

impl Vertex {
    pub fn new(core: ElementCore) -> Self {
        Self {
            core,
            neighbors: Vec::new(),
        }
    }

    pub fn core(&self) -> &ElementCore {
        &self.core
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn value(&self) -> &str {
        self.core.value()
    }

    /// Outgoing adjacency, empty until links are built
    pub fn neighbors(&self) -> &[NavigableNeighbor] {
        &self.neighbors
    }

    pub(crate) fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    pub(crate) fn neighbors_mut(&mut self) -> &mut Vec<NavigableNeighbor> {
        &mut self.neighbors
    }
}

/// One end of an edge that may carry an arrow marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowEnd {
    Start,
    End,
}

impl ArrowEnd {
    /// The style key holding this end's marker
    pub fn style_key(&self) -> &'static str {
        match self {
            ArrowEnd::Start => "startArrow",
            ArrowEnd::End => "endArrow",
        }
    }
}

/// Whether an edge end renders an arrowhead
///
/// A marker counts as present when its key is absent (both ends default
/// to an arrow) or set to anything other than `none`.
pub fn arrow_present(style: &StyleProperties, end: ArrowEnd) -> bool {
    match style.get(end.style_key()) {
        None => true,
        Some(marker) => marker != NO_ARROW,
    }
}

/// Parse an edge value as a traversal cost
///
/// Empty values cost nothing; anything else must be a finite,
/// non-negative number.
pub fn parse_cost(edge_id: &str, value: &str) -> GraphResult<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(cost) if cost.is_finite() && cost >= 0.0 => Ok(cost),
        _ => Err(GraphError::invalid_cost(edge_id, value)),
    }
}

/// A connection between two vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    core: ElementCore,
    source: VertexIndex,
    target: VertexIndex,
    bidirectional: bool,
}

impl Edge {
    /// Create an edge and derive its directionality from the arrow markers
    ///
    /// With exactly one arrowhead the edge is one-directional, and a lone
    /// start arrow swaps the ends so `source` is always the tail.
    pub fn new(core: ElementCore, source: VertexIndex, target: VertexIndex) -> Self {
        let start = arrow_present(core.style(), ArrowEnd::Start);
        let end = arrow_present(core.style(), ArrowEnd::End);
        let bidirectional = start == end;

        let (source, target) = if !bidirectional && start {
            (target, source)
        } else {
            (source, target)
        };

        trace!(
            edge_id = %core.id(),
            start_arrow = start,
            end_arrow = end,
            bidirectional,
            "Derived edge direction"
        );

        Self {
            core,
            source,
            target,
            bidirectional,
        }
    }

    pub fn core(&self) -> &ElementCore {
        &self.core
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn value(&self) -> &str {
        self.core.value()
    }

    /// Tail vertex of the edge
    pub fn source(&self) -> VertexIndex {
        self.source
    }

    /// Arrowhead vertex of the edge
    pub fn target(&self) -> VertexIndex {
        self.target
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// The traversal cost encoded in the edge value
    pub fn cost(&self) -> GraphResult<f64> {
        parse_cost(self.core.id(), self.core.value())
    }

    pub(crate) fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }
}

/// A floating label attached to a vertex or an edge
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    core: ElementCore,
    parent: ElementRef,
}

impl Text {
    pub fn new(core: ElementCore, parent: ElementRef) -> Self {
        Self { core, parent }
    }

    pub fn core(&self) -> &ElementCore {
        &self.core
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn value(&self) -> &str {
        self.core.value()
    }

    /// The vertex or edge this label belongs to
    pub fn parent(&self) -> ElementRef {
        self.parent
    }

    pub(crate) fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }
}
