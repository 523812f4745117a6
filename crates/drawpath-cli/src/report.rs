//! Serializable reports printed by the CLI
//!
//! Every report renders either as human-readable text or as JSON. Infinite
//! costs become `null` in JSON, since JSON has no infinity.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt::Write as _;

use drawpath::core::Database;
use drawpath::plugins::drawio::{GraphModel, Vertex};
use drawpath::plugins::shortest_path::ShortestPathEngine;

/// Resolve a vertex by id, falling back to a unique label
pub fn resolve_vertex<'g>(graph: &'g GraphModel, name: &str) -> Result<&'g Vertex> {
    graph
        .vertex_by_id(name)
        .or_else(|| graph.vertex_by_label(name))
        .ok_or_else(|| anyhow!("No vertex with id or unique label '{}'", name))
}

fn finite(cost: f64) -> Option<f64> {
    cost.is_finite().then_some(cost)
}

#[derive(Debug, Serialize)]
pub struct PathsReport {
    pub source: String,
    pub heap_mode: String,
    pub vertices: Vec<VertexCost>,
}

#[derive(Debug, Serialize)]
pub struct VertexCost {
    pub id: String,
    pub label: String,
    pub cost: Option<f64>,
    pub predecessor: Option<String>,
    pub via_edge: Option<String>,
    /// Vertex ids from the source, present when the vertex is reachable
    pub path: Option<Vec<String>>,
}

impl PathsReport {
    /// Collect results from a finished run, optionally for one target only
    pub fn from_engine(engine: &ShortestPathEngine<'_>, target: Option<&str>) -> Result<Self> {
        let graph = engine.graph();
        let source = engine
            .source()
            .ok_or_else(|| anyhow!("Shortest paths have not been computed"))?;

        let mut vertices = Vec::new();
        for (vertex, info) in engine.results() {
            if target.is_some_and(|id| id != vertex.id()) {
                continue;
            }
            let path = engine.path_to(vertex.id())?.map(|path| {
                path.vertices
                    .iter()
                    .map(|index| graph.vertex(*index).id().to_string())
                    .collect()
            });
            vertices.push(VertexCost {
                id: vertex.id().to_string(),
                label: vertex.value().to_string(),
                cost: finite(info.minimum_cost()),
                predecessor: info
                    .predecessor()
                    .map(|index| graph.vertex(index).id().to_string()),
                via_edge: info
                    .connecting_edge()
                    .map(|index| graph.edge(index).id().to_string()),
                path,
            });
        }

        Ok(Self {
            source: source.id().to_string(),
            heap_mode: engine.heap_mode().to_string(),
            vertices,
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Shortest paths from {} ({} heap)",
            self.source, self.heap_mode
        );
        for vertex in &self.vertices {
            let name = display_name(&vertex.id, &vertex.label);
            match (vertex.cost, &vertex.path) {
                (Some(cost), Some(path)) => {
                    let _ = writeln!(out, "  {}: cost {} via {}", name, cost, path.join(" -> "));
                }
                (Some(cost), None) => {
                    let _ = writeln!(out, "  {}: cost {}", name, cost);
                }
                (None, _) => {
                    let _ = writeln!(out, "  {}: unreachable", name);
                }
            }
        }
        out
    }
}

fn display_name(id: &str, label: &str) -> String {
    if label.is_empty() || label == id {
        id.to_string()
    } else {
        format!("{} [{}]", id, label)
    }
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub vertices: Vec<VertexSummary>,
    pub edges: Vec<EdgeSummary>,
    pub texts: Vec<TextSummary>,
}

#[derive(Debug, Serialize)]
pub struct VertexSummary {
    pub id: String,
    pub label: String,
    pub neighbors: Vec<NeighborSummary>,
}

#[derive(Debug, Serialize)]
pub struct NeighborSummary {
    pub vertex: String,
    pub edge: String,
    pub cost: f64,
}

#[derive(Debug, Serialize)]
pub struct EdgeSummary {
    pub id: String,
    pub source: String,
    pub target: String,
    pub value: String,
    pub bidirectional: bool,
}

#[derive(Debug, Serialize)]
pub struct TextSummary {
    pub id: String,
    pub value: String,
    pub parent: String,
}

impl InspectReport {
    pub fn from_graph(graph: &GraphModel) -> Self {
        let vertices = graph
            .vertices()
            .map(|vertex| VertexSummary {
                id: vertex.id().to_string(),
                label: vertex.value().to_string(),
                neighbors: vertex
                    .neighbors()
                    .iter()
                    .map(|neighbor| NeighborSummary {
                        vertex: graph.vertex(neighbor.neighbor).id().to_string(),
                        edge: graph.edge(neighbor.connecting_edge).id().to_string(),
                        cost: neighbor.cost,
                    })
                    .collect(),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|edge| EdgeSummary {
                id: edge.id().to_string(),
                source: graph.vertex(edge.source()).id().to_string(),
                target: graph.vertex(edge.target()).id().to_string(),
                value: edge.value().to_string(),
                bidirectional: edge.is_bidirectional(),
            })
            .collect();

        let texts = graph
            .texts()
            .map(|text| TextSummary {
                id: text.id().to_string(),
                value: text.value().to_string(),
                parent: graph.core(text.parent()).id().to_string(),
            })
            .collect();

        Self {
            vertices,
            edges,
            texts,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} vertices, {} edges, {} texts",
            self.vertices.len(),
            self.edges.len(),
            self.texts.len()
        );

        for vertex in &self.vertices {
            let _ = writeln!(out, "vertex {}", display_name(&vertex.id, &vertex.label));
            for neighbor in &vertex.neighbors {
                let _ = writeln!(
                    out,
                    "  -> {} (edge {}, cost {})",
                    neighbor.vertex, neighbor.edge, neighbor.cost
                );
            }
        }
        for edge in &self.edges {
            let arrow = if edge.bidirectional { "<->" } else { "->" };
            let _ = writeln!(
                out,
                "edge {}: {} {} {} value '{}'",
                edge.id, edge.source, arrow, edge.target, edge.value
            );
        }
        for text in &self.texts {
            let _ = writeln!(out, "text {}: '{}' on {}", text.id, text.value, text.parent);
        }
        out
    }
}
