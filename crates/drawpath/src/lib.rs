//! Drawpath - shortest paths over draw.io diagrams
//!
//! A library that reads an uncompressed draw.io document, rebuilds the
//! weighted graph it depicts (ellipses are vertices, connectors are edges,
//! `text` labels carry costs) and runs single-source Dijkstra over it.
//!
//! # Quick Start
//!
//! ```rust
//! let xml = r#"<mxGraphModel><root>
//!   <mxCell id="0"/>
//!   <mxCell id="1" parent="0"/>
//!   <mxCell id="a" value="A" style="ellipse;" vertex="1" parent="1"/>
//!   <mxCell id="b" value="B" style="ellipse;" vertex="1" parent="1"/>
//!   <mxCell id="ab" value="3" style="endArrow=classic;startArrow=none;" edge="1" parent="1" source="a" target="b"/>
//! </root></mxGraphModel>"#;
//!
//! let graph = drawpath::load(xml).unwrap();
//! let engine = drawpath::shortest_paths(&graph, "a").unwrap();
//! assert_eq!(engine.minimum_cost("b").unwrap(), 3.0);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use drawpath::prelude::*;
//!
//! let xml = r#"<mxGraphModel><root>
//!   <mxCell id="a" value="A" style="ellipse;" vertex="1" parent="1"/>
//!   <mxCell id="b" value="B" style="ellipse;" vertex="1" parent="1"/>
//!   <mxCell id="c" value="C" style="ellipse;" vertex="1" parent="1"/>
//!   <mxCell id="ab" value="1" style="" edge="1" parent="1" source="a" target="b"/>
//!   <mxCell id="bc" value="1" style="" edge="1" parent="1" source="b" target="c"/>
//! </root></mxGraphModel>"#;
//!
//! let parser = DrawioParser::new();
//! let mut graph = GraphModel::new();
//! parser.parse(xml, &mut graph).unwrap();
//! assert_eq!(graph.vertex_count(), 3);
//!
//! let mut engine =
//!     ShortestPathEngine::with_config(&graph, EngineConfig::new(HeapMode::Indexed));
//! engine.find_minimum_paths_from("c").unwrap();
//! let path = engine.path_to("a").unwrap().unwrap();
//! assert_eq!(path.hops(), 2);
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Detector, EngineConfig, GraphError, GraphResult, HeapMode, Parser,
        StyleProperties,
    };
    pub use crate::plugins::drawio::{
        DiagramDocument, DrawioDetector, DrawioParser, Edge, GraphModel, Text, Vertex,
    };
    pub use crate::plugins::shortest_path::{PathInformation, ShortestPath, ShortestPathEngine};
}

/// Load a draw.io document into a linked graph
///
/// # Example
/// ```rust
/// use drawpath::prelude::Database;
///
/// let graph = drawpath::load(r#"<mxGraphModel><root>
///   <mxCell id="a" style="ellipse;" vertex="1"/>
/// </root></mxGraphModel>"#).unwrap();
/// assert_eq!(graph.vertex_count(), 1);
/// ```
pub fn load(input: &str) -> anyhow::Result<plugins::drawio::GraphModel> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_drawio_plugins().load(input)
}

/// Read and load a draw.io file
pub fn load_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<plugins::drawio::GraphModel> {
    let input = std::fs::read_to_string(path.as_ref()).map_err(GraphError::from)?;
    load(&input)
}

/// Run shortest paths from `source_id` with the default engine configuration
pub fn shortest_paths<'g>(
    graph: &'g plugins::drawio::GraphModel,
    source_id: &str,
) -> anyhow::Result<plugins::shortest_path::ShortestPathEngine<'g>> {
    shortest_paths_with_config(graph, source_id, EngineConfig::default())
}

/// Run shortest paths from `source_id` with an explicit engine configuration
pub fn shortest_paths_with_config<'g>(
    graph: &'g plugins::drawio::GraphModel,
    source_id: &str,
    config: EngineConfig,
) -> anyhow::Result<plugins::shortest_path::ShortestPathEngine<'g>> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_drawio_plugins()
        .with_engine_config(config)
        .shortest_paths(graph, source_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DIAMOND: &str = r#"<mxGraphModel><root>
  <mxCell id="0"/>
  <mxCell id="1" parent="0"/>
  <mxCell id="n" value="North" style="ellipse;" vertex="1" parent="1"/>
  <mxCell id="w" value="West" style="ellipse;" vertex="1" parent="1"/>
  <mxCell id="e" value="East" style="ellipse;" vertex="1" parent="1"/>
  <mxCell id="s" value="South" style="ellipse;" vertex="1" parent="1"/>
  <mxCell id="nw" value="2" style="" edge="1" parent="1" source="n" target="w"/>
  <mxCell id="ne" value="5" style="" edge="1" parent="1" source="n" target="e"/>
  <mxCell id="ws" value="4" style="" edge="1" parent="1" source="w" target="s"/>
  <mxCell id="es" value="0.5" style="" edge="1" parent="1" source="e" target="s"/>
</root></mxGraphModel>"#;

    #[test]
    fn test_load() {
        let graph = load(DIAMOND).unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.is_linked());
    }

    #[test]
    fn test_shortest_paths() {
        let graph = load(DIAMOND).unwrap();
        let engine = shortest_paths(&graph, "n").unwrap();
        assert_eq!(engine.minimum_cost("s").unwrap(), 5.5);
        assert_eq!(engine.predecessor("s").unwrap().unwrap().value(), "East");
    }

    #[test]
    fn test_shortest_paths_with_config() {
        let graph = load(DIAMOND).unwrap();
        let engine =
            shortest_paths_with_config(&graph, "s", EngineConfig::new(HeapMode::Indexed)).unwrap();
        assert_eq!(engine.minimum_cost("n").unwrap(), 5.5);
        assert_eq!(engine.heap_mode(), HeapMode::Indexed);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DIAMOND.as_bytes()).unwrap();
        let graph = load_file(file.path()).unwrap();
        assert_eq!(graph.vertex_count(), 4);
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file("/definitely/not/here.drawio").unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_load_rejects_non_drawio() {
        assert!(load("graph TD; A-->B").is_err());
    }
}
