//! Core parser trait for diagram documents
//!
//! This trait defines the interface for turning a diagram document into
//! typed elements stored in a database.

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use drawpath::core::{Database, Parser};
/// use drawpath::plugins::drawio::{DrawioParser, GraphModel};
///
/// let xml = r#"<mxGraphModel><root>
///   <mxCell id="a" value="A" style="ellipse;" vertex="1" parent="1"/>
/// </root></mxGraphModel>"#;
///
/// let parser = DrawioParser::new();
/// let mut graph = GraphModel::new();
/// parser.parse(xml, &mut graph).unwrap();
/// assert_eq!(graph.vertex_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse a document into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input can be parsed by this parser
    fn can_parse(&self, input: &str) -> bool;
}
