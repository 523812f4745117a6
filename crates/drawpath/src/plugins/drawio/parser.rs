//! draw.io parser implementation
//!
//! Loads the XML document, classifies its cells into the graph model and
//! builds the adjacency lists, so a parsed model is ready for path finding.

use anyhow::Result;
use tracing::{debug, span, Level};

use super::{ClassificationSummary, DiagramDocument, ElementClassifier, GraphModel};
use crate::core::{GraphResult, Parser};

/// draw.io parser implementation
pub struct DrawioParser {
    classifier: ElementClassifier,
}

impl DrawioParser {
    pub fn new() -> Self {
        Self {
            classifier: ElementClassifier::new(),
        }
    }

    /// Classify and link an already loaded document
    pub fn load_document(
        &self,
        document: &DiagramDocument,
        graph: &mut GraphModel,
    ) -> GraphResult<ClassificationSummary> {
        let summary = self.classifier.classify(document.cells(), graph)?;
        graph.build_links()?;
        Ok(summary)
    }
}

impl Default for DrawioParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<GraphModel> for DrawioParser {
    fn parse(&self, input: &str, database: &mut GraphModel) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_drawio", input_len = input.len());
        let _enter = parse_span.enter();

        let document = DiagramDocument::parse(input)?;
        let summary = self.load_document(&document, database)?;
        debug!(?summary, "Parsed draw.io document");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "drawio"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.contains("<root") && input.contains("<mxCell")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Database;

    const TRIANGLE: &str = r#"<mxGraphModel><root>
  <mxCell id="0"/>
  <mxCell id="1" parent="0"/>
  <mxCell id="a" value="A" style="ellipse;" vertex="1" parent="1"/>
  <mxCell id="b" value="B" style="ellipse;" vertex="1" parent="1"/>
  <mxCell id="c" value="C" style="ellipse;" vertex="1" parent="1"/>
  <mxCell id="ab" value="1" style="endArrow=none;startArrow=none;" edge="1" parent="1" source="a" target="b"/>
  <mxCell id="bc" value="2" style="endArrow=none;startArrow=none;" edge="1" parent="1" source="b" target="c"/>
</root></mxGraphModel>"#;

    #[test]
    fn test_parse_builds_linked_graph() {
        let parser = DrawioParser::new();
        let mut graph = GraphModel::new();
        parser.parse(TRIANGLE, &mut graph).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_linked());
        assert_eq!(graph.vertex_by_id("b").unwrap().neighbors().len(), 2);
    }

    #[test]
    fn test_parse_rejects_bad_cost() {
        let xml = TRIANGLE.replace(r#"value="2""#, r#"value="two""#);
        let parser = DrawioParser::new();
        let mut graph = GraphModel::new();
        let err = parser.parse(&xml, &mut graph).unwrap_err();
        assert!(err.to_string().contains("Invalid cost"));
    }

    #[test]
    fn test_parser_metadata() {
        let parser = DrawioParser::new();
        assert_eq!(parser.name(), "drawio");
        assert_eq!(parser.version(), "0.1.0");
        assert!(parser.can_parse(TRIANGLE));
        assert!(!parser.can_parse("graph TD"));
    }
}
