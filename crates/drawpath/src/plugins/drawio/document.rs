//! Loading draw.io XML into owned cell nodes
//!
//! The document is read once, fully, with `roxmltree`. The cells under the
//! first `<root>` element become [`CellNode`]s; everything else in the
//! file (geometry, page settings) is opaque to the pipeline.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::core::{AttributeView, CellNode, GraphError, GraphResult};

/// The flat cell list of one draw.io diagram page
#[derive(Debug, Clone, Default)]
pub struct DiagramDocument {
    cells: Vec<CellNode>,
    index: HashMap<String, usize>,
}

impl DiagramDocument {
    /// Parse uncompressed draw.io XML
    ///
    /// Fails with a document error when there is no `<root>` element, which
    /// includes diagrams saved with a compressed `<diagram>` payload.
    pub fn parse(xml: &str) -> GraphResult<Self> {
        let document = roxmltree::Document::parse(xml)?;

        let Some(root) = document.descendants().find(|n| n.has_tag_name("root")) else {
            let compressed = document.descendants().any(|n| {
                n.has_tag_name("diagram") && n.text().is_some_and(|t| !t.trim().is_empty())
            });
            if compressed {
                warn!("Diagram payload is compressed");
                return Err(GraphError::document(
                    "compressed diagrams are not supported, export as uncompressed XML"
                        .to_string(),
                ));
            }
            return Err(GraphError::document("no <root> element found".to_string()));
        };

        let cells: Vec<CellNode> = root
            .children()
            .filter(|n| n.is_element())
            .map(|n| {
                let mut cell = CellNode::new(n.tag_name().name());
                for attribute in n.attributes() {
                    cell.set_attribute(attribute.name(), attribute.value());
                }
                cell
            })
            .collect();

        debug!(cell_count = cells.len(), "Loaded diagram cells");
        Ok(Self::from_cells(cells))
    }

    /// Build a document from cells already in memory
    pub fn from_cells(cells: Vec<CellNode>) -> Self {
        let mut index = HashMap::new();
        for (position, cell) in cells.iter().enumerate() {
            if let Some(id) = cell.id() {
                if index.contains_key(id) {
                    trace!(cell_id = id, "Duplicate cell id, keeping first");
                    continue;
                }
                index.insert(id.to_string(), position);
            }
        }
        Self { cells, index }
    }

    /// All cells in document order
    pub fn cells(&self) -> &[CellNode] {
        &self.cells
    }

    /// Get a cell by id
    pub fn cell(&self, id: &str) -> Option<&CellNode> {
        self.index.get(id).map(|&position| &self.cells[position])
    }

    /// Get a mutable cell by id
    pub fn cell_mut(&mut self, id: &str) -> Option<&mut CellNode> {
        let position = *self.index.get(id)?;
        self.cells.get_mut(position)
    }

    /// Get a mutable cell by its index in document order
    pub fn cell_at_mut(&mut self, position: usize) -> Option<&mut CellNode> {
        self.cells.get_mut(position)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"<mxfile host="app.diagrams.net">
  <diagram id="page-1" name="Page-1">
    <mxGraphModel dx="800" dy="600" grid="1">
      <root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
        <mxCell id="a" value="A" style="ellipse;whiteSpace=wrap;" vertex="1" parent="1">
          <mxGeometry x="10" y="10" width="40" height="40" as="geometry"/>
        </mxCell>
        <mxCell id="e" value="3" style="endArrow=classic;" edge="1" parent="1" source="a" target="a"/>
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>"##;

    #[test]
    fn test_parse_cells_in_order() {
        let doc = DiagramDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.len(), 4);
        let ids: Vec<_> = doc.cells().iter().filter_map(|c| c.id()).collect();
        assert_eq!(ids, vec!["0", "1", "a", "e"]);
        assert_eq!(doc.cell("a").unwrap().attribute("value"), Some("A"));
        assert_eq!(doc.cell("e").unwrap().attribute("edge"), Some("1"));
    }

    #[test]
    fn test_cell_mut() {
        let mut doc = DiagramDocument::parse(SAMPLE).unwrap();
        doc.cell_mut("a").unwrap().set_attribute("value", "Start");
        assert_eq!(doc.cell("a").unwrap().attribute("value"), Some("Start"));
        assert!(doc.cell_mut("missing").is_none());
    }

    #[test]
    fn test_missing_root() {
        let err = DiagramDocument::parse("<mxGraphModel/>").unwrap_err();
        assert!(matches!(err, GraphError::Document { .. }));
    }

    #[test]
    fn test_compressed_payload() {
        let xml = r#"<mxfile><diagram id="x">7VlNc5swEP01Ph</diagram></mxfile>"#;
        let err = DiagramDocument::parse(xml).unwrap_err();
        assert!(err.to_string().contains("compressed"));
    }

    #[test]
    fn test_malformed_xml() {
        let err = DiagramDocument::parse("<root><mxCell id='a'></root>").unwrap_err();
        assert!(matches!(err, GraphError::Xml { .. }));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let doc = DiagramDocument::from_cells(vec![
            CellNode::from_pairs([("id", "x"), ("value", "first")]),
            CellNode::from_pairs([("id", "x"), ("value", "second")]),
        ]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.cell("x").unwrap().attribute("value"), Some("first"));
    }
}
