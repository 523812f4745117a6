//! draw.io diagram plugin
//!
//! Turns uncompressed draw.io XML into a linked [`GraphModel`] of vertices,
//! edges and text labels.

mod classifier;
mod database;
mod detector;
mod document;
mod element;
mod parser;

pub use classifier::*;
pub use database::*;
pub use detector::*;
pub use document::*;
pub use element::*;
pub use parser::*;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::core::{AttributeView, Database, Detector, Parser};

    const ROUTE: &str = r#"<mxfile host="app.diagrams.net">
  <diagram name="Page-1" id="p1">
    <mxGraphModel dx="1000" dy="700" grid="1">
      <root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
        <mxCell id="home" value="Home" style="ellipse;whiteSpace=wrap;html=1;" vertex="1" parent="1">
          <mxGeometry x="40" y="40" width="80" height="80" as="geometry"/>
        </mxCell>
        <mxCell id="work" value="Work" style="ellipse;whiteSpace=wrap;html=1;" vertex="1" parent="1">
          <mxGeometry x="240" y="40" width="80" height="80" as="geometry"/>
        </mxCell>
        <mxCell id="road" value="" style="endArrow=classic;startArrow=none;html=1;" edge="1" parent="1" source="home" target="work">
          <mxGeometry relative="1" as="geometry"/>
        </mxCell>
        <mxCell id="road-label" value="12" style="text;html=1;" vertex="1" connectable="0" parent="road">
          <mxGeometry x="-0.2" relative="1" as="geometry"/>
        </mxCell>
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>"#;

    #[test]
    fn test_full_pipeline() {
        let detector = DrawioDetector::new();
        assert!(detector.detect(ROUTE));
        assert_eq!(detector.diagram_type(), "drawio");

        let parser = DrawioParser::new();
        let mut graph = GraphModel::new();
        parser.parse(ROUTE, &mut graph).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.text_count(), 1);

        let road = graph.edge_by_id("road").unwrap();
        assert_eq!(road.value(), "12");
        assert!(!road.is_bidirectional());

        let home = graph.vertex_by_id("home").unwrap();
        assert_eq!(home.neighbors().len(), 1);
        assert_eq!(home.neighbors()[0].cost, 12.0);
        assert!(graph.vertex_by_id("work").unwrap().neighbors().is_empty());
    }

    #[test]
    fn test_edit_and_serialize() {
        let mut document = DiagramDocument::parse(ROUTE).unwrap();
        let mut graph = GraphModel::new();
        DrawioParser::new()
            .load_document(&document, &mut graph)
            .unwrap();

        graph.set_value("home", "House").unwrap();
        graph.set_style_property("work", "fillColor", "#ffcc00").unwrap();
        let written = graph.serialize(&mut document);
        assert_eq!(written, 4);

        let home = document.cell("home").unwrap();
        assert_eq!(home.attribute("value"), Some("House"));
        let style = document.cell("work").unwrap().style_properties().unwrap();
        assert_eq!(style.get("fillColor"), Some("#ffcc00"));
        assert!(style.contains("ellipse"));
    }
}
