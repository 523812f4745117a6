//! draw.io detector implementation
//!
//! Recognises draw.io XML by its element names, without parsing the document.

use tracing::{debug, info, trace};

use crate::core::Detector;

/// draw.io detector implementation
pub struct DrawioDetector;

// Element names that only appear in draw.io / mxGraph documents
const MARKERS: [&str; 3] = ["<mxGraphModel", "<mxfile", "<mxCell"];

impl DrawioDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DrawioDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DrawioDetector {
    fn detect(&self, input: &str) -> bool {
        let input = input.trim();
        trace!(input_len = input.len(), "DrawioDetector::detect called");

        if input.is_empty() {
            debug!("Empty input, detection failed");
            return false;
        }

        if !input.starts_with('<') {
            debug!("Input is not XML, detection failed");
            return false;
        }

        if let Some(marker) = MARKERS.iter().find(|marker| input.contains(*marker)) {
            info!(marker, "Detected draw.io document");
            return true;
        }

        trace!("No draw.io patterns detected");
        false
    }

    fn confidence(&self, input: &str) -> f64 {
        let input = input.trim();
        if input.is_empty() || !input.starts_with('<') {
            return 0.0;
        }

        let mut score: f64 = 0.0;
        if input.contains("<mxGraphModel") {
            score += 0.5;
        }
        if input.contains("<mxfile") {
            score += 0.2;
        }
        if input.contains("<root") {
            score += 0.1;
        }

        let cell_count = input.matches("<mxCell").count();
        if cell_count > 0 {
            score += 0.1 * (cell_count as f64).min(3.0);
        }

        score.min(1.0)
    }

    fn diagram_type(&self) -> &'static str {
        "drawio"
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = MARKERS.to_vec();
        patterns.extend(["<root", "<diagram"]);
        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_drawio_documents() {
        let detector = DrawioDetector::new();
        assert!(detector.detect("<mxGraphModel><root/></mxGraphModel>"));
        assert!(detector.detect("  <mxfile host=\"app.diagrams.net\"></mxfile>\n"));
        assert!(detector.detect("<root><mxCell id=\"0\"/></root>"));
    }

    #[test]
    fn test_rejects_other_input() {
        let detector = DrawioDetector::new();
        assert!(!detector.detect(""));
        assert!(!detector.detect("graph TD\n  A --> B"));
        assert!(!detector.detect("<svg><g/></svg>"));
        assert!(!detector.detect("mxGraphModel"));
    }

    #[test]
    fn test_confidence_scoring() {
        let detector = DrawioDetector::new();
        let bare = "<mxGraphModel><root/></mxGraphModel>";
        let full = r#"<mxfile><diagram><mxGraphModel><root>
            <mxCell id="0"/><mxCell id="1" parent="0"/></root></mxGraphModel></diagram></mxfile>"#;

        assert!(detector.confidence(bare) >= 0.5);
        assert!(detector.confidence(full) > detector.confidence(bare));
        assert!(detector.confidence(full) <= 1.0);
        assert_eq!(detector.confidence("plain text"), 0.0);
    }

    #[test]
    fn test_metadata() {
        let detector = DrawioDetector::new();
        assert_eq!(detector.diagram_type(), "drawio");
        assert!(detector.patterns().contains(&"<mxCell"));
    }
}
