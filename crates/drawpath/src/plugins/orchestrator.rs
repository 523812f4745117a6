//! Plugin orchestrator for coordinating the loading pipeline
//!
//! The orchestrator manages the flow of data through all plugins:
//! Detector → Parser → GraphModel → ShortestPathEngine

use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{Database, Detector, EngineConfig, Parser};
use crate::plugins::drawio::{DrawioDetector, DrawioParser, GraphModel};
use crate::plugins::shortest_path::ShortestPathEngine;

/// Plugin orchestrator that coordinates the entire pipeline
///
/// Callers hand it raw input and get back a linked graph, or an engine that
/// has already run from a given source.
pub struct Orchestrator {
    detectors: HashMap<String, Box<dyn Detector>>,
    drawio_parser: Option<DrawioParser>,
    engine_config: EngineConfig,
}

impl Orchestrator {
    /// Create a new empty orchestrator
    pub fn new() -> Self {
        Self {
            detectors: HashMap::new(),
            drawio_parser: None,
            engine_config: EngineConfig::default(),
        }
    }

    /// Create a new orchestrator with the draw.io detector and parser registered
    pub fn with_drawio_plugins() -> Self {
        let mut orchestrator = Self::new();
        orchestrator.drawio_parser = Some(DrawioParser::new());
        orchestrator.register_detector("drawio".to_string(), Box::new(DrawioDetector::new()));
        orchestrator
    }

    /// Use `config` for every engine this orchestrator creates
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.engine_config = config;
        self
    }

    pub fn engine_config(&self) -> EngineConfig {
        self.engine_config
    }

    /// Register a detector plugin
    pub fn register_detector(&mut self, name: String, detector: Box<dyn Detector>) {
        self.detectors.insert(name, detector);
    }

    /// Get available detector names, sorted
    pub fn get_detectors(&self) -> Vec<String> {
        let mut names: Vec<String> = self.detectors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if the draw.io parser is available
    pub fn has_drawio_plugins(&self) -> bool {
        self.drawio_parser.is_some()
    }

    /// Detect the document format of the input
    pub fn detect_diagram_type(&self, input: &str) -> Result<String> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        trace!("Starting diagram type detection");

        let mut best: Option<(&String, f64)> = None;
        for (name, detector) in &self.detectors {
            if !detector.detect(input) {
                continue;
            }
            let confidence = detector.confidence(input);
            trace!(detector = name, confidence, "Detector matched");
            if best.map_or(true, |(_, score)| confidence > score) {
                best = Some((name, confidence));
            }
        }

        match best {
            Some((name, confidence)) => {
                info!(detector = name, confidence, "Detected diagram type");
                Ok(name.clone())
            }
            None => {
                warn!("No suitable detector found for input");
                Err(anyhow::anyhow!("No suitable detector found for input"))
            }
        }
    }

    /// Detect, parse and link the input
    pub fn load(&self, input: &str) -> Result<GraphModel> {
        let load_span = span!(Level::INFO, "load_diagram", input_len = input.len());
        let _enter = load_span.enter();

        let diagram_type = self.detect_diagram_type(input)?;
        debug!(diagram_type, "Diagram type detected");

        if diagram_type != "drawio" {
            warn!(diagram_type, "Unsupported diagram type");
            return Err(anyhow::anyhow!(
                "Only draw.io diagrams are currently supported"
            ));
        }

        self.load_drawio(input)
    }

    /// Parse and link draw.io input directly (skip detection)
    pub fn load_drawio(&self, input: &str) -> Result<GraphModel> {
        let parser = self
            .drawio_parser
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No draw.io parser available"))?;

        let mut graph = GraphModel::new();
        parser.parse(input, &mut graph)?;
        info!(
            vertex_count = graph.vertex_count(),
            edge_count = graph.edge_count(),
            text_count = graph.text_count(),
            "Diagram loaded"
        );
        Ok(graph)
    }

    /// Create an engine over `graph` with this orchestrator's configuration
    pub fn engine<'g>(&self, graph: &'g GraphModel) -> ShortestPathEngine<'g> {
        ShortestPathEngine::with_config(graph, self.engine_config)
    }

    /// Run the engine from `source_id` and return it for queries
    pub fn shortest_paths<'g>(
        &self,
        graph: &'g GraphModel,
        source_id: &str,
    ) -> Result<ShortestPathEngine<'g>> {
        let mut engine = self.engine(graph);
        engine.find_minimum_paths_from(source_id)?;
        Ok(engine)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
