//! Command-line interface for the drawpath utility
//!
//! Loads draw.io diagrams, reports their graph structure and computes
//! shortest paths between vertices.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use drawpath::core::logging::init_logging;
use drawpath::core::Database;
use drawpath::plugins::shortest_path::ShortestPathEngine;
use drawpath::plugins::Orchestrator;
use drawpath::{EngineConfig, HeapMode};

use crate::report::{resolve_vertex, InspectReport, PathsReport};

/// Drawpath - shortest paths over draw.io diagrams
#[derive(Parser)]
#[command(name = "drawpath")]
#[command(about = "Compute shortest paths over graphs drawn in draw.io")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute minimum costs from a source vertex
    Paths {
        /// Input draw.io file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the report (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source vertex id or unique label
        #[arg(short, long)]
        source: String,

        /// Only report this vertex (id or unique label)
        #[arg(short, long)]
        target: Option<String>,

        /// Heap discipline used by the engine
        #[arg(long, value_enum, default_value_t = HeapChoice::Lazy)]
        heap: HeapChoice,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the classified vertices, edges and texts
    Inspect {
        /// Input draw.io file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect the document format of the input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Check that a diagram loads into a valid graph
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Heap discipline choices
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum HeapChoice {
    /// Heap built once, only the root sifted down
    #[default]
    Lazy,
    /// Decrease-key on every relaxation
    Indexed,
}

impl From<HeapChoice> for HeapMode {
    fn from(value: HeapChoice) -> Self {
        match value {
            HeapChoice::Lazy => HeapMode::Lazy,
            HeapChoice::Indexed => HeapMode::Indexed,
        }
    }
}

/// Main CLI application
pub struct DrawpathApp {
    orchestrator: Orchestrator,
}

impl DrawpathApp {
    /// Create a new application instance with the draw.io plugins
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::with_drawio_plugins(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var("DRAWPATH_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("DRAWPATH_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Drawpath v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Paths {
                input,
                output,
                source,
                target,
                heap,
                json,
            } => {
                let content = self.read_input(input)?;
                let report = self.paths_report(&content, &source, target.as_deref(), heap, json)?;
                self.write_output(output, &report)
            }
            Commands::Inspect { input, json } => {
                let content = self.read_input(input)?;
                let report = self.inspect_report(&content, json)?;
                self.write_output(None, &report)
            }
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
        }
    }

    /// Load `content`, run the engine and render the report
    pub fn paths_report(
        &self,
        content: &str,
        source: &str,
        target: Option<&str>,
        heap: HeapChoice,
        json: bool,
    ) -> Result<String> {
        let graph = self.orchestrator.load(content)?;
        let source_id = resolve_vertex(&graph, source)?.id();
        let target_id = target
            .map(|name| resolve_vertex(&graph, name).map(|vertex| vertex.id()))
            .transpose()?;
        debug!(source_id, ?target_id, heap = ?heap, "Resolved path endpoints");

        let mut engine = ShortestPathEngine::with_config(&graph, EngineConfig::new(heap.into()));
        engine.find_minimum_paths_from(source_id)?;

        let report = PathsReport::from_engine(&engine, target_id)?;
        if json {
            Ok(serde_json::to_string_pretty(&report)?)
        } else {
            Ok(report.to_text())
        }
    }

    /// Load `content` and describe the classified graph
    pub fn inspect_report(&self, content: &str, json: bool) -> Result<String> {
        let graph = self.orchestrator.load(content)?;
        let report = InspectReport::from_graph(&graph);
        if json {
            Ok(serde_json::to_string_pretty(&report)?)
        } else {
            Ok(report.to_text())
        }
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.orchestrator.detect_diagram_type(&content) {
            Ok(diagram_type) => {
                println!("{}", diagram_type);
                Ok(())
            }
            Err(e) => {
                eprintln!("Could not detect diagram type: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let diagram_type = match self.orchestrator.detect_diagram_type(&content) {
            Ok(diagram_type) => diagram_type,
            Err(_) => {
                println!("✗ Could not detect diagram type");
                return Err(anyhow!("Unknown diagram type"));
            }
        };

        match self.orchestrator.load(&content) {
            Ok(graph) => {
                println!(
                    "✓ Valid {} diagram: {} vertices, {} edges",
                    diagram_type,
                    graph.vertex_count(),
                    graph.edge_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid {} diagram: {}", diagram_type, e);
                Err(e)
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                if content.is_empty() || content.ends_with('\n') {
                    print!("{}", content);
                } else {
                    println!("{}", content);
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for DrawpathApp {
    fn default() -> Self {
        Self::new()
    }
}
