//! Core type definitions for graph processing
//!
//! This module contains the small value types shared across the pipeline:
//! element roles, arena indices, and the engine configuration.

use std::fmt;
use std::str::FromStr;

/// Role a diagram cell plays once classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// A graph vertex (`ellipse` style key)
    Vertex,
    /// A connection between two vertices (`edge` attribute)
    Edge,
    /// A floating label attached to a vertex or an edge (`text` style key)
    Text,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRole::Vertex => write!(f, "vertex"),
            ElementRole::Edge => write!(f, "edge"),
            ElementRole::Text => write!(f, "text"),
        }
    }
}

/// Position of a vertex in the graph's vertex arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIndex(pub usize);

/// Position of an edge in the graph's edge arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(pub usize);

/// Position of a text label in the graph's text arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextIndex(pub usize);

impl VertexIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

impl EdgeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

impl TextIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Tagged reference to any classified element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Vertex(VertexIndex),
    Edge(EdgeIndex),
    Text(TextIndex),
}

impl ElementRef {
    /// The role tag of the referenced element
    pub fn role(&self) -> ElementRole {
        match self {
            ElementRef::Vertex(_) => ElementRole::Vertex,
            ElementRef::Edge(_) => ElementRole::Edge,
            ElementRef::Text(_) => ElementRole::Text,
        }
    }
}

/// Heap discipline used by the shortest-path engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum HeapMode {
    /// Heap built once, only the root is sifted after each extraction.
    /// A relax that lowers a queued vertex's cost does not move it.
    #[default]
    Lazy,
    /// Relax sifts the updated vertex up through a position map
    /// (decrease-key), keeping the heap ordered between extractions.
    Indexed,
}

impl HeapMode {
    /// Get all valid mode names
    pub fn variants() -> &'static [&'static str] {
        &["lazy", "indexed"]
    }
}

impl fmt::Display for HeapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapMode::Lazy => write!(f, "lazy"),
            HeapMode::Indexed => write!(f, "indexed"),
        }
    }
}

impl FromStr for HeapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lazy" => Ok(HeapMode::Lazy),
            "indexed" => Ok(HeapMode::Indexed),
            _ => Err(format!("Unknown heap mode: {}", s)),
        }
    }
}

/// Configuration for shortest-path runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub heap_mode: HeapMode,
}

impl EngineConfig {
    pub fn new(heap_mode: HeapMode) -> Self {
        Self { heap_mode }
    }
}
