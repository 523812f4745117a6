//! Plugin implementations
//!
//! The draw.io plugin loads diagrams into a typed graph; the shortest path
//! plugin runs Dijkstra over it. The orchestrator chains the two.

pub mod drawio;
pub mod orchestrator;
pub mod shortest_path;

pub use drawio::*;
pub use orchestrator::*;
pub use shortest_path::*;
