//! Shortest path plugin
//!
//! Dijkstra over a linked [`GraphModel`](crate::plugins::drawio::GraphModel),
//! with per-vertex results readable after each run.

mod engine;
mod path_info;

pub use engine::*;
pub use path_info::*;
