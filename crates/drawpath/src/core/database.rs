//! Core database trait for graph data storage
//!
//! This trait defines the interface for storing typed graph elements.
//! The draw.io plugin implements it with arena-backed vertex and edge
//! collections.

use anyhow::Result;

/// Core trait for graph databases
///
/// This trait represents the storage layer for classified elements. The
/// associated types let a database define its own vertex and edge
/// structures.
pub trait Database: Send + Sync {
    /// The vertex type for this database
    type Vertex: Clone + Send + Sync;

    /// The edge type for this database
    type Edge: Clone + Send + Sync;

    /// Add a vertex to the database
    fn add_vertex(&mut self, vertex: Self::Vertex) -> Result<()>;

    /// Add an edge to the database
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a vertex by ID
    fn get_vertex(&self, id: &str) -> Option<&Self::Vertex>;

    /// Get an edge by ID
    fn get_edge(&self, id: &str) -> Option<&Self::Edge>;

    /// Iterate over all vertices
    fn vertices(&self) -> impl Iterator<Item = &Self::Vertex>;

    /// Iterate over all edges
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of vertices
    fn vertex_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
