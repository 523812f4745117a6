//! Binary-heap Dijkstra over a linked graph model
//!
//! The heap is an array-as-tree of slot indices (children of `i` at `2i+1`
//! and `2i+2`), built bottom-up once per run. After each extraction only
//! the root is sifted down. In [`HeapMode::Lazy`] a relaxation never moves
//! the relaxed vertex inside the heap, so heap order can be stale between
//! extractions and some graphs end with costs above the true distance.
//! [`HeapMode::Indexed`] keeps a position map and sifts a relaxed vertex up,
//! which restores the heap invariant and gives exact distances.

use tracing::{debug, span, trace, Level};

use crate::core::{EngineConfig, GraphError, GraphResult, HeapMode, VertexIndex};
use crate::plugins::drawio::{Edge, GraphModel, NavigableNeighbor, Vertex};

use super::path_info::{DijkstraVertex, PathInformation, ShortestPath};

/// Single-source shortest path engine bound to one graph
///
/// The engine borrows the graph for its whole lifetime, so the graph cannot
/// change between or during runs. Results of the latest run stay readable
/// until the next run.
#[derive(Debug)]
pub struct ShortestPathEngine<'g> {
    graph: &'g GraphModel,
    config: EngineConfig,
    /// One entry per vertex, slot index == vertex index
    slots: Vec<DijkstraVertex>,
    /// Heap position -> slot index
    heap: Vec<usize>,
    /// Slot index -> heap position
    positions: Vec<usize>,
    heap_size: usize,
    source: Option<VertexIndex>,
}

impl<'g> ShortestPathEngine<'g> {
    /// Create an engine with the default configuration
    pub fn new(graph: &'g GraphModel) -> Self {
        Self::with_config(graph, EngineConfig::default())
    }

    pub fn with_config(graph: &'g GraphModel, config: EngineConfig) -> Self {
        let slots: Vec<DijkstraVertex> = (0..graph.vertex_slice().len())
            .map(|position| DijkstraVertex::new(VertexIndex(position)))
            .collect();
        let count = slots.len();

        Self {
            graph,
            config,
            slots,
            heap: Vec::with_capacity(count),
            positions: vec![0; count],
            heap_size: 0,
            source: None,
        }
    }

    pub fn graph(&self) -> &'g GraphModel {
        self.graph
    }

    pub fn heap_mode(&self) -> HeapMode {
        self.config.heap_mode
    }

    /// Source vertex of the latest run
    pub fn source(&self) -> Option<&'g Vertex> {
        self.source.map(|index| self.graph.vertex(index))
    }

    /// Active heap entries; zero once a run has finished
    pub fn heap_size(&self) -> usize {
        self.heap_size
    }

    /// Compute minimum costs from `source_id` to every vertex
    ///
    /// Fails before touching any path state when the id is empty, names no
    /// vertex, or the graph has not been linked.
    pub fn find_minimum_paths_from(&mut self, source_id: &str) -> GraphResult<()> {
        if source_id.is_empty() {
            return Err(GraphError::empty_argument("source id"));
        }
        let graph = self.graph;
        let source = graph
            .vertex_index(source_id)
            .ok_or_else(|| GraphError::not_found(source_id))?;
        if !graph.is_linked() {
            return Err(GraphError::InvalidArgument {
                argument: "graph",
                message: "links must be built before finding paths".to_string(),
            });
        }

        let run_span = span!(
            Level::INFO,
            "find_minimum_paths_from",
            source = source_id,
            heap_mode = %self.config.heap_mode,
            vertex_count = self.slots.len()
        );
        let _enter = run_span.enter();

        for slot in &mut self.slots {
            slot.path_information.reset();
        }
        self.slots[source.index()].path_information.set_origin();
        self.source = Some(source);

        self.build_min_heap();

        let mut extractions = 0usize;
        let mut relaxations = 0usize;
        while self.heap_size > 0 {
            let current = self.extract_min();
            extractions += 1;

            let vertex = graph.vertex(VertexIndex(current));
            let base_cost = self.slots[current].minimum_cost();
            trace!(vertex_id = %vertex.id(), cost = base_cost, "Extracted vertex");

            for neighbor in vertex.neighbors() {
                if self.relax(current, base_cost, neighbor) {
                    relaxations += 1;
                }
            }
        }

        let reachable = self
            .slots
            .iter()
            .filter(|slot| slot.path_information.is_reachable())
            .count();
        debug!(extractions, relaxations, reachable, "Shortest paths computed");
        Ok(())
    }

    /// Lower the neighbor's cost if the route through `current` is cheaper
    fn relax(&mut self, current: usize, base_cost: f64, neighbor: &NavigableNeighbor) -> bool {
        let target = neighbor.neighbor.index();
        let candidate = base_cost + neighbor.cost;
        if self.slots[target].minimum_cost() <= candidate {
            return false;
        }

        trace!(
            from = %self.graph.vertex(VertexIndex(current)).id(),
            to = %self.graph.vertex(neighbor.neighbor).id(),
            cost = candidate,
            "Relaxed"
        );
        self.slots[target].path_information.update(
            candidate,
            VertexIndex(current),
            neighbor.connecting_edge,
        );

        if self.config.heap_mode == HeapMode::Indexed {
            let position = self.positions[target];
            if position < self.heap_size {
                self.sift_up(position);
            }
        }
        true
    }

    fn key(&self, position: usize) -> f64 {
        self.slots[self.heap[position]].minimum_cost()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a]] = a;
        self.positions[self.heap[b]] = b;
    }

    fn build_min_heap(&mut self) {
        self.heap.clear();
        self.heap.extend(0..self.slots.len());
        for (position, slot) in self.heap.iter().enumerate() {
            self.positions[*slot] = position;
        }
        self.heap_size = self.heap.len();

        for position in (0..self.heap_size / 2).rev() {
            self.min_heapify(position);
        }
    }

    fn min_heapify(&mut self, mut position: usize) {
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut smallest = position;

            if left < self.heap_size && self.key(left) < self.key(smallest) {
                smallest = left;
            }
            if right < self.heap_size && self.key(right) < self.key(smallest) {
                smallest = right;
            }
            if smallest == position {
                break;
            }
            self.swap(position, smallest);
            position = smallest;
        }
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if self.key(parent) <= self.key(position) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    /// Remove the root, returning its slot index; heap must be non-empty
    fn extract_min(&mut self) -> usize {
        let root = self.heap[0];
        let last = self.heap_size - 1;
        self.swap(0, last);
        self.heap_size = last;
        self.min_heapify(0);
        root
    }

    fn slot(&self, id: &str) -> GraphResult<&DijkstraVertex> {
        let index = self
            .graph
            .vertex_index(id)
            .ok_or_else(|| GraphError::not_found(id))?;
        Ok(&self.slots[index.index()])
    }

    /// Path state of a vertex from the latest run
    pub fn path_information(&self, id: &str) -> GraphResult<&PathInformation> {
        self.slot(id).map(|slot| &slot.path_information)
    }

    pub fn minimum_cost(&self, id: &str) -> GraphResult<f64> {
        self.slot(id).map(DijkstraVertex::minimum_cost)
    }

    pub fn predecessor(&self, id: &str) -> GraphResult<Option<&'g Vertex>> {
        let graph = self.graph;
        let info = self.path_information(id)?;
        Ok(info.predecessor().map(|index| graph.vertex(index)))
    }

    pub fn connecting_edge(&self, id: &str) -> GraphResult<Option<&'g Edge>> {
        let graph = self.graph;
        let info = self.path_information(id)?;
        Ok(info.connecting_edge().map(|index| graph.edge(index)))
    }

    /// Every vertex with its path state, in graph order
    pub fn results(&self) -> impl Iterator<Item = (&'g Vertex, &PathInformation)> + '_ {
        let graph = self.graph;
        self.slots
            .iter()
            .map(move |slot| (graph.vertex(slot.vertex), &slot.path_information))
    }

    /// Walk predecessors from `target_id` back to the source
    ///
    /// Returns `None` before any run, and for targets the latest run did not
    /// reach.
    pub fn path_to(&self, target_id: &str) -> GraphResult<Option<ShortestPath>> {
        let target = self.slot(target_id)?;
        let Some(source) = self.source else {
            return Ok(None);
        };
        if !target.path_information.is_reachable() {
            return Ok(None);
        }

        let mut vertices = vec![target.vertex];
        let mut edges = Vec::new();
        let mut current = target.vertex;
        while current != source {
            let info = &self.slots[current.index()].path_information;
            let (Some(previous), Some(edge)) = (info.predecessor(), info.connecting_edge()) else {
                return Ok(None);
            };
            if vertices.len() > self.slots.len() {
                debug!(target = target_id, "Predecessor chain does not reach the source");
                return Ok(None);
            }
            vertices.push(previous);
            edges.push(edge);
            current = previous;
        }

        vertices.reverse();
        edges.reverse();
        Ok(Some(ShortestPath {
            vertices,
            edges,
            cost: target.minimum_cost(),
        }))
    }
}
