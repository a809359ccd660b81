//! Append-only directed weighted graph.
//!
//! # Data layout
//!
//! Edges live in one flat `Vec<Edge>` indexed by [`EdgeId`], assigned densely
//! in insertion order.  Each vertex keeps the list of its outgoing `EdgeId`s,
//! also in insertion order, so iteration order during relaxation is exactly
//! the order edges were added.
//!
//! The vertex count is fixed at construction.  Edges can be appended but
//! never removed or re-weighted; once the graph is handed to
//! [`ShortestPathIndex::build`](crate::ShortestPathIndex::build) it is only
//! read.

use tc_core::{EdgeId, VertexId};

/// A directed edge.  Weights are in minutes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from:   VertexId,
    pub to:     VertexId,
    pub weight: f64,
}

/// Directed graph with a fixed vertex count and an append-only edge list.
#[derive(Clone, Debug, Default)]
pub struct WeightedGraph {
    edges:     Vec<Edge>,
    /// Outgoing edges per vertex, indexed by `VertexId`.
    incidence: Vec<Vec<EdgeId>>,
}

impl WeightedGraph {
    /// Construct a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges:     Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Rebuild a graph from a persisted edge list, preserving edge ids.
    ///
    /// # Panics
    /// Panics if an edge endpoint is `>= vertex_count`.
    pub fn from_edges(vertex_count: usize, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut graph = Self::new(vertex_count);
        for e in edges {
            graph.add_edge(e.from, e.to, e.weight);
        }
        graph
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Append a directed edge and return its `EdgeId` (sequential from 0).
    ///
    /// # Panics
    /// Panics if `from` or `to` is out of range.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> EdgeId {
        let n = self.vertex_count();
        assert!(
            from.index() < n && to.index() < n,
            "edge {from} -> {to} out of range for graph with {n} vertices"
        );
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge { from, to, weight });
        self.incidence[from.index()].push(id);
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// # Panics
    /// Panics if `id` is out of range.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// All edges in `EdgeId` order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edge ids of `vertex`, in insertion order.
    ///
    /// # Panics
    /// Panics if `vertex` is out of range.
    #[inline]
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incidence[vertex.index()].iter().copied()
    }

    #[inline]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.incidence[vertex.index()].len()
    }
}
