//! Precomputed all-pairs shortest paths.
//!
//! # Build
//!
//! [`ShortestPathIndex::build`] runs one Dijkstra pass per source vertex over
//! the graph's incidence lists and stores, for every reachable destination,
//! the best total weight and the id of the last edge on that path.  The
//! table is dense and row-major: entry `source * V + destination`.
//!
//! Cost: O(V · E log V) once.  Each source writes only its own row, so with
//! the `parallel` feature the V passes run as independent Rayon tasks and
//! the rows are concatenated after the join.
//!
//! # Query
//!
//! [`ShortestPathIndex::route`] follows `prev_edge` links backward from the
//! destination to the source, O(path length), independent of graph size.
//!
//! # Tie-breaking
//!
//! Relaxation is strict (`<`): among equal-weight paths the first edge
//! relaxed to the winning value is kept.  Which path that is depends on
//! insertion order and is not part of the contract.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use tc_core::{EdgeId, VertexId};

use crate::{GraphError, GraphResult, WeightedGraph};

// ── Records ───────────────────────────────────────────────────────────────────

/// Best known path from a fixed source to one destination.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRecord {
    /// Total weight of the path, in minutes.
    pub weight:    f64,
    /// Last edge on the path; `None` only for the source itself.
    pub prev_edge: Option<EdgeId>,
}

/// A reconstructed path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathInfo {
    pub weight: f64,
    /// Edges to traverse in order, from source to destination.
    pub edges:  Vec<EdgeId>,
}

// ── ShortestPathIndex ─────────────────────────────────────────────────────────

/// Dense `[source][destination]` table of [`PathRecord`]s.
#[derive(Clone, Debug)]
pub struct ShortestPathIndex {
    vertex_count: usize,
    /// Row-major, `vertex_count²` entries; `None` = unreachable.
    table:        Vec<Option<PathRecord>>,
}

impl ShortestPathIndex {
    /// Validate `graph`'s weights and compute every single-source pass.
    ///
    /// Negative or non-finite weights are rejected before any relaxation.
    pub fn build(graph: &WeightedGraph) -> GraphResult<Self> {
        validate_weights(graph)?;

        let n = graph.vertex_count();
        let started = Instant::now();
        log::debug!(
            "building shortest-path index: {n} vertices, {} edges",
            graph.edge_count()
        );

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<Option<PathRecord>>> = (0..n)
            .map(|s| single_source(graph, VertexId(s as u32)))
            .collect();

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<Option<PathRecord>>> = {
            use rayon::prelude::*;

            (0..n)
                .into_par_iter()
                .map(|s| single_source(graph, VertexId(s as u32)))
                .collect()
        };

        let table: Vec<Option<PathRecord>> = rows.into_iter().flatten().collect();
        debug_assert_eq!(table.len(), n * n);

        log::info!(
            "shortest-path index built: {n} vertices, {} reachable pairs in {:.3} s",
            table.iter().filter(|r| r.is_some()).count(),
            started.elapsed().as_secs_f64()
        );

        Ok(Self { vertex_count: n, table })
    }

    /// Rebuild an index from persisted rows.
    ///
    /// The rows must describe `graph` exactly: `V` rows of `V` entries, a
    /// zero-weight diagonal without predecessor, and every other record's
    /// `prev_edge` an existing edge that ends at that record's destination
    /// and extends a recorded path to the edge's source by exactly its
    /// weight.  Following predecessors from any reachable entry must lead
    /// back to the row's source.
    pub fn from_rows(graph: &WeightedGraph, rows: Vec<Vec<Option<PathRecord>>>) -> GraphResult<Self> {
        let n = graph.vertex_count();
        if rows.len() != n {
            return Err(GraphError::CorruptIndex(format!(
                "table has {} rows, graph has {n} vertices",
                rows.len()
            )));
        }
        if let Some((s, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(GraphError::CorruptIndex(format!(
                "row {s} has {} entries, expected {n}",
                row.len()
            )));
        }

        for (s, row) in rows.iter().enumerate() {
            for (t, record) in row.iter().enumerate() {
                validate_record(graph, &rows, s, t, record.as_ref())?;
            }
            validate_predecessor_tree(graph, s, row)?;
        }

        Ok(Self {
            vertex_count: n,
            table:        rows.into_iter().flatten().collect(),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Stored record for `(from, to)`; `None` if unreachable.
    ///
    /// # Panics
    /// Panics if either vertex is out of range.
    #[inline]
    pub fn record(&self, from: VertexId, to: VertexId) -> Option<&PathRecord> {
        self.table[self.slot(from, to)].as_ref()
    }

    /// One source's row, indexed by destination.
    pub fn row(&self, source: VertexId) -> &[Option<PathRecord>] {
        let start = source.index() * self.vertex_count;
        &self.table[start..start + self.vertex_count]
    }

    /// All rows in source order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<PathRecord>]> + '_ {
        self.table.chunks(self.vertex_count.max(1))
    }

    /// Minimum-weight path from `from` to `to`, or `None` if unreachable.
    ///
    /// `graph` must be the graph this index was built from.
    pub fn route(&self, graph: &WeightedGraph, from: VertexId, to: VertexId) -> Option<PathInfo> {
        let weight = self.record(from, to)?.weight;

        let mut edges = Vec::new();
        let mut cur = to;
        // A simple path has fewer than V edges.
        for _ in 0..self.vertex_count {
            let Some(prev) = self.record(from, cur).and_then(|r| r.prev_edge) else {
                break;
            };
            edges.push(prev);
            cur = graph.edge(prev).from;
        }
        debug_assert_eq!(cur, from, "predecessor walk did not reach the source");
        edges.reverse();

        Some(PathInfo { weight, edges })
    }

    #[inline]
    fn slot(&self, from: VertexId, to: VertexId) -> usize {
        assert!(
            from.index() < self.vertex_count && to.index() < self.vertex_count,
            "vertex pair ({from}, {to}) out of range for index over {} vertices",
            self.vertex_count
        );
        from.index() * self.vertex_count + to.index()
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Min-heap entry.  Ordering is reversed on cost so `BinaryHeap` pops the
/// cheapest vertex first; ties fall back to the vertex id so `Ord` stays
/// consistent with `Eq`.
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost:   f64,
    vertex: VertexId,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn validate_weights(graph: &WeightedGraph) -> GraphResult<()> {
    for (i, e) in graph.edges().iter().enumerate() {
        let edge = EdgeId(i as u32);
        if !e.weight.is_finite() {
            return Err(GraphError::NonFiniteWeight { edge, weight: e.weight });
        }
        if e.weight < 0.0 {
            return Err(GraphError::NegativeWeight { edge, weight: e.weight });
        }
    }
    Ok(())
}

fn single_source(graph: &WeightedGraph, source: VertexId) -> Vec<Option<PathRecord>> {
    let mut row: Vec<Option<PathRecord>> = vec![None; graph.vertex_count()];
    row[source.index()] = Some(PathRecord { weight: 0.0, prev_edge: None });

    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, vertex: source });

    while let Some(State { cost, vertex }) = heap.pop() {
        // Skip stale heap entries.
        if row[vertex.index()].is_some_and(|r| cost > r.weight) {
            continue;
        }

        for edge_id in graph.edges_from(vertex) {
            let edge = graph.edge(edge_id);
            let new_cost = cost + edge.weight;

            let improves = match row[edge.to.index()] {
                None    => true,
                Some(r) => new_cost < r.weight,
            };
            if improves {
                row[edge.to.index()] = Some(PathRecord { weight: new_cost, prev_edge: Some(edge_id) });
                heap.push(State { cost: new_cost, vertex: edge.to });
            }
        }
    }

    row
}

fn validate_record(
    graph:  &WeightedGraph,
    rows:   &[Vec<Option<PathRecord>>],
    s:      usize,
    t:      usize,
    record: Option<&PathRecord>,
) -> GraphResult<()> {
    let corrupt = |msg: String| Err(GraphError::CorruptIndex(format!("entry ({s}, {t}): {msg}")));

    let Some(rec) = record else {
        if s == t {
            return corrupt("source is unreachable from itself".into());
        }
        return Ok(());
    };

    if !rec.weight.is_finite() || rec.weight < 0.0 {
        return corrupt(format!("invalid weight {}", rec.weight));
    }

    if s == t {
        if rec.weight != 0.0 || rec.prev_edge.is_some() {
            return corrupt("diagonal must have zero weight and no predecessor".into());
        }
        return Ok(());
    }

    let Some(prev) = rec.prev_edge else {
        return corrupt("reachable entry has no predecessor edge".into());
    };
    if prev.index() >= graph.edge_count() {
        return corrupt(format!("predecessor {prev} does not exist"));
    }
    let edge = graph.edge(prev);
    if edge.to.index() != t {
        return corrupt(format!("predecessor {prev} ends at {}, not at the destination", edge.to));
    }
    match rows[s][edge.from.index()] {
        Some(before) if before.weight + edge.weight == rec.weight => Ok(()),
        Some(_) => corrupt(format!("weight does not match predecessor {prev}")),
        None => corrupt(format!("predecessor {prev} starts at an unreachable vertex")),
    }
}

/// Every reachable entry of row `s` must walk back to `s`.  Zero-weight
/// edges let a cycle of predecessors pass the per-record weight check.
fn validate_predecessor_tree(graph: &WeightedGraph, s: usize, row: &[Option<PathRecord>]) -> GraphResult<()> {
    #[derive(Copy, Clone, PartialEq)]
    enum Mark {
        Unvisited,
        OnWalk,
        Rooted,
    }

    let mut marks = vec![Mark::Unvisited; row.len()];
    marks[s] = Mark::Rooted;
    let mut walk = Vec::new();

    for t in 0..row.len() {
        let mut cur = t;
        while marks[cur] == Mark::Unvisited {
            // validate_record has already checked every link of the chain.
            let Some(prev) = row[cur].and_then(|r| r.prev_edge) else {
                break;
            };
            marks[cur] = Mark::OnWalk;
            walk.push(cur);
            cur = graph.edge(prev).from.index();
        }
        if marks[cur] == Mark::OnWalk {
            return Err(GraphError::CorruptIndex(format!(
                "row {s}: predecessors of vertex {t} form a cycle"
            )));
        }
        for v in walk.drain(..) {
            marks[v] = Mark::Rooted;
        }
    }
    Ok(())
}
