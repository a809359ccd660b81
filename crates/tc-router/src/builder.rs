//! Catalogue → routing graph mapping.
//!
//! # Vertex layout
//!
//! Every stop served by at least one line gets two vertices: a **wait**
//! vertex (standing at the stop) and a **ride** vertex (aboard, leaving the
//! stop).  Stops are taken in name order and the `k`-th one gets
//! `wait = 2k`, `ride = 2k + 1`.
//!
//! # Edges
//!
//! | Edge               | From → to                      | Weight                     |
//! |--------------------|--------------------------------|----------------------------|
//! | `Wait { stop }`    | wait(stop) → ride(stop)        | `bus_wait_time`            |
//! | `Ride { bus, n }`  | ride(s_i) → wait(s_j), i < j   | Σ metres(i..j) / velocity  |
//!
//! Ride edges are generated for every `i < j` of a line's forward stop
//! sequence, and again for the reversed sequence when the line is not a
//! loop.  A route therefore always alternates wait, ride, wait, ride, …
//! and ends at a wait vertex.
//!
//! Wait edges are added first, then lines in name order, so edge ids are a
//! pure function of the catalogue and settings.

use serde::{Deserialize, Serialize};

use tc_catalogue::{BusLine, Catalogue, CatalogueError};
use tc_core::{BusId, EdgeId, RoutingSettings, StopId, VertexId};
use tc_graph::WeightedGraph;

use crate::{RouterError, RouterResult};

// ── Output types ──────────────────────────────────────────────────────────────

/// The two routing vertices of one stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StopVertices {
    pub wait: VertexId,
    pub ride: VertexId,
}

/// What an edge means in transit terms.  Durations are in minutes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EdgeAnnotation {
    Wait { stop: StopId, duration: f64 },
    Ride { bus: BusId, span_count: u32, duration: f64 },
}

/// A built routing graph plus the side tables needed to read routes back in
/// domain terms.  Owns everything; holds no reference to the catalogue.
#[derive(Clone, Debug)]
pub struct RouteGraph {
    pub graph:       WeightedGraph,
    /// Vertex pair per stop, indexed by `StopId`; `None` for stops no line
    /// serves.
    pub vertices:    Vec<Option<StopVertices>>,
    /// Annotation per edge, indexed by `EdgeId`.
    pub annotations: Vec<EdgeAnnotation>,
}

impl RouteGraph {
    /// Vertex pair of `stop`, or `None` if no line serves it.
    pub fn vertices_of(&self, stop: StopId) -> Option<StopVertices> {
        self.vertices.get(stop.index()).copied().flatten()
    }

    /// # Panics
    /// Panics if `edge` is out of range.
    pub fn annotation(&self, edge: EdgeId) -> &EdgeAnnotation {
        &self.annotations[edge.index()]
    }
}

// ── RouteGraphBuilder ─────────────────────────────────────────────────────────

/// Maps a [`Catalogue`] into a [`RouteGraph`] under the given settings.
///
/// # Example
///
/// ```
/// use tc_catalogue::Catalogue;
/// use tc_core::{GeoPoint, RoutingSettings};
/// use tc_router::RouteGraphBuilder;
///
/// let mut c = Catalogue::new();
/// c.add_stop("A", GeoPoint::new(55.0, 37.0)).unwrap();
/// c.add_stop("B", GeoPoint::new(55.01, 37.0)).unwrap();
/// c.add_distance("A", "B", 1_000.0).unwrap();
/// c.add_bus_line("1", &["A", "B"], false).unwrap();
///
/// let rg = RouteGraphBuilder::new(&c, &RoutingSettings::new(2.0, 30.0)).build().unwrap();
/// assert_eq!(rg.graph.vertex_count(), 4);
/// assert_eq!(rg.graph.edge_count(), 4); // 2 wait + A→B + B→A
/// ```
pub struct RouteGraphBuilder<'a> {
    catalogue: &'a Catalogue,
    settings:  &'a RoutingSettings,
}

impl<'a> RouteGraphBuilder<'a> {
    pub fn new(catalogue: &'a Catalogue, settings: &'a RoutingSettings) -> Self {
        Self { catalogue, settings }
    }

    /// Validate the settings and produce the graph.
    ///
    /// Fails on invalid settings or on a missing road distance between two
    /// consecutive stops of a line.  Nothing is returned on failure.
    pub fn build(self) -> RouterResult<RouteGraph> {
        self.settings.validate()?;

        let used = self.catalogue.sorted_used_stops();
        let mut out = RouteGraph {
            graph:       WeightedGraph::new(used.len() * 2),
            vertices:    vec![None; self.catalogue.stop_count()],
            annotations: Vec::new(),
        };

        // ── Wait edges ────────────────────────────────────────────────────
        let wait_time = self.settings.bus_wait_time;
        for (k, stop) in used.iter().enumerate() {
            let pair = StopVertices {
                wait: VertexId((2 * k) as u32),
                ride: VertexId((2 * k + 1) as u32),
            };
            out.vertices[stop.id.index()] = Some(pair);
            out.graph.add_edge(pair.wait, pair.ride, wait_time);
            out.annotations.push(EdgeAnnotation::Wait { stop: stop.id, duration: wait_time });
        }

        // ── Ride edges ────────────────────────────────────────────────────
        for line in self.catalogue.sorted_bus_lines() {
            self.add_ride_edges(&mut out, line, &line.stops)?;
            if !line.is_loop {
                let reversed: Vec<StopId> = line.stops.iter().rev().copied().collect();
                self.add_ride_edges(&mut out, line, &reversed)?;
            }
        }

        debug_assert_eq!(out.graph.edge_count(), out.annotations.len());
        log::debug!(
            "route graph: {} stops in use, {} vertices, {} edges",
            used.len(),
            out.graph.vertex_count(),
            out.graph.edge_count()
        );
        Ok(out)
    }

    /// One pass over `stops`: an edge from every stop to every later stop.
    fn add_ride_edges(&self, out: &mut RouteGraph, line: &BusLine, stops: &[StopId]) -> RouterResult<()> {
        if stops.len() < 2 {
            return Ok(());
        }

        for i in 0..stops.len() - 1 {
            let from = self.vertices(out, stops[i])?.ride;
            let mut meters = 0.0;

            for j in i + 1..stops.len() {
                meters += self.segment_meters(line, stops[j - 1], stops[j])?;
                let to = self.vertices(out, stops[j])?.wait;
                let duration = self.settings.travel_minutes(meters);
                let span_count = (j - i) as u32;

                out.graph.add_edge(from, to, duration);
                out.annotations.push(EdgeAnnotation::Ride { bus: line.id, span_count, duration });
            }
        }
        Ok(())
    }

    fn segment_meters(&self, line: &BusLine, from: StopId, to: StopId) -> RouterResult<f64> {
        self.catalogue
            .distance(from, to)
            .ok_or_else(|| RouterError::MissingDistance {
                bus:  line.name.clone(),
                from: self.catalogue.stop(from).name.clone(),
                to:   self.catalogue.stop(to).name.clone(),
            })
    }

    fn vertices(&self, out: &RouteGraph, stop: StopId) -> RouterResult<StopVertices> {
        out.vertices_of(stop).ok_or_else(|| {
            CatalogueError::UnknownStop(self.catalogue.stop(stop).name.clone()).into()
        })
    }
}
