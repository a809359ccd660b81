//! Full dump and restore of a built planner.
//!
//! A snapshot carries everything a second process needs to answer queries
//! without rebuilding: the catalogue records (with their ids), the routing
//! graph, the per-stop vertex pairs, the edge annotations, and the complete
//! `[source][destination]` index table.
//!
//! Restoring validates structure before anything is exposed.  Any mismatch
//! (ids out of range, table dimensions, predecessor edges that do not fit
//! the graph) is [`RouterError::CorruptIndex`].

use serde::{Deserialize, Serialize};

use tc_catalogue::Catalogue;
use tc_core::{BusId, GeoPoint, RoutingSettings, StopId, VertexId};
use tc_graph::{Edge, PathRecord, ShortestPathIndex, WeightedGraph};

use crate::builder::{EdgeAnnotation, RouteGraph, StopVertices};
use crate::planner::{BuiltIndex, PlannerState};
use crate::{RoutePlanner, RouterError, RouterResult};

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

// ── Snapshot records ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub id:   StopId,
    pub name: String,
    pub pos:  GeoPoint,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusLineRecord {
    pub id:      BusId,
    pub name:    String,
    pub stops:   Vec<StopId>,
    pub is_loop: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub from:   StopId,
    pub to:     StopId,
    pub meters: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopVertexRecord {
    pub stop: StopId,
    pub wait: VertexId,
    pub ride: VertexId,
}

/// Serializable image of a built [`RoutePlanner`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub format_version: u32,
    pub settings:       RoutingSettings,
    pub stops:          Vec<StopRecord>,
    pub bus_lines:      Vec<BusLineRecord>,
    pub distances:      Vec<DistanceRecord>,
    pub vertex_count:   usize,
    pub edges:          Vec<Edge>,
    pub stop_vertices:  Vec<StopVertexRecord>,
    pub annotations:    Vec<EdgeAnnotation>,
    /// `table[source][destination]`; `None` = unreachable.
    pub table:          Vec<Vec<Option<PathRecord>>>,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum VertexRole {
    Wait,
    Ride,
}

fn corrupt(msg: impl Into<String>) -> RouterError {
    RouterError::CorruptIndex(msg.into())
}

// ── Dump ──────────────────────────────────────────────────────────────────────

impl RoutePlanner {
    /// Capture the built state.  Fails with [`RouterError::NotReady`] when
    /// nothing has been built.
    pub fn snapshot(&self) -> RouterResult<IndexSnapshot> {
        let PlannerState::Built(built) = &self.state else {
            return Err(RouterError::NotReady);
        };
        let c = &self.catalogue;
        let rg = &built.route_graph;

        let stops = c
            .stops()
            .iter()
            .map(|s| StopRecord { id: s.id, name: s.name.clone(), pos: s.pos })
            .collect();

        let bus_lines = c
            .bus_lines()
            .iter()
            .map(|b| BusLineRecord {
                id:      b.id,
                name:    b.name.clone(),
                stops:   b.stops.clone(),
                is_loop: b.is_loop,
            })
            .collect();

        let distances = c
            .distances()
            .into_iter()
            .map(|((from, to), meters)| DistanceRecord { from, to, meters })
            .collect();

        let stop_vertices = rg
            .vertices
            .iter()
            .enumerate()
            .filter_map(|(i, v)| {
                v.map(|v| StopVertexRecord { stop: StopId(i as u32), wait: v.wait, ride: v.ride })
            })
            .collect();

        Ok(IndexSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            settings: built.settings,
            stops,
            bus_lines,
            distances,
            vertex_count: rg.graph.vertex_count(),
            edges: rg.graph.edges().to_vec(),
            stop_vertices,
            annotations: rg.annotations.clone(),
            table: built.index.rows().map(|r| r.to_vec()).collect(),
        })
    }

    // ── Restore ───────────────────────────────────────────────────────────

    /// Rebuild a `Built` planner from a snapshot, validating it first.
    pub fn restore(snapshot: IndexSnapshot) -> RouterResult<Self> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(corrupt(format!(
                "format version {} (expected {SNAPSHOT_FORMAT_VERSION})",
                snapshot.format_version
            )));
        }
        snapshot
            .settings
            .validate()
            .map_err(|e| corrupt(e.to_string()))?;

        let catalogue = restore_catalogue(&snapshot)?;
        let route_graph = restore_route_graph(&snapshot, &catalogue)?;
        let index = ShortestPathIndex::from_rows(&route_graph.graph, snapshot.table)
            .map_err(|e| corrupt(e.to_string()))?;

        log::debug!(
            "restored route index: {} vertices, {} edges",
            route_graph.graph.vertex_count(),
            route_graph.graph.edge_count()
        );

        Ok(Self {
            catalogue,
            state: PlannerState::Built(Box::new(BuiltIndex {
                settings: snapshot.settings,
                route_graph,
                index,
            })),
        })
    }
}

fn restore_catalogue(snapshot: &IndexSnapshot) -> RouterResult<Catalogue> {
    let mut c = Catalogue::new();

    for (i, s) in snapshot.stops.iter().enumerate() {
        if s.id.index() != i {
            return Err(corrupt(format!("stop {:?} has id {} at position {i}", s.name, s.id)));
        }
        c.add_stop(s.name.clone(), s.pos).map_err(|e| corrupt(e.to_string()))?;
    }

    for d in &snapshot.distances {
        if d.from.index() >= c.stop_count() || d.to.index() >= c.stop_count() {
            return Err(corrupt(format!("distance {} -> {} references an unknown stop", d.from, d.to)));
        }
        c.set_distance(d.from, d.to, d.meters).map_err(|e| corrupt(e.to_string()))?;
    }

    for (i, b) in snapshot.bus_lines.iter().enumerate() {
        if b.id.index() != i {
            return Err(corrupt(format!("bus line {:?} has id {} at position {i}", b.name, b.id)));
        }
        c.add_bus_line_ids(b.name.clone(), b.stops.clone(), b.is_loop)
            .map_err(|e| corrupt(e.to_string()))?;
    }

    Ok(c)
}

fn restore_route_graph(snapshot: &IndexSnapshot, catalogue: &Catalogue) -> RouterResult<RouteGraph> {
    let n = snapshot.vertex_count;

    if snapshot.stop_vertices.len() * 2 != n {
        return Err(corrupt(format!(
            "{} stop vertex pairs for {n} vertices",
            snapshot.stop_vertices.len()
        )));
    }
    if let Some(e) = snapshot.edges.iter().find(|e| e.from.index() >= n || e.to.index() >= n) {
        return Err(corrupt(format!("edge {} -> {} out of range", e.from, e.to)));
    }
    if snapshot.annotations.len() != snapshot.edges.len() {
        return Err(corrupt(format!(
            "{} annotations for {} edges",
            snapshot.annotations.len(),
            snapshot.edges.len()
        )));
    }

    // ── Vertex pairs ──────────────────────────────────────────────────────
    let mut vertices: Vec<Option<StopVertices>> = vec![None; catalogue.stop_count()];
    let mut claimed = vec![false; n];
    for sv in &snapshot.stop_vertices {
        let slot = vertices
            .get_mut(sv.stop.index())
            .ok_or_else(|| corrupt(format!("vertex pair for unknown {}", sv.stop)))?;
        if slot.is_some() {
            return Err(corrupt(format!("duplicate vertex pair for {}", sv.stop)));
        }
        for v in [sv.wait, sv.ride] {
            match claimed.get_mut(v.index()) {
                Some(c) if !*c => *c = true,
                Some(_) => return Err(corrupt(format!("{v} assigned to more than one stop"))),
                None => return Err(corrupt(format!("{v} out of range"))),
            }
        }
        *slot = Some(StopVertices { wait: sv.wait, ride: sv.ride });
    }

    // ── Annotations ───────────────────────────────────────────────────────
    let mut roles = vec![None; n];
    for pair in vertices.iter().flatten() {
        roles[pair.wait.index()] = Some(VertexRole::Wait);
        roles[pair.ride.index()] = Some(VertexRole::Ride);
    }

    for (i, (edge, ann)) in snapshot.edges.iter().zip(&snapshot.annotations).enumerate() {
        match *ann {
            EdgeAnnotation::Wait { stop, duration } => {
                let pair = vertices
                    .get(stop.index())
                    .copied()
                    .flatten()
                    .ok_or_else(|| corrupt(format!("wait edge {i} at a stop without vertices")))?;
                if edge.from != pair.wait || edge.to != pair.ride {
                    return Err(corrupt(format!("wait edge {i} does not join the vertices of {stop}")));
                }
                if duration != edge.weight {
                    return Err(corrupt(format!("wait edge {i} weighs {} but is annotated {duration}", edge.weight)));
                }
            }
            EdgeAnnotation::Ride { bus, span_count, duration } => {
                if bus.index() >= catalogue.bus_count() {
                    return Err(corrupt(format!("ride edge {i} references unknown {bus}")));
                }
                if roles[edge.from.index()] != Some(VertexRole::Ride)
                    || roles[edge.to.index()] != Some(VertexRole::Wait)
                {
                    return Err(corrupt(format!("ride edge {i} does not run from a ride to a wait vertex")));
                }
                if span_count == 0 {
                    return Err(corrupt(format!("ride edge {i} spans no stops")));
                }
                if duration != edge.weight {
                    return Err(corrupt(format!("ride edge {i} weighs {} but is annotated {duration}", edge.weight)));
                }
            }
        }
    }

    Ok(RouteGraph {
        graph: WeightedGraph::from_edges(n, snapshot.edges.iter().copied()),
        vertices,
        annotations: snapshot.annotations.clone(),
    })
}
