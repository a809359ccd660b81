//! Stop and bus-line registry with directed road distances.
//!
//! # Storage
//!
//! Stops and lines live in flat `Vec`s indexed by [`StopId`] / [`BusId`];
//! names resolve to ids through hash maps.  Lines store `StopId`s, never
//! names, so nothing in the catalogue points at anything else.
//!
//! # Road distances
//!
//! Distances are directed: `(a, b)` may differ from `(b, a)`.  A lookup for
//! `(a, b)` with no forward entry falls back to `(b, a)` at lookup time.
//! Only supplied entries are stored, so the result of a lookup does not
//! depend on whether a distance was added before or after the lines that
//! use it.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use tc_core::{BusId, GeoPoint, StopId};

use crate::{CatalogueError, CatalogueResult};

// ── Records ───────────────────────────────────────────────────────────────────

/// A named stop with its position.  Immutable once added.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub id:   StopId,
    pub name: String,
    pub pos:  GeoPoint,
}

/// A named bus line: an ordered list of stops and a loop flag.
#[derive(Clone, Debug, PartialEq)]
pub struct BusLine {
    pub id:      BusId,
    pub name:    String,
    pub stops:   Vec<StopId>,
    /// `true`: the vehicle path is circular and driven in one direction only.
    /// `false`: the vehicle drives `stops` forward, then retraces them back.
    pub is_loop: bool,
}

impl BusLine {
    /// Stops in the order the vehicle visits them over one full trip.
    ///
    /// For a loop line this is `stops`; for a there-and-back line the
    /// reversed stops (minus the turnaround stop) are appended.
    pub fn vehicle_path(&self) -> Vec<StopId> {
        let mut path = self.stops.clone();
        if !self.is_loop && self.stops.len() > 1 {
            path.extend(self.stops.iter().rev().skip(1).copied());
        }
        path
    }

    /// Consecutive `(from, to)` pairs along [`vehicle_path`](Self::vehicle_path).
    pub fn segments(&self) -> Vec<(StopId, StopId)> {
        self.vehicle_path().windows(2).map(|w| (w[0], w[1])).collect()
    }
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

/// Registry of stops, bus lines, and road distances.
#[derive(Debug, Default)]
pub struct Catalogue {
    stops:         Vec<Stop>,
    stop_by_name:  FxHashMap<String, StopId>,
    buses:         Vec<BusLine>,
    bus_by_name:   FxHashMap<String, BusId>,
    distances:     FxHashMap<(StopId, StopId), f64>,
    /// Lines serving each stop, indexed by `StopId`.
    buses_at_stop: Vec<BTreeSet<BusId>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Stops ─────────────────────────────────────────────────────────────

    /// Add a stop and return its `StopId` (sequential from 0).
    pub fn add_stop(&mut self, name: impl Into<String>, pos: GeoPoint) -> CatalogueResult<StopId> {
        let name = name.into();
        if self.stop_by_name.contains_key(&name) {
            return Err(CatalogueError::DuplicateStop(name));
        }
        let id = StopId::try_from(self.stops.len())
            .map_err(|_| CatalogueError::Parse("too many stops".into()))?;
        self.stop_by_name.insert(name.clone(), id);
        self.stops.push(Stop { id, name, pos });
        self.buses_at_stop.push(BTreeSet::new());
        Ok(id)
    }

    /// Panics if `id` was not issued by this catalogue.
    #[inline]
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    pub fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| self.stop(id))
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_by_name.get(name).copied()
    }

    /// All stops in id order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    // ── Distances ─────────────────────────────────────────────────────────

    /// Record the directed road distance `from → to` by stop name.
    pub fn add_distance(&mut self, from: &str, to: &str, meters: f64) -> CatalogueResult<()> {
        let from_id = self.require_stop(from)?;
        let to_id = self.require_stop(to)?;
        self.set_distance(from_id, to_id, meters)
    }

    /// Record the directed road distance `from → to` by stop id, replacing
    /// any earlier entry for the same pair.
    pub fn set_distance(&mut self, from: StopId, to: StopId, meters: f64) -> CatalogueResult<()> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(CatalogueError::InvalidDistance {
                from: self.stop(from).name.clone(),
                to: self.stop(to).name.clone(),
                meters,
            });
        }
        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Road distance `from → to`, falling back to `to → from`.  The fallback
    /// is resolved on every call and never stored.
    pub fn distance(&self, from: StopId, to: StopId) -> Option<f64> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    /// Like [`distance`](Self::distance) but reports a missing entry as
    /// [`CatalogueError::MissingDistance`].
    pub fn require_distance(&self, from: StopId, to: StopId) -> CatalogueResult<f64> {
        self.distance(from, to).ok_or_else(|| CatalogueError::MissingDistance {
            from: self.stop(from).name.clone(),
            to: self.stop(to).name.clone(),
        })
    }

    /// Every supplied directed entry, sorted by `(from, to)`.
    pub fn distances(&self) -> Vec<((StopId, StopId), f64)> {
        let mut all: Vec<_> = self.distances.iter().map(|(&k, &v)| (k, v)).collect();
        all.sort_unstable_by_key(|&(k, _)| k);
        all
    }

    // ── Bus lines ─────────────────────────────────────────────────────────

    /// Add a bus line over stops given by name.
    ///
    /// Every stop must already be in the catalogue.  Missing road distances
    /// are not an error here; they surface when stats or the routing graph
    /// need them.
    pub fn add_bus_line<S: AsRef<str>>(
        &mut self,
        name:    impl Into<String>,
        stops:   &[S],
        is_loop: bool,
    ) -> CatalogueResult<BusId> {
        let ids = stops
            .iter()
            .map(|s| self.require_stop(s.as_ref()))
            .collect::<CatalogueResult<Vec<_>>>()?;
        self.add_bus_line_ids(name, ids, is_loop)
    }

    /// Add a bus line over stops given by id.
    pub fn add_bus_line_ids(
        &mut self,
        name:    impl Into<String>,
        stops:   Vec<StopId>,
        is_loop: bool,
    ) -> CatalogueResult<BusId> {
        let name = name.into();
        if self.bus_by_name.contains_key(&name) {
            return Err(CatalogueError::DuplicateBus(name));
        }
        if let Some(bad) = stops.iter().find(|s| s.index() >= self.stops.len()) {
            return Err(CatalogueError::UnknownStop(bad.to_string()));
        }

        let id = BusId::try_from(self.buses.len())
            .map_err(|_| CatalogueError::Parse("too many bus lines".into()))?;
        let line = BusLine { id, name: name.clone(), stops, is_loop };

        for stop in &line.stops {
            self.buses_at_stop[stop.index()].insert(id);
        }

        log::debug!("added bus line {name:?} with {} stops (loop: {is_loop})", line.stops.len());
        self.bus_by_name.insert(name, id);
        self.buses.push(line);
        Ok(id)
    }

    /// Panics if `id` was not issued by this catalogue.
    #[inline]
    pub fn bus(&self, id: BusId) -> &BusLine {
        &self.buses[id.index()]
    }

    pub fn bus_by_name(&self, name: &str) -> Option<&BusLine> {
        self.bus_by_name.get(name).map(|&id| self.bus(id))
    }

    /// All bus lines in id order.
    pub fn bus_lines(&self) -> &[BusLine] {
        &self.buses
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Lines serving `stop`, in id order.
    pub fn buses_at(&self, stop: StopId) -> impl Iterator<Item = BusId> + '_ {
        self.buses_at_stop[stop.index()].iter().copied()
    }

    // ── Ordered enumeration for graph building ────────────────────────────

    /// Stops served by at least one line, sorted by name.
    pub fn sorted_used_stops(&self) -> Vec<&Stop> {
        let mut used: Vec<&Stop> = self
            .stops
            .iter()
            .filter(|s| !self.buses_at_stop[s.id.index()].is_empty())
            .collect();
        used.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        used
    }

    /// All lines sorted by name.
    pub fn sorted_bus_lines(&self) -> Vec<&BusLine> {
        let mut lines: Vec<&BusLine> = self.buses.iter().collect();
        lines.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        lines
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn require_stop(&self, name: &str) -> CatalogueResult<StopId> {
        self.stop_id(name)
            .ok_or_else(|| CatalogueError::UnknownStop(name.to_owned()))
    }
}
