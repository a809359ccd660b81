//! Aggregate statistics derived from catalogue records.

use std::collections::BTreeSet;

use crate::{Catalogue, CatalogueError, CatalogueResult};

/// Summary of one bus line over a full vehicle trip.
#[derive(Clone, Debug, PartialEq)]
pub struct BusStats {
    pub name:              String,
    /// Stops visited over one trip, counting revisits.
    pub stop_count:        usize,
    pub unique_stop_count: usize,
    /// Road distance over the trip, in metres.
    pub route_length:      f64,
    /// `route_length` divided by the great-circle length of the same path.
    /// `0.0` when the geographic length is zero.
    pub curvature:         f64,
}

/// The lines serving one stop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopStats {
    pub name:  String,
    /// Line names, sorted.
    pub buses: Vec<String>,
}

impl Catalogue {
    /// Compute [`BusStats`] for the line called `name`.
    pub fn bus_stats(&self, name: &str) -> CatalogueResult<BusStats> {
        let line = self
            .bus_by_name(name)
            .ok_or_else(|| CatalogueError::UnknownBus(name.to_owned()))?;

        let path = line.vehicle_path();
        let unique: BTreeSet<_> = line.stops.iter().collect();

        let mut route_length = 0.0;
        let mut geo_length = 0.0;
        for (from, to) in line.segments() {
            route_length += self.require_distance(from, to)?;
            geo_length += self.stop(from).pos.distance_m(self.stop(to).pos);
        }

        let curvature = if geo_length > 0.0 { route_length / geo_length } else { 0.0 };

        Ok(BusStats {
            name: line.name.clone(),
            stop_count: path.len(),
            unique_stop_count: unique.len(),
            route_length,
            curvature,
        })
    }

    /// Compute [`StopStats`] for the stop called `name`.
    pub fn stop_stats(&self, name: &str) -> CatalogueResult<StopStats> {
        let stop = self
            .stop_by_name(name)
            .ok_or_else(|| CatalogueError::UnknownStop(name.to_owned()))?;

        let mut buses: Vec<String> = self
            .buses_at(stop.id)
            .map(|b| self.bus(b).name.clone())
            .collect();
        buses.sort_unstable();

        Ok(StopStats { name: stop.name.clone(), buses })
    }
}
