//! CSV catalogue loader.
//!
//! # CSV format
//!
//! Three files, each with a header row.
//!
//! ```csv
//! name,lat,lng
//! Tolstopaltsevo,55.611087,37.20829
//! Marushkino,55.595884,37.209755
//! ```
//!
//! ```csv
//! from,to,meters
//! Tolstopaltsevo,Marushkino,3900
//! ```
//!
//! One row per stop of a line, in driving order.  Rows of the same line must
//! agree on `is_loop`; lines are added in order of first appearance.
//!
//! ```csv
//! bus,is_loop,stop
//! 750,false,Tolstopaltsevo
//! 750,false,Marushkino
//! ```
//!
//! Stops load first so that distance and line rows can resolve stop names.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use tc_core::GeoPoint;

use crate::{Catalogue, CatalogueError, CatalogueResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StopRecord {
    name: String,
    lat:  f64,
    lng:  f64,
}

#[derive(Deserialize)]
struct DistanceRecord {
    from:   String,
    to:     String,
    meters: f64,
}

#[derive(Deserialize)]
struct LineRecord {
    bus:     String,
    is_loop: bool,
    stop:    String,
}

struct PendingLine {
    name:    String,
    is_loop: bool,
    stops:   Vec<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Catalogue`] from the three CSV files.
pub fn load_catalogue(stops: &Path, lines: &Path, distances: &Path) -> CatalogueResult<Catalogue> {
    let stops = std::fs::File::open(stops)?;
    let lines = std::fs::File::open(lines)?;
    let distances = std::fs::File::open(distances)?;
    load_catalogue_readers(stops, lines, distances)
}

/// Like [`load_catalogue`] but accepts any `Read` sources.
///
/// Useful for testing (pass `&[u8]` or a `std::io::Cursor`).
pub fn load_catalogue_readers<S: Read, L: Read, D: Read>(
    stops:     S,
    lines:     L,
    distances: D,
) -> CatalogueResult<Catalogue> {
    let mut catalogue = Catalogue::new();

    // ── Stops ─────────────────────────────────────────────────────────────
    for result in csv::Reader::from_reader(stops).deserialize::<StopRecord>() {
        let row = result.map_err(|e| CatalogueError::Parse(e.to_string()))?;
        catalogue.add_stop(row.name, GeoPoint::new(row.lat, row.lng))?;
    }

    // ── Distances ─────────────────────────────────────────────────────────
    for result in csv::Reader::from_reader(distances).deserialize::<DistanceRecord>() {
        let row = result.map_err(|e| CatalogueError::Parse(e.to_string()))?;
        catalogue.add_distance(&row.from, &row.to, row.meters)?;
    }

    // ── Lines: group rows by bus, keeping first-appearance order ──────────
    let mut pending: Vec<PendingLine> = Vec::new();
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();

    for result in csv::Reader::from_reader(lines).deserialize::<LineRecord>() {
        let row = result.map_err(|e| CatalogueError::Parse(e.to_string()))?;
        let slot = *by_name.entry(row.bus.clone()).or_insert_with(|| {
            pending.push(PendingLine {
                name:    row.bus.clone(),
                is_loop: row.is_loop,
                stops:   Vec::new(),
            });
            pending.len() - 1
        });

        let line = &mut pending[slot];
        if line.is_loop != row.is_loop {
            return Err(CatalogueError::Parse(format!(
                "bus line {:?} has conflicting is_loop values",
                line.name
            )));
        }
        line.stops.push(row.stop);
    }

    for line in pending {
        catalogue.add_bus_line(line.name, &line.stops, line.is_loop)?;
    }

    log::info!(
        "loaded catalogue: {} stops, {} bus lines",
        catalogue.stop_count(),
        catalogue.bus_count()
    );
    Ok(catalogue)
}
