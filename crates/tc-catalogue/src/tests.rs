//! Unit tests for tc-catalogue.
//!
//! All tests use hand-crafted catalogues; no files are read except through
//! in-memory readers.

#[cfg(test)]
mod helpers {
    use tc_core::GeoPoint;
    use crate::Catalogue;

    /// Three stops on a north–south line, one there-and-back bus and one
    /// loop bus.
    ///
    /// Distances: A→B 1000 m, B→C 2000 m, C→B 2500 m, C→A 4000 m.
    /// B→A is absent and resolves through the A→B fallback.
    pub fn small_catalogue() -> Catalogue {
        let mut c = Catalogue::new();
        c.add_stop("A", GeoPoint::new(55.0, 37.0)).unwrap();
        c.add_stop("B", GeoPoint::new(55.01, 37.0)).unwrap();
        c.add_stop("C", GeoPoint::new(55.02, 37.0)).unwrap();
        c.add_stop("Idle", GeoPoint::new(56.0, 38.0)).unwrap();
        c.add_distance("A", "B", 1_000.0).unwrap();
        c.add_distance("B", "C", 2_000.0).unwrap();
        c.add_distance("C", "B", 2_500.0).unwrap();
        c.add_distance("C", "A", 4_000.0).unwrap();
        c.add_bus_line("14", &["A", "B", "C"], false).unwrap();
        c.add_bus_line("7", &["A", "B", "C", "A"], true).unwrap();
        c
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use tc_core::{GeoPoint, StopId};
    use crate::{Catalogue, CatalogueError};

    #[test]
    fn stop_ids_are_sequential() {
        let mut c = Catalogue::new();
        assert_eq!(c.add_stop("X", GeoPoint::new(0.0, 0.0)).unwrap(), StopId(0));
        assert_eq!(c.add_stop("Y", GeoPoint::new(0.0, 1.0)).unwrap(), StopId(1));
        assert_eq!(c.stop_by_name("Y").unwrap().id, StopId(1));
        assert!(c.stop_by_name("Z").is_none());
    }

    #[test]
    fn duplicate_stop_rejected() {
        let mut c = Catalogue::new();
        c.add_stop("X", GeoPoint::new(0.0, 0.0)).unwrap();
        let err = c.add_stop("X", GeoPoint::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateStop(ref n) if n == "X"));
    }

    #[test]
    fn line_with_unknown_stop_rejected() {
        let mut c = Catalogue::new();
        c.add_stop("X", GeoPoint::new(0.0, 0.0)).unwrap();
        let err = c.add_bus_line("1", &["X", "Nowhere"], false).unwrap_err();
        assert!(matches!(err, CatalogueError::UnknownStop(ref n) if n == "Nowhere"));
        assert_eq!(c.bus_count(), 0);
    }

    #[test]
    fn duplicate_bus_rejected() {
        let mut c = super::helpers::small_catalogue();
        let err = c.add_bus_line("14", &["A"], true).unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateBus(_)));
    }

    #[test]
    fn debug_lists_stops() {
        let c = super::helpers::small_catalogue();
        let shown = format!("{c:?}");
        assert!(shown.contains("Idle"));
        assert!(shown.contains("is_loop"));
    }

    #[test]
    fn sorted_used_stops_skips_idle() {
        let c = super::helpers::small_catalogue();
        let names: Vec<_> = c.sorted_used_stops().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn sorted_bus_lines_lexicographic() {
        let c = super::helpers::small_catalogue();
        let names: Vec<_> = c.sorted_bus_lines().iter().map(|b| b.name.as_str()).collect();
        // String order, not numeric.
        assert_eq!(names, ["14", "7"]);
    }

    #[test]
    fn vehicle_path_of_non_loop_retraces() {
        let c = super::helpers::small_catalogue();
        let line = c.bus_by_name("14").unwrap();
        let names: Vec<_> = line
            .vehicle_path()
            .into_iter()
            .map(|s| c.stop(s).name.as_str())
            .collect();
        assert_eq!(names, ["A", "B", "C", "B", "A"]);
    }
}

// ── Road distances ────────────────────────────────────────────────────────────

#[cfg(test)]
mod distances {
    use tc_core::{GeoPoint, StopId};
    use crate::{Catalogue, CatalogueError};

    #[test]
    fn forward_entry_wins() {
        let c = super::helpers::small_catalogue();
        let b = c.stop_id("B").unwrap();
        let cc = c.stop_id("C").unwrap();
        assert_eq!(c.distance(b, cc), Some(2_000.0));
        assert_eq!(c.distance(cc, b), Some(2_500.0));
    }

    #[test]
    fn reverse_fallback() {
        let mut c = Catalogue::new();
        let x = c.add_stop("X", GeoPoint::new(0.0, 0.0)).unwrap();
        let y = c.add_stop("Y", GeoPoint::new(0.0, 1.0)).unwrap();
        c.add_distance("X", "Y", 700.0).unwrap();
        assert_eq!(c.distance(y, x), Some(700.0));
        // Only the supplied entry is stored.
        assert_eq!(c.distances(), vec![((x, y), 700.0)]);
    }

    #[test]
    fn fallback_independent_of_insertion_order() {
        let stops = [("X", 0.0), ("Y", 1.0), ("Z", 2.0)];

        let mut before = Catalogue::new();
        for (name, lng) in stops {
            before.add_stop(name, GeoPoint::new(0.0, lng)).unwrap();
        }
        let mut after = Catalogue::new();
        for (name, lng) in stops {
            after.add_stop(name, GeoPoint::new(0.0, lng)).unwrap();
        }

        // Distances first, then the line ...
        before.add_distance("X", "Y", 700.0).unwrap();
        before.add_distance("Z", "Y", 300.0).unwrap();
        before.add_bus_line("1", &["X", "Y", "Z"], false).unwrap();
        // ... or the line first, then the distances.
        after.add_bus_line("1", &["X", "Y", "Z"], false).unwrap();
        after.add_distance("X", "Y", 700.0).unwrap();
        after.add_distance("Z", "Y", 300.0).unwrap();

        assert_eq!(before.distances(), after.distances());
        assert_eq!(before.distances().len(), 2);
        let (x, y, z) = (StopId(0), StopId(1), StopId(2));
        for c in [&before, &after] {
            assert_eq!(c.distance(y, x), Some(700.0));
            assert_eq!(c.distance(y, z), Some(300.0));
        }
        assert_eq!(before.bus_stats("1").unwrap(), after.bus_stats("1").unwrap());
    }

    #[test]
    fn missing_distance_reported() {
        let mut c = Catalogue::new();
        let x = c.add_stop("X", GeoPoint::new(0.0, 0.0)).unwrap();
        let y = c.add_stop("Y", GeoPoint::new(0.0, 1.0)).unwrap();
        assert_eq!(c.distance(x, y), None);
        let err = c.require_distance(x, y).unwrap_err();
        assert!(matches!(err, CatalogueError::MissingDistance { .. }));
    }

    #[test]
    fn non_positive_distance_rejected() {
        let mut c = Catalogue::new();
        c.add_stop("X", GeoPoint::new(0.0, 0.0)).unwrap();
        c.add_stop("Y", GeoPoint::new(0.0, 1.0)).unwrap();
        assert!(matches!(
            c.add_distance("X", "Y", 0.0),
            Err(CatalogueError::InvalidDistance { .. })
        ));
        assert!(c.add_distance("X", "Y", -5.0).is_err());
        assert!(c.add_distance("X", "Nowhere", 5.0).is_err());
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use crate::CatalogueError;

    #[test]
    fn non_loop_bus_stats() {
        let c = super::helpers::small_catalogue();
        let s = c.bus_stats("14").unwrap();
        assert_eq!(s.stop_count, 5);
        assert_eq!(s.unique_stop_count, 3);
        // A→B 1000 + B→C 2000 + C→B 2500 + B→A 1000 (fallback)
        assert_eq!(s.route_length, 6_500.0);
        assert!(s.curvature > 1.0, "road is longer than the great circle: {}", s.curvature);
    }

    #[test]
    fn loop_bus_stats() {
        let c = super::helpers::small_catalogue();
        let s = c.bus_stats("7").unwrap();
        assert_eq!(s.stop_count, 4);
        assert_eq!(s.unique_stop_count, 3);
        // A→B 1000 + B→C 2000 + C→A 4000
        assert_eq!(s.route_length, 7_000.0);
    }

    #[test]
    fn unknown_bus() {
        let c = super::helpers::small_catalogue();
        assert!(matches!(c.bus_stats("99"), Err(CatalogueError::UnknownBus(_))));
    }

    #[test]
    fn stop_stats_lists_sorted_buses() {
        let c = super::helpers::small_catalogue();
        assert_eq!(c.stop_stats("B").unwrap().buses, ["14", "7"]);
        assert!(c.stop_stats("Idle").unwrap().buses.is_empty());
        assert!(c.stop_stats("Nowhere").is_err());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use crate::{load_catalogue_readers, CatalogueError};

    const STOPS: &str = "\
name,lat,lng\n\
Tolstopaltsevo,55.611087,37.20829\n\
Marushkino,55.595884,37.209755\n\
Rasskazovka,55.632761,37.333324\n\
";

    const DISTANCES: &str = "\
from,to,meters\n\
Tolstopaltsevo,Marushkino,3900\n\
Marushkino,Rasskazovka,9900\n\
Marushkino,Marushkino,100\n\
";

    const LINES: &str = "\
bus,is_loop,stop\n\
750,false,Tolstopaltsevo\n\
750,false,Marushkino\n\
750,false,Marushkino\n\
750,false,Rasskazovka\n\
";

    #[test]
    fn loads_all_tables() {
        let c = load_catalogue_readers(STOPS.as_bytes(), LINES.as_bytes(), DISTANCES.as_bytes())
            .unwrap();
        assert_eq!(c.stop_count(), 3);
        assert_eq!(c.bus_count(), 1);
        let line = c.bus_by_name("750").unwrap();
        assert_eq!(line.stops.len(), 4);
        assert!(!line.is_loop);

        let s = c.bus_stats("750").unwrap();
        assert_eq!(s.stop_count, 7);
        assert_eq!(s.unique_stop_count, 3);
        assert_eq!(s.route_length, 27_800.0);
    }

    #[test]
    fn conflicting_loop_flag() {
        let lines = "bus,is_loop,stop\n1,true,Marushkino\n1,false,Rasskazovka\n";
        let err = load_catalogue_readers(STOPS.as_bytes(), lines.as_bytes(), DISTANCES.as_bytes())
            .unwrap_err();
        assert!(matches!(err, CatalogueError::Parse(_)));
    }

    #[test]
    fn malformed_row() {
        let stops = "name,lat,lng\nBroken,not-a-number,37.0\n";
        let err = load_catalogue_readers(stops.as_bytes(), "bus,is_loop,stop\n".as_bytes(), "from,to,meters\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, CatalogueError::Parse(_)));
    }

    #[test]
    fn line_referencing_unknown_stop() {
        let lines = "bus,is_loop,stop\n1,true,Marushkino\n1,true,Nowhere\n";
        let err = load_catalogue_readers(STOPS.as_bytes(), lines.as_bytes(), DISTANCES.as_bytes())
            .unwrap_err();
        assert!(matches!(err, CatalogueError::UnknownStop(_)));
    }
}
