//! Unit tests for tc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, StopId, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = StopId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StopId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VertexId(0) < VertexId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn oversized_index_rejected() {
        assert!(EdgeId::try_from(u32::MAX as usize + 1).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(StopId(7).to_string(), "StopId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(55.611087, 37.20829);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(55.0, 37.0);
        let b = GeoPoint::new(56.0, 37.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(55.595884, 37.209755);
        let b = GeoPoint::new(55.632761, 37.333324);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-6);
    }
}

#[cfg(test)]
mod settings {
    use crate::{CoreError, RoutingSettings};

    #[test]
    fn velocity_conversion() {
        let s = RoutingSettings::new(6.0, 40.0);
        assert!((s.velocity_m_per_min() - 666.666_666).abs() < 1e-3);
        // 1 km at 60 km/h takes one minute.
        assert!((RoutingSettings::new(0.0, 60.0).travel_minutes(1_000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_wait_is_valid() {
        assert!(RoutingSettings::new(0.0, 30.0).validate().is_ok());
    }

    #[test]
    fn negative_wait_rejected() {
        let err = RoutingSettings::new(-1.0, 30.0).validate().unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn non_positive_velocity_rejected() {
        assert!(RoutingSettings::new(2.0, 0.0).validate().is_err());
        assert!(RoutingSettings::new(2.0, -10.0).validate().is_err());
        assert!(RoutingSettings::new(2.0, f64::NAN).validate().is_err());
    }
}
