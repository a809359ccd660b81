//! Routing parameters consumed at index build time.
//!
//! Typically deserialised from the `routing_settings` section of a JSON
//! configuration document by `tc-router::config` and handed to
//! `RoutePlanner::build_index`.

use crate::{CoreError, CoreResult};

/// km/h → m/min.
const KM_PER_HOUR_TO_M_PER_MIN: f64 = 1000.0 / 60.0;

/// Wait time and bus speed used to weight the routing graph.
///
/// All edge weights produced from these settings are in **minutes**.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before boarding any bus.  Must be ≥ 0.
    pub bus_wait_time: f64,

    /// Bus speed in km/h.  Must be > 0.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Self {
        Self { bus_wait_time, bus_velocity }
    }

    /// Reject settings that would produce negative or non-finite weights.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(CoreError::Config(format!(
                "bus_wait_time must be a finite value >= 0, got {}",
                self.bus_wait_time
            )));
        }
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(CoreError::Config(format!(
                "bus_velocity must be a finite value > 0, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }

    /// Bus speed converted to metres per minute.
    #[inline]
    pub fn velocity_m_per_min(&self) -> f64 {
        self.bus_velocity * KM_PER_HOUR_TO_M_PER_MIN
    }

    /// Minutes needed to cover `meters` at the configured speed.
    #[inline]
    pub fn travel_minutes(&self, meters: f64) -> f64 {
        meters / self.velocity_m_per_min()
    }
}
