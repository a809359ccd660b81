//! `tc-core` — foundational types for the transit catalogue workspace.
//!
//! Every other `tc-*` crate depends on this one.  It has no `tc-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `StopId`, `BusId`, `VertexId`, `EdgeId`               |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`settings`]    | `RoutingSettings` (wait time, bus velocity)           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `tc-router` snapshots.                         |

pub mod error;
pub mod geo;
pub mod ids;
pub mod settings;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{BusId, EdgeId, StopId, VertexId};
pub use settings::RoutingSettings;
