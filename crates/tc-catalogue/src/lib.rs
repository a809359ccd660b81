//! `tc-catalogue` — the registry of stops, bus lines, and road distances.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`catalogue`] | `Stop`, `BusLine`, `Catalogue`                            |
//! | [`stats`]     | `BusStats`, `StopStats` (route length, curvature, …)      |
//! | [`loader`]    | `load_catalogue`, `load_catalogue_readers`                |
//! | [`error`]     | `CatalogueError`, `CatalogueResult<T>`                    |
//!
//! The catalogue is pure data.  It owns every stop and line record; the
//! routing crates borrow it read-only while building and keep no reference
//! to it afterwards.

pub mod catalogue;
pub mod error;
pub mod loader;
pub mod stats;

#[cfg(test)]
mod tests;

pub use catalogue::{BusLine, Catalogue, Stop};
pub use error::{CatalogueError, CatalogueResult};
pub use loader::{load_catalogue, load_catalogue_readers};
pub use stats::{BusStats, StopStats};
