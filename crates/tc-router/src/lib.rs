//! `tc-router` — build-once, query-many routing over a transit catalogue.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`builder`]   | `RouteGraphBuilder`, `RouteGraph`, `EdgeAnnotation`       |
//! | [`planner`]   | `RoutePlanner`, `RouteOutcome`, `Itinerary`, `RouteItem`  |
//! | [`snapshot`]  | `IndexSnapshot` dump/restore                              |
//! | [`store`]     | `IndexStore` trait, `JsonFileStore`                       |
//! | [`config`]    | `PlannerConfig` (JSON `routing_settings`)                 |
//! | [`error`]     | `RouterError`, `RouterResult<T>`                          |
//!
//! # Phases
//!
//! ```text
//! Catalogue ──RouteGraphBuilder──▶ WeightedGraph + annotations
//!                                        │
//!                          ShortestPathIndex::build (once)
//!                                        │
//!              RoutePlanner::find_route (read-only, any number of times)
//! ```
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Forwards to `tc-graph/parallel`.                          |

pub mod builder;
pub mod config;
pub mod error;
pub mod planner;
pub mod snapshot;
pub mod store;


pub use builder::{EdgeAnnotation, RouteGraph, RouteGraphBuilder, StopVertices};
pub use config::PlannerConfig;
pub use error::{RouterError, RouterResult};
pub use planner::{Itinerary, RouteItem, RouteOutcome, RoutePlanner};
pub use snapshot::IndexSnapshot;
pub use store::{IndexStore, JsonFileStore};
