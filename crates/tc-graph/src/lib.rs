//! `tc-graph` — directed weighted graph and all-pairs shortest-path index.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `WeightedGraph`, `Edge`                                     |
//! | [`index`]   | `ShortestPathIndex`, `PathRecord`, `PathInfo`               |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Fork-join index build over Rayon (one row per source).    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod graph;
pub mod index;


pub use error::{GraphError, GraphResult};
pub use graph::{Edge, WeightedGraph};
pub use index::{PathInfo, PathRecord, ShortestPathIndex};
