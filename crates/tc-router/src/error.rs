//! Router-subsystem error type.
//!
//! There is no `NoRoute` variant: an unreachable pair of known stops is an
//! ordinary [`RouteOutcome`](crate::RouteOutcome), not an error.

use thiserror::Error;

use tc_catalogue::CatalogueError;
use tc_core::CoreError;
use tc_graph::GraphError;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("route index has not been built")]
    NotReady,

    #[error("unknown stop {0:?}")]
    UnknownStop(String),

    #[error("bus line {bus:?}: no road distance between {from:?} and {to:?}")]
    MissingDistance { bus: String, from: String, to: String },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    #[error("corrupt index snapshot: {0}")]
    CorruptIndex(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RouterResult<T> = Result<T, RouterError>;
