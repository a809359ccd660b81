//! Graph-subsystem error type.

use thiserror::Error;

use tc_core::EdgeId;

/// Errors produced by `tc-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight { edge: EdgeId, weight: f64 },

    #[error("edge {edge} has non-finite weight {weight}")]
    NonFiniteWeight { edge: EdgeId, weight: f64 },

    #[error("corrupt shortest-path index: {0}")]
    CorruptIndex(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
