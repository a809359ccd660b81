use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("unknown stop {0:?}")]
    UnknownStop(String),

    #[error("unknown bus line {0:?}")]
    UnknownBus(String),

    #[error("stop {0:?} is already in the catalogue")]
    DuplicateStop(String),

    #[error("bus line {0:?} is already in the catalogue")]
    DuplicateBus(String),

    #[error("invalid road distance {meters} m from {from:?} to {to:?}: must be finite and > 0")]
    InvalidDistance { from: String, to: String, meters: f64 },

    #[error("no road distance between {from:?} and {to:?} in either direction")]
    MissingDistance { from: String, to: String },

    #[error("catalogue parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogueResult<T> = Result<T, CatalogueError>;
