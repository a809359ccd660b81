//! Snapshot persistence.
//!
//! The planner only produces and consumes [`IndexSnapshot`]s; where they go
//! is up to an [`IndexStore`].  [`JsonFileStore`] writes one JSON document
//! per file.  `serde_json` is built with `float_roundtrip`, so every `f64`
//! weight reads back bit-for-bit.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{IndexSnapshot, RoutePlanner, RouterResult};

/// Somewhere a snapshot can be saved to and loaded from.
pub trait IndexStore {
    fn save(&self, snapshot: &IndexSnapshot) -> RouterResult<()>;

    fn load(&self) -> RouterResult<IndexSnapshot>;
}

/// Stores a snapshot as a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexStore for JsonFileStore {
    fn save(&self, snapshot: &IndexSnapshot) -> RouterResult<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut out, snapshot)?;
        out.flush()?;
        log::info!("saved route index snapshot to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> RouterResult<IndexSnapshot> {
        let file = File::open(&self.path)?;
        let snapshot = serde_json::from_reader(BufReader::new(file))?;
        log::info!("loaded route index snapshot from {}", self.path.display());
        Ok(snapshot)
    }
}

impl RoutePlanner {
    /// Snapshot the built state into `store`.
    pub fn persist(&self, store: &impl IndexStore) -> RouterResult<()> {
        store.save(&self.snapshot()?)
    }

    /// Load and validate a snapshot from `store`.
    ///
    /// On [`RouterError::CorruptIndex`](crate::RouterError::CorruptIndex) the
    /// caller should fall back to loading the catalogue and rebuilding.
    pub fn load(store: &impl IndexStore) -> RouterResult<Self> {
        Self::restore(store.load()?)
    }
}
