//! # Prover Artifacts
//!
//! The proving system consumes a fixed circuit binary and a fixed
//! proving-key file, referenced by path. The paths are carried here and
//! handed to the proof system unchanged; this crate never parses the
//! artifact contents.

use std::path::{Path, PathBuf};

/// Paths to the fixed proving artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverArtifacts {
    circuit: PathBuf,
    proving_key: PathBuf,
}

impl ProverArtifacts {
    /// Reference artifacts at explicit paths.
    pub fn new(circuit: impl Into<PathBuf>, proving_key: impl Into<PathBuf>) -> Self {
        Self {
            circuit: circuit.into(),
            proving_key: proving_key.into(),
        }
    }

    /// The paths the page ships with.
    pub fn default_paths() -> Self {
        Self::new("./semaphore.wasm", "./semaphore_final.zkey")
    }

    /// Path to the circuit binary.
    pub fn circuit(&self) -> &Path {
        &self.circuit
    }

    /// Path to the proving key.
    pub fn proving_key(&self) -> &Path {
        &self.proving_key
    }
}
