// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

// Re-export public types for convenient access via `qtele::core::TypeName`
pub use error::{QubitId, Result, SimError};
pub use state::{AmplitudeStore, Outcome};

pub mod constants;
pub use constants::sim_constants::{
    DEFAULT_MAX_QUBITS, DEFAULT_NORM_TOLERANCE, DEFAULT_PROBABILITY_TOLERANCE, FRAC_1_SQRT_2,
    MAX_QUBITS_CEILING,
};
