//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Opaque handle for a live qubit, issued by a `Simulator`.
///
/// Handle numbers are never re-issued within one session, so a handle that
/// has been released stays invalid even after its axis is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Failures reported by the simulator.
///
/// All of these are programmer or internal errors. Nothing is retried and
/// nothing is corrected behind the caller's back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The handle was released or never allocated in this session.
    #[error("unknown qubit handle {qubit}")]
    UnknownHandle {
        /// The offending handle
        qubit: QubitId,
    },

    /// The qubit is not in a known computational-basis state.
    #[error("invalid state for {qubit}: {message}")]
    InvalidState {
        /// The qubit whose state blocked the request
        qubit: QubitId,
        /// InvalidState failure message
        message: String,
    },

    /// Squared norm of the amplitude vector drifted away from 1.
    #[error("normalization violated: sum(|a_i|^2) = {norm_sqr}")]
    Normalization {
        /// Observed squared norm
        norm_sqr: f64,
    },

    /// The amplitude vector length is not `2^num_qubits`.
    #[error("state dimension {dim} does not match {num_qubits} qubits")]
    DimensionMismatch {
        /// Observed vector length
        dim: usize,
        /// Axis count the store reports
        num_qubits: usize,
    },

    /// The request is malformed (e.g. CNOT with control == target).
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// Allocating another qubit would exceed the configured cap.
    #[error("cannot allocate qubit {requested}: session limit is {max}")]
    CapacityExceeded {
        /// Qubit count the allocation would have produced
        requested: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimError>;
