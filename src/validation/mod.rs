// src/validation/mod.rs

//! Invariant checks on an [`AmplitudeStore`].

use crate::core::{AmplitudeStore, DEFAULT_NORM_TOLERANCE, Result, SimError};

/// Checks that the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `AmplitudeStore` to check.
/// * `tolerance` - Allowed deviation from 1.0. `None` uses 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SimError::Normalization)` otherwise. A failure here means a simulator
///   bug; callers must not try to renormalize their way out of it.
pub fn check_normalization(state: &AmplitudeStore, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sqr = state.norm_sqr();
    if (norm_sqr - 1.0).abs() > effective_tolerance || !norm_sqr.is_finite() {
        Err(SimError::Normalization { norm_sqr })
    } else {
        Ok(())
    }
}

/// Returns `true` when every amplitude is finite.
pub fn is_finite(state: &AmplitudeStore) -> bool {
    state.vector().iter().all(|c| c.re.is_finite() && c.im.is_finite())
}

/// Runs every structural check: finiteness, dimension and normalization.
pub fn validate_state(state: &AmplitudeStore, norm_tolerance: Option<f64>) -> Result<()> {
    if state.dim() != 1usize << state.num_qubits() {
        return Err(SimError::DimensionMismatch {
            dim: state.dim(),
            num_qubits: state.num_qubits(),
        });
    }
    if !is_finite(state) {
        return Err(SimError::Normalization { norm_sqr: f64::NAN });
    }
    check_normalization(state, norm_tolerance)
}
