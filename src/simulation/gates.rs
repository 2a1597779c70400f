// src/simulation/gates.rs

//! In-place gate kernels over an [`AmplitudeStore`].
//!
//! Every kernel walks the `2^N` index space once. Axes are bit positions,
//! already resolved from handles by the caller.

use crate::core::AmplitudeStore;
use num_complex::Complex;

/// Indices `(i0, i1)` of the `pair`-th pair of basis states that differ
/// only in bit `axis`, with `i0` holding 0 at that bit.
#[inline]
fn pair_indices(pair: usize, axis: usize) -> (usize, usize) {
    let mask = 1usize << axis;
    let lower_mask = mask - 1;
    let i0 = ((pair & !lower_mask) << 1) | (pair & lower_mask);
    (i0, i0 | mask)
}

/// Applies a 2x2 matrix to the qubit on `axis`.
///
/// Used for Hadamard: `(a0 + a1)/√2`, `(a0 − a1)/√2` on every pair.
pub(crate) fn apply_matrix(store: &mut AmplitudeStore, axis: usize, matrix: &[[Complex<f64>; 2]; 2]) {
    let pairs = store.dim() / 2;
    let v = store.vector_mut();
    for pair in 0..pairs {
        let (i0, i1) = pair_indices(pair, axis);
        let psi_0 = v[i0];
        let psi_1 = v[i1];
        v[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
        v[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
    }
}

/// Pauli-X: swaps each pair.
pub(crate) fn apply_pauli_x(store: &mut AmplitudeStore, axis: usize) {
    let pairs = store.dim() / 2;
    let v = store.vector_mut();
    for pair in 0..pairs {
        let (i0, i1) = pair_indices(pair, axis);
        v.swap(i0, i1);
    }
}

/// Pauli-Z: negates every amplitude with bit `axis` set.
pub(crate) fn apply_pauli_z(store: &mut AmplitudeStore, axis: usize) {
    let mask = 1usize << axis;
    for (i, amp) in store.vector_mut().iter_mut().enumerate() {
        if i & mask != 0 {
            *amp = -*amp;
        }
    }
}

/// CNOT: on the control = 1 branch, swaps the target pair.
///
/// `control` and `target` must differ.
pub(crate) fn apply_cnot(store: &mut AmplitudeStore, control: usize, target: usize) {
    debug_assert_ne!(control, target);
    let control_mask = 1usize << control;
    let pairs = store.dim() / 2;
    let v = store.vector_mut();
    for pair in 0..pairs {
        let (i0, i1) = pair_indices(pair, target);
        // i0 and i1 agree on every bit except `target`.
        if i0 & control_mask != 0 {
            v.swap(i0, i1);
        }
    }
}
