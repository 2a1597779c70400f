// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// The joint state of every live qubit in a session.
///
/// Holds `2^N` complex amplitudes. Bit `k` of an index is the value of the
/// qubit on axis `k`, so axis 0 is the least significant bit. With no live
/// qubits the store holds the scalar `[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeStore {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl AmplitudeStore {
    /// Creates the empty register (zero qubits, scalar amplitude 1).
    pub(crate) fn new() -> Self {
        Self {
            amplitudes: vec![Complex::one()],
            num_qubits: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(amplitudes: Vec<Complex<f64>>, num_qubits: usize) -> Self {
        Self { amplitudes, num_qubits }
    }

    /// Read-only view of the amplitude vector.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Length of the amplitude vector, `2^N`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of axes (live qubits) in the joint state.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Sum of squared magnitudes over the whole vector.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Born-rule marginal `(p0, p1)` of the qubit on `axis`.
    pub fn marginals(&self, axis: usize) -> (f64, f64) {
        let mask = 1usize << axis;
        self.amplitudes
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(p0, p1), (i, amp)| {
                if i & mask == 0 {
                    (p0 + amp.norm_sqr(), p1)
                } else {
                    (p0, p1 + amp.norm_sqr())
                }
            })
    }

    /// Tensors a fresh |0⟩ onto the register as the new top axis.
    ///
    /// The lower half (new bit = 0) keeps the prior amplitudes and the upper
    /// half (new bit = 1) is zero. Returns the index of the new axis.
    pub(crate) fn push_zero_axis(&mut self) -> usize {
        let axis = self.num_qubits;
        let dim = self.amplitudes.len();
        self.amplitudes.resize(dim * 2, Complex::zero());
        self.num_qubits += 1;
        axis
    }

    /// Projects `axis` onto `value` and drops it from the register.
    ///
    /// Amplitudes whose bit `axis` differs from `value` are discarded, the rest
    /// are compacted (bits above `axis` shift down by one) and renormalised.
    /// Returns the squared norm of the kept half before renormalisation.
    pub(crate) fn remove_axis(&mut self, axis: usize, value: bool) -> f64 {
        let half = self.amplitudes.len() / 2;
        let lower_mask = (1usize << axis) - 1;
        let bit = usize::from(value) << axis;

        let mut kept = Vec::with_capacity(half);
        for i in 0..half {
            // Re-insert the removed bit at position `axis`.
            let src = ((i & !lower_mask) << 1) | bit | (i & lower_mask);
            kept.push(self.amplitudes[src]);
        }

        let kept_norm_sqr: f64 = kept.iter().map(|c| c.norm_sqr()).sum();
        if kept_norm_sqr > 0.0 {
            let scale = kept_norm_sqr.sqrt();
            for amp in kept.iter_mut() {
                *amp /= scale;
            }
        }

        self.amplitudes = kept;
        self.num_qubits -= 1;
        kept_norm_sqr
    }
}

impl fmt::Display for AmplitudeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// Classical result of a Z-basis measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The qubit collapsed to |0⟩.
    Zero,
    /// The qubit collapsed to |1⟩.
    One,
}

impl Outcome {
    /// `true` for [`Outcome::One`].
    pub fn is_one(self) -> bool {
        matches!(self, Outcome::One)
    }
}

impl From<bool> for Outcome {
    fn from(bit: bool) -> Self {
        if bit { Outcome::One } else { Outcome::Zero }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> Self {
        outcome.is_one()
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        u8::from(outcome.is_one())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => write!(f, "Zero"),
            Outcome::One => write!(f, "One"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_empty_store_is_scalar_one() {
        let store = AmplitudeStore::new();
        assert_eq!(store.dim(), 1);
        assert_eq!(store.num_qubits(), 0);
        assert!((store.norm_sqr() - 1.0).abs() < TEST_TOLERANCE);
    }

    #[test]
    fn test_push_zero_axis_doubles_and_zeroes_upper_half() {
        let mut store = AmplitudeStore::new();
        assert_eq!(store.push_zero_axis(), 0);
        assert_eq!(store.push_zero_axis(), 1);
        assert_eq!(store.dim(), 4);
        assert_eq!(store.vector()[0], Complex::one());
        assert!(store.vector()[1..].iter().all(|c| c.is_zero()));
    }

    #[test]
    fn test_remove_middle_axis_compacts_indices() {
        // Three qubits, axis 1 fixed at 1: amplitudes live on 0b?1?.
        let mut store = AmplitudeStore::new();
        for _ in 0..3 {
            store.push_zero_axis();
        }
        let v = store.vector_mut();
        v[0] = Complex::zero();
        v[0b010] = Complex::new(0.6, 0.0);
        v[0b111] = Complex::new(0.0, 0.8);

        let kept = store.remove_axis(1, true);
        assert!((kept - 1.0).abs() < TEST_TOLERANCE);
        assert_eq!(store.num_qubits(), 2);
        // 0b010 -> 0b00, 0b111 -> 0b11
        assert_eq!(store.vector()[0b00], Complex::new(0.6, 0.0));
        assert_eq!(store.vector()[0b11], Complex::new(0.0, 0.8));
        assert!(store.vector()[0b01].is_zero());
        assert!(store.vector()[0b10].is_zero());
    }

    #[test]
    fn test_marginals_read_each_axis() {
        let mut store = AmplitudeStore::new();
        store.push_zero_axis();
        store.push_zero_axis();
        let v = store.vector_mut();
        v[0] = Complex::new(0.5, 0.0);
        v[1] = Complex::new(0.5, 0.0);
        v[2] = Complex::new(0.5, 0.0);
        v[3] = Complex::new(-0.5, 0.0);
        let (p0, p1) = store.marginals(0);
        assert!((p0 - 0.5).abs() < TEST_TOLERANCE && (p1 - 0.5).abs() < TEST_TOLERANCE);
        let (p0, p1) = store.marginals(1);
        assert!((p0 - 0.5).abs() < TEST_TOLERANCE && (p1 - 0.5).abs() < TEST_TOLERANCE);
    }

    #[test]
    fn test_outcome_conversions() {
        assert_eq!(Outcome::from(true), Outcome::One);
        assert!(!bool::from(Outcome::Zero));
        assert_eq!(u8::from(Outcome::One), 1);
        assert_eq!(Outcome::Zero.to_string(), "Zero");
    }
}
