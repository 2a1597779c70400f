// src/simulation/measurement.rs

//! Born-rule sampling and state collapse for Z-basis measurement.

use crate::core::{AmplitudeStore, Outcome};
use num_traits::Zero;
use rand::Rng;

/// Picks an outcome for a qubit whose marginal is `(p0, p1)`.
///
/// Within `tolerance` of a certain outcome no random number is drawn, so the
/// RNG stream only advances on genuinely random measurements.
pub(crate) fn sample_outcome<R: Rng>(p1: f64, rng: &mut R, tolerance: f64) -> Outcome {
    if p1 <= tolerance {
        Outcome::Zero
    } else if p1 >= 1.0 - tolerance {
        Outcome::One
    } else {
        Outcome::from(rng.random::<f64>() < p1)
    }
}

/// Zeroes every amplitude inconsistent with `outcome` on `axis` and divides
/// the survivors by `√p`, where `p` is the probability of `outcome`.
pub(crate) fn collapse(store: &mut AmplitudeStore, axis: usize, outcome: Outcome, p: f64) {
    let mask = 1usize << axis;
    let keep_set = outcome.is_one();
    let scale = p.sqrt();
    for (i, amp) in store.vector_mut().iter_mut().enumerate() {
        if (i & mask != 0) == keep_set {
            *amp /= scale;
        } else {
            *amp = Zero::zero();
        }
    }
}

/// Full measurement: sample, collapse, return the outcome and its probability.
pub(crate) fn measure<R: Rng>(
    store: &mut AmplitudeStore,
    axis: usize,
    rng: &mut R,
    tolerance: f64,
) -> (Outcome, f64) {
    let (p0, p1) = store.marginals(axis);
    let outcome = sample_outcome(p1, rng, tolerance);
    let p = if outcome.is_one() { p1 } else { p0 };
    collapse(store, axis, outcome, p);
    (outcome, p)
}
