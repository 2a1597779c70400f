// src/simulation/config.rs

use crate::core::{
    DEFAULT_MAX_QUBITS, DEFAULT_NORM_TOLERANCE, DEFAULT_PROBABILITY_TOLERANCE, MAX_QUBITS_CEILING,
};

/// Settings for a [`Simulator`](super::Simulator) session.
///
/// ```
/// use qtele::SimulatorConfig;
///
/// let config = SimulatorConfig::default().with_seed(42).with_max_qubits(8);
/// assert_eq!(config.seed, Some(42));
/// assert_eq!(config.max_qubits, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Deterministic seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Upper bound on simultaneously live qubits. Sessions clamp it to
    /// `MAX_QUBITS_CEILING`.
    pub max_qubits: usize,
    /// Allowed deviation of the squared norm from 1.0.
    pub norm_tolerance: f64,
    /// Marginals this close to 0 or 1 are treated as certain.
    pub probability_tolerance: f64,
    /// Check normalization after every mutating call.
    pub validate_each_step: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
            probability_tolerance: DEFAULT_PROBABILITY_TOLERANCE,
            validate_each_step: true,
        }
    }
}

impl SimulatorConfig {
    /// Fixes the measurement seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the live-qubit cap, clamped to `MAX_QUBITS_CEILING`.
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits.min(MAX_QUBITS_CEILING);
        self
    }

    /// Sets the allowed squared-norm deviation.
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Sets the certainty threshold for measurement and release.
    pub fn with_probability_tolerance(mut self, tolerance: f64) -> Self {
        self.probability_tolerance = tolerance;
        self
    }

    /// Turns the per-step normalization check on or off.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_each_step = enabled;
        self
    }
}
