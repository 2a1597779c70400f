//! Numerical constants and default limits used by the simulator.

/// Default limits and tolerances for a simulation session.
pub mod sim_constants {
    /// Default cap on simultaneously live qubits. Memory is `16 * 2^N` bytes.
    pub const DEFAULT_MAX_QUBITS: usize = 24;
    /// Hard ceiling accepted by `SimulatorConfig::with_max_qubits`.
    pub const MAX_QUBITS_CEILING: usize = 30;
    /// Allowed deviation of the squared norm from 1.0.
    pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
    /// A marginal probability this close to 0 or 1 is treated as certain.
    pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 1e-10;
    /// 1/√2, the Hadamard coefficient.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}
