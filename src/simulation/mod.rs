// src/simulation/mod.rs

//! The simulation session.
//!
//! A [`Simulator`] exclusively owns the amplitude store, the qubit allocator
//! and the random source used for measurement. Every mutating call takes
//! `&mut self`, runs to completion and, unless disabled in
//! [`SimulatorConfig`], re-checks normalization before returning.

mod allocator;
mod config;
pub(crate) mod gates;
pub(crate) mod measurement;
mod results;

pub use config::SimulatorConfig;
pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{AmplitudeStore, MAX_QUBITS_CEILING, Outcome, QubitId, Result, SimError};
use crate::operations::{Gate, GateKind, Operation};
use crate::validation;
use allocator::QubitAllocator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

/// A state-vector simulation session.
///
/// `R` is the random source consulted by measurement. The default `StdRng`
/// is seeded from [`SimulatorConfig::seed`]; any other generator can be
/// injected with [`Simulator::with_rng`].
///
/// ```
/// use qtele::{Outcome, Simulator};
///
/// # fn main() -> Result<(), qtele::SimError> {
/// let mut sim = Simulator::with_seed(7);
/// let q = sim.allocate_qubit()?;
/// sim.x(q)?;
/// assert_eq!(sim.measure_and_reset(q)?, Outcome::One);
/// sim.release(q)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Simulator<R = StdRng> {
    state: AmplitudeStore,
    allocator: QubitAllocator,
    rng: R,
    config: SimulatorConfig,
}

impl Simulator<StdRng> {
    /// Creates a session with default settings and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Creates a session whose measurements are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SimulatorConfig::default().with_seed(seed))
    }

    /// Creates a session from explicit settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng, config)
    }
}

impl Default for Simulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Simulator<R> {
    /// Creates a session that draws measurement randomness from `rng`.
    /// `config.seed` is ignored and `config.max_qubits` is clamped to
    /// `MAX_QUBITS_CEILING`.
    pub fn with_rng(rng: R, mut config: SimulatorConfig) -> Self {
        config.max_qubits = config.max_qubits.min(MAX_QUBITS_CEILING);
        Self {
            state: AmplitudeStore::new(),
            allocator: QubitAllocator::new(),
            rng,
            config,
        }
    }

    /// Read-only view of the joint state.
    pub fn state(&self) -> &AmplitudeStore {
        &self.state
    }

    /// Settings this session runs with.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Number of live qubits.
    pub fn num_qubits(&self) -> usize {
        self.allocator.len()
    }

    /// Live handles, ordered by their axis in the state vector.
    pub fn live_qubits(&self) -> Vec<QubitId> {
        self.allocator.live()
    }

    /// Axis (bit position) currently backing `qubit`.
    pub fn axis_of(&self, qubit: QubitId) -> Result<usize> {
        self.allocator.axis_of(&qubit)
    }

    /// The session's random source, for callers that need randomness drawn
    /// from the same reproducible stream as measurement.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // --- Allocation ---

    /// Adds a qubit in |0⟩ to the register and returns its handle.
    ///
    /// # Errors
    /// `CapacityExceeded` when the session already holds `max_qubits`.
    pub fn allocate_qubit(&mut self) -> Result<QubitId> {
        let requested = self.allocator.len() + 1;
        if requested > self.config.max_qubits {
            return Err(SimError::CapacityExceeded {
                requested,
                max: self.config.max_qubits,
            });
        }
        let axis = self.state.push_zero_axis();
        let qubit = self.allocator.allocate(axis);
        debug!(%qubit, axis, live = requested, "allocated qubit");
        self.check_invariants()?;
        Ok(qubit)
    }

    /// Removes a qubit from the register.
    ///
    /// The qubit must be in a known computational-basis state, for instance
    /// right after [`measure_z`](Self::measure_z) or
    /// [`measure_and_reset`](Self::measure_and_reset). Its axis is projected
    /// onto that value and dropped, halving the state vector.
    ///
    /// # Errors
    /// * `UnknownHandle` if `qubit` is not live.
    /// * `InvalidState` if the qubit is superposed or entangled.
    pub fn release(&mut self, qubit: QubitId) -> Result<()> {
        let axis = self.allocator.axis_of(&qubit)?;
        let (_, p1) = self.state.marginals(axis);
        let tolerance = self.config.probability_tolerance;
        let value = if p1 <= tolerance {
            false
        } else if p1 >= 1.0 - tolerance {
            true
        } else {
            return Err(SimError::InvalidState {
                qubit,
                message: format!(
                    "cannot release a qubit that is not in a basis state (p1 = {:.6}); measure or reset it first",
                    p1
                ),
            });
        };
        self.state.remove_axis(axis, value);
        self.allocator.release(&qubit)?;
        debug!(%qubit, axis, value, live = self.allocator.len(), "released qubit");
        self.check_invariants()
    }

    // --- Gates ---

    /// Applies a gate to the live qubits it names.
    ///
    /// # Errors
    /// * `UnknownHandle` if any operand is not live.
    /// * `InvalidOperation` for a CNOT whose control and target coincide.
    pub fn apply(&mut self, gate: Gate) -> Result<()> {
        match gate {
            Gate::Hadamard { target } => {
                let axis = self.allocator.axis_of(&target)?;
                gates::apply_matrix(&mut self.state, axis, &Gate::hadamard_matrix());
            }
            Gate::PauliX { target } => {
                let axis = self.allocator.axis_of(&target)?;
                gates::apply_pauli_x(&mut self.state, axis);
            }
            Gate::PauliZ { target } => {
                let axis = self.allocator.axis_of(&target)?;
                gates::apply_pauli_z(&mut self.state, axis);
            }
            Gate::Cnot { control, target } => {
                let control_axis = self.allocator.axis_of(&control)?;
                let target_axis = self.allocator.axis_of(&target)?;
                if control_axis == target_axis {
                    return Err(SimError::InvalidOperation {
                        message: format!("CNOT control and target are both {}", control),
                    });
                }
                gates::apply_cnot(&mut self.state, control_axis, target_axis);
            }
        }
        trace!(%gate, "applied gate");
        self.check_invariants()
    }

    /// Applies `kind` to `qubits` (`[control, target]` for CNOT).
    pub fn apply_kind(&mut self, kind: GateKind, qubits: &[QubitId]) -> Result<()> {
        self.apply(Gate::from_kind(kind, qubits)?)
    }

    /// Hadamard on `target`.
    pub fn h(&mut self, target: QubitId) -> Result<()> {
        self.apply(Gate::Hadamard { target })
    }

    /// Pauli-X (bit flip) on `target`.
    pub fn x(&mut self, target: QubitId) -> Result<()> {
        self.apply(Gate::PauliX { target })
    }

    /// Pauli-Z (phase flip) on `target`.
    pub fn z(&mut self, target: QubitId) -> Result<()> {
        self.apply(Gate::PauliZ { target })
    }

    /// Flips `target` when `control` is |1⟩.
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> Result<()> {
        self.apply(Gate::Cnot { control, target })
    }

    // --- Measurement ---

    /// Measures `qubit` in the Z basis.
    ///
    /// Returns the sampled outcome and collapses the joint state onto it: all
    /// inconsistent amplitudes become zero and the rest are divided by the
    /// square root of the outcome's probability. Outcomes whose probability is
    /// within `probability_tolerance` of certainty are assigned without
    /// drawing from the RNG.
    pub fn measure_z(&mut self, qubit: QubitId) -> Result<Outcome> {
        let axis = self.allocator.axis_of(&qubit)?;
        let (outcome, p) = measurement::measure(
            &mut self.state,
            axis,
            &mut self.rng,
            self.config.probability_tolerance,
        );
        debug!(%qubit, axis, %outcome, p, "measured qubit");
        self.check_invariants()?;
        Ok(outcome)
    }

    /// Measures `qubit` and flips it back to |0⟩ if the outcome was One.
    ///
    /// Afterwards the qubit is eligible for [`release`](Self::release).
    pub fn measure_and_reset(&mut self, qubit: QubitId) -> Result<Outcome> {
        let outcome = self.measure_z(qubit)?;
        if outcome.is_one() {
            self.x(qubit)?;
        }
        Ok(outcome)
    }

    /// Marginal `(p0, p1)` of `qubit`. Never mutates the state or the RNG.
    pub fn inspect_probabilities(&self, qubit: QubitId) -> Result<(f64, f64)> {
        let axis = self.allocator.axis_of(&qubit)?;
        Ok(self.state.marginals(axis))
    }

    // --- Circuits ---

    /// Executes every operation of `circuit` in order against live qubits.
    ///
    /// Measurement outcomes are collected into the returned
    /// [`SimulationResult`]. Execution stops at the first error.
    pub fn run(&mut self, circuit: &Circuit) -> Result<SimulationResult> {
        let mut result = SimulationResult::new();
        for op in circuit.operations() {
            match *op {
                Operation::Gate(gate) => self.apply(gate)?,
                Operation::Measure { target } => {
                    let outcome = self.measure_z(target)?;
                    result.record(target, outcome);
                }
                Operation::MeasureAndReset { target } => {
                    let outcome = self.measure_and_reset(target)?;
                    result.record(target, outcome);
                }
            }
        }
        Ok(result)
    }

    fn check_invariants(&self) -> Result<()> {
        if !self.config.validate_each_step {
            return Ok(());
        }
        validation::check_normalization(&self.state, Some(self.config.norm_tolerance)).inspect_err(|e| {
            warn!(error = %e, live = self.allocator.len(), "state invariant violated");
        })
    }
}
