// src/lib.rs

//! `qtele` - a state-vector simulation core for quantum teleportation
//!
//! The crate provides exactly the primitives the teleportation protocol needs:
//! dynamic qubit allocation and release, Hadamard, Pauli-X, Pauli-Z and CNOT
//! gates, projective Z measurement with collapse, and measure-and-reset. All
//! state lives in an explicitly owned [`Simulator`] session whose random
//! source is seedable, so every run can be replayed.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod protocols;

// Re-export the most common types for easier top-level use
pub use crate::core::{AmplitudeStore, Outcome, QubitId, Result, SimError};
pub use operations::{Gate, GateKind, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{SimulationResult, Simulator, SimulatorConfig};
pub use protocols::teleportation::{
    Basis, RandomMessageReport, teleport, teleport_classical_message, teleport_random_message,
};
pub use validation::{check_normalization, validate_state};

// Example 1: Teleporting a classical bit
// Encodes `true` as |1⟩, teleports it and reads it back.
/// ```
/// use qtele::{Simulator, teleport_classical_message, SimError};
///
/// let mut sim = Simulator::with_seed(2024);
/// for bit in [false, true] {
///     let received = teleport_classical_message(&mut sim, bit)?;
///     assert_eq!(received, bit);
/// }
/// // Every qubit used by the protocol has been released again.
/// assert_eq!(sim.num_qubits(), 0);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Teleporting a superposition
// Prepares |+⟩, teleports it, and checks the receiver's marginal before
// rotating back and measuring.
/// ```
/// use qtele::{Outcome, Simulator, teleport, SimError};
///
/// let mut sim = Simulator::with_seed(7);
/// let msg = sim.allocate_qubit()?;
/// let target = sim.allocate_qubit()?;
///
/// sim.h(msg)?; // |+⟩
/// teleport(&mut sim, msg, target)?;
///
/// let (p0, p1) = sim.inspect_probabilities(target)?;
/// assert!((p0 - 0.5).abs() < 1e-9 && (p1 - 0.5).abs() < 1e-9);
///
/// sim.h(target)?; // |+⟩ -> |0⟩
/// assert_eq!(sim.measure_and_reset(target)?, Outcome::Zero);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
