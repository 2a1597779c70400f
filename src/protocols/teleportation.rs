// src/protocols/teleportation.rs

//! Quantum teleportation over a [`Simulator`] session.
//!
//! The sender's qubit is entangled with one half of a Bell pair, both sender
//! qubits are measured, and the two classical bits select Pauli corrections
//! on the receiver's qubit. The receiver ends up in the sender's original
//! state while the sender's qubit is left reset to |0⟩.

use crate::circuits::CircuitBuilder;
use crate::core::{Outcome, QubitId, Result, SimError};
use crate::operations::Gate;
use crate::simulation::{SimulationResult, Simulator};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Single-qubit measurement/preparation basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basis {
    /// Computational basis: |0⟩, |1⟩.
    Z,
    /// Hadamard basis: |+⟩, |−⟩.
    X,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Z => write!(f, "Z"),
            Basis::X => write!(f, "X"),
        }
    }
}

/// Teleports the state of `msg` onto `target`.
///
/// Borrows one helper qubit for the Bell pair and releases it before
/// returning. `target` must start in |0⟩. Afterwards `target` holds the
/// original state of `msg` and `msg` is reset to |0⟩.
///
/// # Errors
/// * `InvalidOperation` if `msg` and `target` are the same qubit.
/// * `UnknownHandle` if either handle is not live.
/// * `InvalidState` if `target` is not in |0⟩.
pub fn teleport<R: Rng>(sim: &mut Simulator<R>, msg: QubitId, target: QubitId) -> Result<()> {
    if msg == target {
        return Err(SimError::InvalidOperation {
            message: format!("cannot teleport {} onto itself", msg),
        });
    }
    sim.axis_of(msg)?;
    let (_, p1) = sim.inspect_probabilities(target)?;
    if p1 > sim.config().probability_tolerance {
        return Err(SimError::InvalidState {
            qubit: target,
            message: format!("teleport target must start in |0⟩ (p1 = {:.6})", p1),
        });
    }

    let helper = sim.allocate_qubit()?;

    let circuit = CircuitBuilder::new()
        // Bell pair between helper and target
        .gate(Gate::Hadamard { target: helper })
        .gate(Gate::Cnot { control: helper, target })
        // Bell-basis rotation of msg and helper
        .gate(Gate::Cnot { control: msg, target: helper })
        .gate(Gate::Hadamard { target: msg })
        .measure_and_reset(msg)
        .measure_and_reset(helper)
        .build();
    let result = sim.run(&circuit)?;

    let phase_bit = recorded(&result, msg)?;
    let flip_bit = recorded(&result, helper)?;
    debug!(%msg, %target, %phase_bit, %flip_bit, "teleport corrections");

    // target now holds X^flip Z^phase |ψ⟩; undo X first so no global phase is left.
    if flip_bit.is_one() {
        sim.x(target)?;
    }
    if phase_bit.is_one() {
        sim.z(target)?;
    }

    sim.release(helper)
}

fn recorded(result: &SimulationResult, qubit: QubitId) -> Result<Outcome> {
    result.last_outcome(&qubit).ok_or_else(|| SimError::InvalidOperation {
        message: format!("no measurement recorded for {}", qubit),
    })
}

/// Sends one classical bit through teleportation and returns what arrives.
///
/// The bit is encoded as |0⟩ or |1⟩, so the result equals `bit` with
/// certainty regardless of the random measurement outcomes along the way.
pub fn teleport_classical_message<R: Rng>(sim: &mut Simulator<R>, bit: bool) -> Result<bool> {
    let msg = sim.allocate_qubit()?;
    let target = sim.allocate_qubit()?;

    if bit {
        sim.x(msg)?;
    }
    teleport(sim, msg, target)?;
    let received = sim.measure_and_reset(target)?;

    sim.release(target)?;
    sim.release(msg)?;
    Ok(received.into())
}

/// Puts `qubit` (assumed |0⟩) into the `bit` state of `basis`:
/// |0⟩/|1⟩ for Z, |+⟩/|−⟩ for X.
pub fn prepare<R: Rng>(sim: &mut Simulator<R>, qubit: QubitId, basis: Basis, bit: bool) -> Result<()> {
    if bit {
        sim.x(qubit)?;
    }
    if basis == Basis::X {
        sim.h(qubit)?;
    }
    Ok(())
}

/// Measures `qubit` in `basis` and leaves it reset to |0⟩.
pub fn measure_in_basis<R: Rng>(sim: &mut Simulator<R>, qubit: QubitId, basis: Basis) -> Result<bool> {
    if basis == Basis::X {
        sim.h(qubit)?;
    }
    Ok(sim.measure_and_reset(qubit)?.into())
}

/// Outcome of [`teleport_random_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomMessageReport {
    /// Basis the message was prepared and read back in.
    pub basis: Basis,
    /// Bit encoded by the sender.
    pub sent: bool,
    /// Bit read by the receiver.
    pub received: bool,
}

impl RandomMessageReport {
    pub fn is_recovered(&self) -> bool {
        self.sent == self.received
    }
}

/// Teleports a randomly chosen state out of |0⟩, |1⟩, |+⟩, |−⟩.
///
/// Basis and bit are drawn from the session RNG, so a seeded session replays
/// the same message. States from different bases are not orthogonal, so the
/// receiver can only check the message in the basis it was prepared in.
pub fn teleport_random_message<R: Rng>(sim: &mut Simulator<R>) -> Result<RandomMessageReport> {
    let basis = if sim.rng_mut().random::<bool>() { Basis::X } else { Basis::Z };
    let sent = sim.rng_mut().random::<bool>();

    let msg = sim.allocate_qubit()?;
    let target = sim.allocate_qubit()?;

    prepare(sim, msg, basis, sent)?;
    teleport(sim, msg, target)?;
    let received = measure_in_basis(sim, target, basis)?;

    sim.release(target)?;
    sim.release(msg)?;
    debug!(%basis, sent, received, "random message teleported");
    Ok(RandomMessageReport { basis, sent, received })
}
