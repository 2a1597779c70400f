// src/operations/mod.rs

//! Gate descriptors and the operations a session can execute.
//!
//! A [`Gate`] names one of the unitaries the simulator supports together
//! with the qubits it acts on. An [`Operation`] is a gate or one of the two
//! measurement forms, and is the unit a [`Circuit`](crate::Circuit) is built
//! from.

use crate::core::{QubitId, Result, SimError};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// The unitary kinds understood by the gate engine, without operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Hadamard,
    PauliX,
    PauliZ,
    Cnot,
}

impl GateKind {
    /// Number of qubit handles the gate takes.
    pub fn arity(self) -> usize {
        match self {
            GateKind::Hadamard | GateKind::PauliX | GateKind::PauliZ => 1,
            GateKind::Cnot => 2,
        }
    }

    /// Short circuit-diagram symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            GateKind::Hadamard => "H",
            GateKind::PauliX => "X",
            GateKind::PauliZ => "Z",
            GateKind::Cnot => "CNOT",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A unitary bound to the qubit(s) it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard: |0⟩ → |+⟩, |1⟩ → |−⟩.
    Hadamard { target: QubitId },
    /// Bit flip.
    PauliX { target: QubitId },
    /// Phase flip on |1⟩.
    PauliZ { target: QubitId },
    /// Flips `target` on the |1⟩ branch of `control`.
    Cnot { control: QubitId, target: QubitId },
}

impl Gate {
    /// Binds a [`GateKind`] to handles, checking arity.
    ///
    /// For [`GateKind::Cnot`] the handles are `[control, target]`.
    pub fn from_kind(kind: GateKind, qubits: &[QubitId]) -> Result<Self> {
        if qubits.len() != kind.arity() {
            return Err(SimError::InvalidOperation {
                message: format!(
                    "{} takes {} qubit(s), got {}",
                    kind,
                    kind.arity(),
                    qubits.len()
                ),
            });
        }
        Ok(match kind {
            GateKind::Hadamard => Gate::Hadamard { target: qubits[0] },
            GateKind::PauliX => Gate::PauliX { target: qubits[0] },
            GateKind::PauliZ => Gate::PauliZ { target: qubits[0] },
            GateKind::Cnot => Gate::Cnot {
                control: qubits[0],
                target: qubits[1],
            },
        })
    }

    pub fn kind(&self) -> GateKind {
        match self {
            Gate::Hadamard { .. } => GateKind::Hadamard,
            Gate::PauliX { .. } => GateKind::PauliX,
            Gate::PauliZ { .. } => GateKind::PauliZ,
            Gate::Cnot { .. } => GateKind::Cnot,
        }
    }

    /// Qubits the gate touches, control first for CNOT.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Hadamard { target } | Gate::PauliX { target } | Gate::PauliZ { target } => {
                vec![*target]
            }
            Gate::Cnot { control, target } => vec![*control, *target],
        }
    }

    /// `[[1, 1], [1, -1]] / √2`.
    pub fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
        let h = Complex::new(crate::core::FRAC_1_SQRT_2, 0.0);
        [[h, h], [h, -h]]
    }

    /// The 2x2 matrix of a single-qubit gate, `None` for CNOT.
    pub fn matrix(&self) -> Option<[[Complex<f64>; 2]; 2]> {
        match self {
            Gate::Hadamard { .. } => Some(Self::hadamard_matrix()),
            Gate::PauliX { .. } => Some([
                [Complex::zero(), Complex::one()],
                [Complex::one(), Complex::zero()],
            ]),
            Gate::PauliZ { .. } => Some([
                [Complex::one(), Complex::zero()],
                [Complex::zero(), -Complex::one()],
            ]),
            Gate::Cnot { .. } => None,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Cnot { control, target } => write!(f, "CNOT({}, {})", control, target),
            Gate::Hadamard { target } | Gate::PauliX { target } | Gate::PauliZ { target } => {
                write!(f, "{}({})", self.kind(), target)
            }
        }
    }
}

/// A single step a [`Simulator`](crate::Simulator) can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Apply a unitary.
    Gate(Gate),
    /// Projective Z-basis measurement; the outcome is recorded.
    Measure { target: QubitId },
    /// Z measurement followed by X on a One outcome, leaving |0⟩.
    MeasureAndReset { target: QubitId },
}

impl Operation {
    /// Returns every qubit the operation names.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate(gate) => gate.involved_qubits(),
            Operation::Measure { target } | Operation::MeasureAndReset { target } => vec![*target],
        }
    }
}

impl From<Gate> for Operation {
    fn from(gate: Gate) -> Self {
        Operation::Gate(gate)
    }
}
