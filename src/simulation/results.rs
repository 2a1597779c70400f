// src/simulation/results.rs
use crate::core::{Outcome, QubitId};
use std::fmt;

/// Measurement outcomes recorded while running a [`Circuit`](crate::Circuit).
///
/// Outcomes are kept in execution order; a qubit measured twice appears twice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationResult {
    outcomes: Vec<(QubitId, Outcome)>,
}

impl SimulationResult {
    /// Creates a new, empty result set. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records an outcome for a qubit. (Internal visibility)
    pub(crate) fn record(&mut self, qubit: QubitId, outcome: Outcome) {
        self.outcomes.push((qubit, outcome));
    }

    /// Most recent outcome recorded for `qubit`, if it was measured.
    pub fn last_outcome(&self, qubit: &QubitId) -> Option<Outcome> {
        self.outcomes
            .iter()
            .rev()
            .find(|(q, _)| q == qubit)
            .map(|(_, outcome)| *outcome)
    }

    /// Every recorded `(qubit, outcome)` pair in execution order.
    pub fn outcomes(&self) -> &[(QubitId, Outcome)] {
        &self.outcomes
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.outcomes.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            writeln!(f, "  Outcomes:")?;
            for (step, (qubit, outcome)) in self.outcomes.iter().enumerate() {
                writeln!(f, "    #{} {}: {}", step, qubit, outcome)?;
            }
        }
        Ok(())
    }
}
