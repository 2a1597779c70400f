// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s over already-allocated qubits.
//!
//! A [`Circuit`] does not own qubits. It names live handles of a
//! [`Simulator`](crate::Simulator) session and is executed with
//! [`Simulator::run`](crate::Simulator::run).

use crate::core::QubitId;
use crate::operations::{Gate, Operation};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// An ordered list of operations and the set of qubits they touch.
#[derive(Clone, PartialEq, Default)]
pub struct Circuit {
    qubits: BTreeSet<QubitId>,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `op`, registering the qubits it names.
    pub fn add_operation(&mut self, op: Operation) {
        self.qubits.extend(op.involved_qubits());
        self.operations.push(op);
    }

    /// Appends every operation yielded by `ops`.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Qubits named anywhere in the circuit, in handle order.
    pub fn qubits(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
        }
    }

    /// Adds a single operation to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Appends a gate.
    pub fn gate(self, gate: Gate) -> Self {
        self.add_op(Operation::Gate(gate))
    }

    /// Appends a Z measurement of `target`.
    pub fn measure(self, target: QubitId) -> Self {
        self.add_op(Operation::Measure { target })
    }

    /// Appends a measure-and-reset of `target`.
    pub fn measure_and_reset(self, target: QubitId) -> Self {
        self.add_op(Operation::MeasureAndReset { target })
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

// Implement Default for convenient creation of builders.
impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();

        // Rows follow handle order.
        let rows: Vec<QubitId> = self.qubits.iter().copied().collect();
        let num_rows = rows.len();
        let qubit_to_row: HashMap<QubitId, usize> = rows.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = rows.iter().map(|q| q.to_string().len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7; // e.g. "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_rows];
        // v_connect[row][t]: connector drawn below `row` at time `t`
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Gate(Gate::Cnot { control, target }) => {
                    let (r_ctrl, r_tgt) = (qubit_to_row[control], qubit_to_row[target]);
                    op_grid[r_ctrl][t] = format_gate("@");
                    op_grid[r_tgt][t] = format_gate("X");
                    let r_min = r_ctrl.min(r_tgt);
                    let r_max = r_ctrl.max(r_tgt);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
                Operation::Gate(gate) => {
                    for q in gate.involved_qubits() {
                        op_grid[qubit_to_row[&q]][t] = format_gate(gate.kind().symbol());
                    }
                }
                Operation::Measure { target } => {
                    op_grid[qubit_to_row[target]][t] = format_gate("M");
                }
                Operation::MeasureAndReset { target } => {
                    op_grid[qubit_to_row[target]][t] = format_gate("M|0>");
                }
            }
        }

        writeln!(f, "Circuit[{} operations on {} qubits]", num_ops, num_rows)?;
        for r in 0..num_rows {
            let label = format!("{}: ", rows[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_rows - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[r][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_tracks_qubits_in_order() {
        let (a, b) = (QubitId(4), QubitId(1));
        let circuit = CircuitBuilder::new()
            .gate(Gate::Hadamard { target: a })
            .gate(Gate::Cnot { control: a, target: b })
            .measure(a)
            .measure_and_reset(b)
            .build();
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.qubits().iter().copied().collect::<Vec<_>>(), vec![b, a]);
        assert_eq!(circuit.operations()[2], Operation::Measure { target: a });
    }

    #[test]
    fn test_display_draws_cnot_connector() {
        let (a, b) = (QubitId(0), QubitId(1));
        let circuit = CircuitBuilder::new()
            .gate(Gate::Hadamard { target: a })
            .gate(Gate::Cnot { control: a, target: b })
            .build();
        let text = circuit.to_string();
        assert!(text.starts_with("Circuit[2 operations on 2 qubits]"));
        assert!(text.contains("───H───"));
        assert!(text.contains("───@───"));
        assert!(text.contains("───X───"));
        assert!(text.contains('│'));
    }

    #[test]
    fn test_empty_circuit_display() {
        assert_eq!(Circuit::new().to_string(), "Circuit[0 operations on 0 qubits]\n");
        assert!(Circuit::new().is_empty());
    }
}
