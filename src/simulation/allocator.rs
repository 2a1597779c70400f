// src/simulation/allocator.rs

use crate::core::{QubitId, Result, SimError};
use std::collections::HashMap;

/// Maps live qubit handles to axes of the amplitude store.
///
/// Axes are kept dense: `0..len()`. Releasing a qubit removes its axis and
/// every higher axis moves down by one, mirroring `AmplitudeStore::remove_axis`.
/// Handle numbers only ever increase.
#[derive(Debug, Default)]
pub(crate) struct QubitAllocator {
    axes: HashMap<QubitId, usize>,
    next_id: u64,
}

impl QubitAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of live handles.
    pub(crate) fn len(&self) -> usize {
        self.axes.len()
    }

    /// Issues a new handle bound to `axis`.
    pub(crate) fn allocate(&mut self, axis: usize) -> QubitId {
        debug_assert_eq!(axis, self.axes.len(), "axes must stay dense");
        let qubit = QubitId(self.next_id);
        self.next_id += 1;
        self.axes.insert(qubit, axis);
        qubit
    }

    /// Axis of a live handle.
    pub(crate) fn axis_of(&self, qubit: &QubitId) -> Result<usize> {
        self.axes
            .get(qubit)
            .copied()
            .ok_or(SimError::UnknownHandle { qubit: *qubit })
    }

    /// Forgets `qubit` and compacts the axes above it. Returns its old axis.
    pub(crate) fn release(&mut self, qubit: &QubitId) -> Result<usize> {
        let axis = self
            .axes
            .remove(qubit)
            .ok_or(SimError::UnknownHandle { qubit: *qubit })?;
        for other in self.axes.values_mut() {
            if *other > axis {
                *other -= 1;
            }
        }
        Ok(axis)
    }

    /// Live handles ordered by axis.
    pub(crate) fn live(&self) -> Vec<QubitId> {
        let mut live: Vec<(QubitId, usize)> = self.axes.iter().map(|(q, a)| (*q, *a)).collect();
        live.sort_by_key(|(_, axis)| *axis);
        live.into_iter().map(|(q, _)| q).collect()
    }
}
