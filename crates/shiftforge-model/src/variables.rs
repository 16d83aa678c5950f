//! The assignment-variable tensor.
//!
//! One boolean per `(worker, period, shift type)` cell, allocated up front
//! before any constraint family runs. The factory only names and allocates;
//! no constraints are emitted here.

use std::collections::HashMap;

use shiftforge_core::{ShiftType, Worker};

use crate::model::{Model, VarId};

/// Allocates the assignment tensor for one solve.
pub struct VariableBuilder<'a> {
    workers: &'a [Worker],
    shift_types: &'a [ShiftType],
    num_periods: usize,
}

impl<'a> VariableBuilder<'a> {
    /// Creates a builder over the given problem dimensions.
    pub fn new(workers: &'a [Worker], shift_types: &'a [ShiftType], num_periods: usize) -> Self {
        VariableBuilder {
            workers,
            shift_types,
            num_periods,
        }
    }

    /// Creates every assignment variable and returns the index over them.
    pub fn build(self, model: &mut Model) -> Variables {
        let worker_index: HashMap<String, usize> = self
            .workers
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id.clone(), i))
            .collect();
        let shift_index: HashMap<String, usize> = self
            .shift_types
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        let mut vars =
            Vec::with_capacity(self.workers.len() * self.num_periods * self.shift_types.len());
        for worker in self.workers {
            for period in 0..self.num_periods {
                for shift_type in self.shift_types {
                    let name = format!("assign_{}_{}_{}", worker.id, period, shift_type.id);
                    vars.push(model.new_bool(name));
                }
            }
        }

        tracing::debug!(
            workers = self.workers.len(),
            periods = self.num_periods,
            shift_types = self.shift_types.len(),
            variables = vars.len(),
            "assignment tensor built"
        );

        Variables {
            worker_index,
            shift_index,
            num_periods: self.num_periods,
            num_shift_types: self.shift_types.len(),
            vars,
        }
    }
}

/// O(1) index over the assignment tensor for one solve.
///
/// The model owns the variables; `Variables` holds only handles.
pub struct Variables {
    worker_index: HashMap<String, usize>,
    shift_index: HashMap<String, usize>,
    num_periods: usize,
    num_shift_types: usize,
    vars: Vec<VarId>,
}

impl Variables {
    /// Handle for the `(worker, period, shift type)` cell.
    ///
    /// # Panics
    ///
    /// Unknown ids or an out-of-range period are programmer errors: every
    /// caller iterates entities the tensor was built from, so a miss means
    /// the pipeline is broken. Fails fast with a diagnostic.
    pub fn assignment(&self, worker_id: &str, period: usize, shift_type_id: &str) -> VarId {
        match self.try_assignment(worker_id, period, shift_type_id) {
            Some(var) => var,
            None => panic!(
                "no assignment variable for (worker={worker_id}, period={period}, \
                 shift_type={shift_type_id}); tensor has {} workers, {} periods, {} shift types",
                self.worker_index.len(),
                self.num_periods,
                self.shift_index.len()
            ),
        }
    }

    /// Non-panicking lookup for callers that probe eligibility.
    pub fn try_assignment(
        &self,
        worker_id: &str,
        period: usize,
        shift_type_id: &str,
    ) -> Option<VarId> {
        if period >= self.num_periods {
            return None;
        }
        let w = *self.worker_index.get(worker_id)?;
        let s = *self.shift_index.get(shift_type_id)?;
        Some(self.vars[(w * self.num_periods + period) * self.num_shift_types + s])
    }

    /// Returns true if the worker id was part of the tensor.
    pub fn has_worker(&self, worker_id: &str) -> bool {
        self.worker_index.contains_key(worker_id)
    }

    /// Returns true if the shift-type id was part of the tensor.
    pub fn has_shift_type(&self, shift_type_id: &str) -> bool {
        self.shift_index.contains_key(shift_type_id)
    }

    /// Number of periods in the horizon.
    pub fn num_periods(&self) -> usize {
        self.num_periods
    }

    /// Total number of assignment variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if the tensor is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
