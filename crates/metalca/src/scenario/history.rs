//! Append-only simulation log of one project.

use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HistoryConflict;

use super::SimulationResult;

/// Simulation results in append order.
///
/// Appends are optimistic: a writer states the length it observed and loses
/// with [`HistoryConflict`] if another append got there first. Records are
/// never edited or removed.
pub struct SimulationHistory {
    records: RwLock<Vec<SimulationResult>>,
}

impl SimulationHistory {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<SimulationResult>> {
        match self.records.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Simulation history lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<SimulationResult>> {
        match self.records.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Simulation history lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of all records, oldest first.
    pub fn records(&self) -> Vec<SimulationResult> {
        self.read().clone()
    }

    pub fn latest(&self) -> Option<SimulationResult> {
        self.read().last().cloned()
    }

    /// Appends `record` if the history still holds `expected` records.
    ///
    /// The record's sequence number is set to `expected + 1`. Returns the
    /// assigned sequence number.
    pub fn append_if_len(
        &self,
        expected: usize,
        mut record: SimulationResult,
    ) -> Result<usize, HistoryConflict> {
        let mut records = self.write();
        if records.len() != expected {
            return Err(HistoryConflict {
                expected,
                actual: records.len(),
            });
        }
        record.sequence = expected + 1;
        records.push(record);
        Ok(expected + 1)
    }
}

impl Default for SimulationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SimulationHistory {
    fn clone(&self) -> Self {
        Self {
            records: RwLock::new(self.records()),
        }
    }
}

impl fmt::Debug for SimulationHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationHistory")
            .field("len", &self.len())
            .finish()
    }
}

impl Serialize for SimulationHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.read().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SimulationHistory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<SimulationResult>::deserialize(deserializer)?;
        Ok(Self {
            records: RwLock::new(records),
        })
    }
}
