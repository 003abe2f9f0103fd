//! Process-wide holder of the active reference dataset.

use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::error::ReferenceDataError;

use super::defaults::builtin;
use super::loader::{load_reference_data, validate_reference_data};
use super::schema::ReferenceData;

/// Read-mostly store for [`ReferenceData`].
///
/// Readers take an `Arc` snapshot and keep using it for the whole
/// computation; `reload` swaps the entire table so no computation ever sees a
/// half-updated dataset.
pub struct ReferenceDataStore {
    current: RwLock<Arc<ReferenceData>>,
}

impl ReferenceDataStore {
    /// Creates a store from a dataset after validating it.
    pub fn new(data: ReferenceData) -> Result<Self, ReferenceDataError> {
        validate_reference_data(&data)?;
        Ok(Self {
            current: RwLock::new(Arc::new(data)),
        })
    }

    /// Creates a store holding the built-in defaults.
    pub fn with_defaults() -> Self {
        Self {
            current: RwLock::new(Arc::new(builtin())),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceDataError> {
        let data = load_reference_data(path)?;
        Ok(Self {
            current: RwLock::new(Arc::new(data)),
        })
    }

    /// Returns the active dataset.
    pub fn snapshot(&self) -> Arc<ReferenceData> {
        let guard = match self.current.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Reference data lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        Arc::clone(&guard)
    }

    pub fn version(&self) -> String {
        self.snapshot().version.clone()
    }

    /// Replaces the whole dataset. Snapshots taken earlier stay valid and
    /// unchanged.
    pub fn reload(&self, data: ReferenceData) -> Result<(), ReferenceDataError> {
        validate_reference_data(&data)?;
        let mut guard = match self.current.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Reference data lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        *guard = Arc::new(data);
        log::info!("Reference data reloaded ({})", guard.methodology);
        Ok(())
    }

    pub fn reload_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ReferenceDataError> {
        let data = load_reference_data(path)?;
        self.reload(data)
    }
}

impl Default for ReferenceDataStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
