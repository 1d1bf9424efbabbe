//! Named checkpoint registry.
//!
//! Test setup installs a [`FaultConfig`] under a name with
//! [`FaultRegistry::configure`]; code under test asks
//! [`FaultRegistry::check`] at the places where it could fail. Names that
//! were never configured are inert, so production code can keep its
//! checkpoints and simply pass a registry nobody configured.
//!
//! # Example
//!
//! ```rust
//! use moonpool_check::{FaultRegistry, is_fault, prob};
//!
//! let faults = FaultRegistry::new();
//!
//! fn write_row(faults: &FaultRegistry) -> Result<(), moonpool_check::BoxError> {
//!     faults.check("db-write")?;
//!     // ... the real write ...
//!     Ok(())
//! }
//!
//! assert!(write_row(&faults).is_ok());
//!
//! faults.configure("db-write", [prob(1.0)]);
//! let err = write_row(&faults).unwrap_err();
//! assert!(is_fault(&*err));
//! ```

use super::config::{FaultConfig, FaultOption, FaultStats};
use super::error::BoxError;
use crate::random::{RandomSource, default_source};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry mapping checkpoint names to their configuration.
///
/// Cloning is cheap and every clone sees the same entries.
///
/// # Thread Safety
///
/// Entries live behind an `RwLock`. Queries take the read lock only long
/// enough to clone the entry's `Arc`; sampling and error construction happen
/// after it is released. Installing takes the write lock for the insert.
#[derive(Clone)]
pub struct FaultRegistry {
    entries: Arc<RwLock<HashMap<String, Arc<FaultConfig>>>>,
    source: Arc<dyn RandomSource>,
}

impl FaultRegistry {
    /// Create an empty registry sampling from the process default source.
    pub fn new() -> Self {
        Self::with_source(default_source())
    }

    /// Create an empty registry whose configurations default to `source`.
    ///
    /// Individual configurations can still override it with
    /// [`random_source`](crate::random_source) or [`seed`](crate::seed).
    pub fn with_source(source: Arc<dyn RandomSource>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            source,
        }
    }

    /// Install a configuration under `name`, replacing any previous one.
    ///
    /// Starts from the defaults (always trigger, default error, registry
    /// source) and applies `options` in order. The replaced configuration's
    /// counters are discarded.
    pub fn configure(
        &self,
        name: impl Into<String>,
        options: impl IntoIterator<Item = FaultOption>,
    ) {
        let name = name.into();
        let config = FaultConfig::new(Arc::clone(&self.source)).with_options(options);
        tracing::debug!(
            point = %name,
            probability = %config.probability(),
            "installing fault configuration"
        );

        let replaced = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, Arc::new(config));
        if let Some(old) = replaced {
            tracing::debug!(stats = ?old.stats(), "replaced fault configuration");
        }
    }

    /// Query the checkpoint `name`.
    ///
    /// Returns `Ok(())` when `name` is not configured or the sample did not
    /// trigger, and the configured error otherwise.
    pub fn check(&self, name: &str) -> Result<(), BoxError> {
        match self.get(name) {
            Some(config) => config.query(name),
            None => Ok(()),
        }
    }

    /// Counters of the configuration currently installed under `name`.
    pub fn stats(&self, name: &str) -> Option<FaultStats> {
        self.get(name).map(|config| config.stats())
    }

    /// Counters of every configured checkpoint, ordered by name.
    pub fn snapshot(&self) -> BTreeMap<String, FaultStats> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, config)| (name.clone(), config.stats()))
            .collect()
    }

    /// Names of every configured checkpoint, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Whether `name` has a configuration.
    pub fn is_configured(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// The configuration currently installed under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<FaultConfig>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl Default for FaultRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FaultRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultRegistry")
            .field("points", &self.names())
            .field("source", &self.source)
            .finish()
    }
}
