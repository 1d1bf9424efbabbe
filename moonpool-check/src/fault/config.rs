//! Per-checkpoint fault configuration and the options that build it.

use super::error::{BoxError, default_factory};
use super::probability::Probability;
use crate::random::{RandomSource, SeededSource};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Builds the error returned when a checkpoint triggers. Receives the checkpoint name.
pub type ErrorFactory = Arc<dyn Fn(&str) -> BoxError + Send + Sync>;

/// Counters of a single checkpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FaultStats {
    /// Number of times the checkpoint was queried.
    pub checks: u64,
    /// Queries that produced a fault.
    pub triggered: u64,
    /// Queries that passed through without a fault.
    pub skipped: u64,
}

impl FaultStats {
    /// Fraction of checks that triggered, or 0.0 before the first check.
    pub fn trigger_rate(&self) -> f64 {
        if self.checks == 0 {
            0.0
        } else {
            self.triggered as f64 / self.checks as f64
        }
    }
}

/// Configuration installed under one checkpoint name.
///
/// Immutable once installed apart from its counters, which are atomics and
/// can be bumped from any number of threads.
pub struct FaultConfig {
    probability: Probability,
    factory: ErrorFactory,
    source: Arc<dyn RandomSource>,
    checks: AtomicU64,
    triggered: AtomicU64,
    skipped: AtomicU64,
}

impl FaultConfig {
    /// Default configuration: always triggers, default factory, given source.
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self {
            probability: Probability::ALWAYS,
            factory: Arc::new(default_factory),
            source,
            checks: AtomicU64::new(0),
            triggered: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    /// Apply `options` in order.
    pub fn with_options(mut self, options: impl IntoIterator<Item = FaultOption>) -> Self {
        for option in options {
            option.apply(&mut self);
        }
        self
    }

    /// Sample once for the checkpoint `name`.
    ///
    /// Returns the factory's error when the sample falls strictly below the
    /// configured probability, `Ok(())` otherwise. Either way exactly one of
    /// the triggered/skipped counters moves along with `checks`.
    pub fn query(&self, name: &str) -> Result<(), BoxError> {
        self.checks.fetch_add(1, Ordering::Relaxed);
        let sample = self.source.next_i63();
        if self.probability.triggers(sample) {
            self.triggered.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(point = name, "fault triggered");
            return Err((self.factory)(name));
        }
        self.skipped.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Configured trigger probability.
    pub fn probability(&self) -> Probability {
        self.probability
    }

    /// Current counters.
    ///
    /// Each counter is read independently, so a snapshot taken while other
    /// threads are querying may not add up exactly.
    pub fn stats(&self) -> FaultStats {
        FaultStats {
            checks: self.checks.load(Ordering::Relaxed),
            triggered: self.triggered.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Debug for FaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultConfig")
            .field("probability", &self.probability)
            .field("source", &self.source)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// A single mutation applied to a [`FaultConfig`] before it is installed.
pub struct FaultOption(Box<dyn FnOnce(&mut FaultConfig) + Send>);

impl FaultOption {
    /// Wrap an arbitrary mutation.
    pub fn new(f: impl FnOnce(&mut FaultConfig) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    fn apply(self, config: &mut FaultConfig) {
        (self.0)(config)
    }
}

impl fmt::Debug for FaultOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FaultOption")
    }
}

/// Trigger with probability `p`.
///
/// # Panics
///
/// Panics at the call site when `p` is outside `[0.0, 1.0]` or NaN. Use
/// [`probability`] with [`Probability::new`] to handle the error instead.
#[track_caller]
pub fn prob(p: impl Into<f64>) -> FaultOption {
    match Probability::new(p.into()) {
        Ok(p) => probability(p),
        Err(err) => panic!("{}", err),
    }
}

/// Trigger with an already validated probability.
pub fn probability(p: Probability) -> FaultOption {
    FaultOption::new(move |config| config.probability = p)
}

/// Build triggered errors with `factory` instead of the default.
pub fn error_factory<F>(factory: F) -> FaultOption
where
    F: Fn(&str) -> BoxError + Send + Sync + 'static,
{
    let factory: ErrorFactory = Arc::new(factory);
    FaultOption::new(move |config| config.factory = factory)
}

/// Sample from `source` instead of the registry default.
pub fn random_source(source: Arc<dyn RandomSource>) -> FaultOption {
    FaultOption::new(move |config| config.source = source)
}

/// Sample from a private source seeded with `seed`.
pub fn seed(seed: u64) -> FaultOption {
    random_source(Arc::new(SeededSource::new(seed)))
}
