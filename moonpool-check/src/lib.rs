//! # Moonpool Check
//!
//! Assertion helpers and named fault injection for test suites.
//!
//! ## Fault Injection
//!
//! Code under test asks a [`FaultRegistry`] whether a named checkpoint should
//! fail. Unless a test configured that name, the answer is always no:
//!
//! ```rust
//! use moonpool_check::{FaultRegistry, is_fault, prob};
//!
//! let faults = FaultRegistry::new();
//! assert!(faults.check("db-write").is_ok());
//!
//! faults.configure("db-write", [prob(1.0)]);
//! let err = faults.check("db-write").unwrap_err();
//! assert!(is_fault(&*err));
//! ```
//!
//! | Option | Default | Effect |
//! |--------|---------|--------|
//! | [`prob`] | 1.0 | Fraction of queries that fail |
//! | [`error_factory`] | [`InjectedFault`] | Error returned on failure |
//! | [`random_source`] | registry source | Sample stream |
//! | [`seed`] | none | Private seeded sample stream |
//!
//! The process default source is seeded from the clock, or from
//! `MOONPOOL_CHECK_SEED` when set.
//!
//! ## Assertions
//!
//! The [`check`] module holds panicking comparison, slice and error-chain
//! assertions plus [`catch`](check::catch()) for turning panics back into
//! errors.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

/// Panicking assertion helpers.
pub mod check;

/// Named fault injection.
pub mod fault;

/// Random sources for fault sampling.
pub mod random;

pub use fault::{
    BoxError, ErrorFactory, Fault, FaultConfig, FaultOption, FaultRegistry, FaultStats,
    InjectedFault, Probability, ProbabilityError, error_factory, is_fault, prob, probability,
    random_source, seed,
};
pub use random::{
    MAX_RANGE, RandomSource, SEED_ENV_VAR, SeededSource, default_seed_value, default_source,
};
