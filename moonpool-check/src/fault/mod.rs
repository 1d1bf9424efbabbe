//! Named fault injection.
//!
//! Production code calls [`FaultRegistry::check`] at points where a real
//! failure could happen. Tests opt in by installing a configuration under
//! that name; everything else passes through untouched.
//!
//! ## Submodules
//!
//! - [`error`] - The [`Fault`] sentinel and the default injected error
//! - [`probability`] - Fraction to integer threshold conversion
//! - [`config`] - Per-checkpoint configuration, counters and options
//! - [`registry`] - Name to configuration mapping and the query entry point
//!
//! ## Sampling
//!
//! Each query draws one 63-bit sample and triggers when it is strictly below
//! the configured threshold, so `prob(0.0)` never fires and `prob(1.0)` fires
//! for every sample except `MAX_RANGE`.

pub mod config;
pub mod error;
pub mod probability;
pub mod registry;

pub use config::{
    ErrorFactory, FaultConfig, FaultOption, FaultStats, error_factory, prob, probability,
    random_source, seed,
};
pub use error::{BoxError, Fault, InjectedFault, is_fault};
pub use probability::{Probability, ProbabilityError};
pub use registry::FaultRegistry;
