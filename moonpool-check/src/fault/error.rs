//! Errors produced by triggered checkpoints.

use std::error::Error as StdError;

/// Boxed error returned by a triggered checkpoint.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Sentinel that every simulated fault chains to.
///
/// Custom error factories should keep `Fault` somewhere in their
/// [`source`](std::error::Error::source) chain so [`is_fault`] recognizes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("fault")]
pub struct Fault;

/// Error built by the default factory: the sentinel tagged with the checkpoint name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fault: {point}")]
pub struct InjectedFault {
    /// Name of the checkpoint that triggered.
    pub point: String,
    #[source]
    source: Fault,
}

impl InjectedFault {
    /// Create a fault for the named checkpoint.
    pub fn new(point: impl Into<String>) -> Self {
        Self {
            point: point.into(),
            source: Fault,
        }
    }
}

/// Default error factory.
pub(crate) fn default_factory(point: &str) -> BoxError {
    Box::new(InjectedFault::new(point))
}

/// Whether `err`, or anything in its source chain, is the [`Fault`] sentinel.
pub fn is_fault(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<Fault>() {
            return true;
        }
        current = e.source();
    }
    false
}
