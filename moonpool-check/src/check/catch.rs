//! Converting panics into errors.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// A panic captured by [`catch`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("panicked: {message}")]
pub struct Panicked {
    /// Panic message, or the payload type when it carried no message.
    pub message: String,
}

impl Panicked {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(e) = payload.downcast_ref::<Box<dyn std::error::Error + Send + Sync>>()
        {
            e.to_string()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// Run `f`, turning any panic into a [`Panicked`] error.
pub fn catch<T, F: FnOnce() -> T>(f: F) -> Result<T, Panicked> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Panicked::from_payload)
}

/// Run `f`, capturing only panics raised with an `E` payload.
///
/// Panics with any other payload keep unwinding. Raise a catchable value with
/// [`std::panic::panic_any`].
pub fn catch_as<E, T, F>(f: F) -> Result<T, E>
where
    E: Any + Send,
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<E>() {
            Ok(err) => Err(*err),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}
