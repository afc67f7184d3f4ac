//! Post-mutation notification capability.
//!
//! A [`Notify`] implementation is the counter's only outbound dependency:
//! typically a persistence collaborator that writes the counter state to
//! durable storage after every mutation. The counter holds it as an opaque
//! capability and never sees a concrete storage type.
//!
//! # Contract
//!
//! - Invoked synchronously, once per successful mutation, after the
//!   counter's lock has been released. Slow persistence I/O therefore never
//!   blocks other callers.
//! - Receives the [`CounterState`] snapshot produced by the mutation it
//!   follows, taken inside that mutation's critical section. Re-reading the
//!   counter from inside the hook is unnecessary and would risk observing a
//!   later state than the one being persisted.
//! - A failure is surfaced to the mutating caller as
//!   [`CounterError::Persistence`](crate::error::CounterError::Persistence),
//!   but the in-memory mutation is **not** rolled back and the hook is not
//!   retried. The counter stays usable even if persistence is permanently
//!   broken.
//!
//! Closures implement `Notify` directly, so a collaborator holding a storage
//! handle can be wired up without a named type:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use incrementator::counter::{CounterState, Incrementor};
//! use incrementator::notify::NotifyError;
//!
//! let counter = Incrementor::new().with_notifier(Arc::new(
//!     |state: CounterState| -> Result<(), NotifyError> {
//!         // e.g. UPDATE counter SET value=?, step=?, ceiling=?
//!         let _ = (state.value, state.step, state.ceiling);
//!         Ok(())
//!     },
//! ));
//! ```

use thiserror::Error;

use crate::counter::CounterState;

/// Failure reported by a notification hook.
///
/// The counter treats this as opaque; it carries whatever description the
/// persistence collaborator chose to surface.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct NotifyError(String);

impl NotifyError {
    /// Creates an error from a description of the persistence failure.
    pub fn new(message: impl Into<String>) -> Self {
        NotifyError(message.into())
    }
}

/// Capability invoked after every successful counter mutation.
pub trait Notify: Send + Sync {
    /// Reports a mutation, handing over the state it produced.
    fn notify(&self, state: CounterState) -> Result<(), NotifyError>;
}

impl<F> Notify for F
where
    F: Fn(CounterState) -> Result<(), NotifyError> + Send + Sync,
{
    fn notify(&self, state: CounterState) -> Result<(), NotifyError> {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_implements_notify() {
        let hook = |state: CounterState| -> Result<(), NotifyError> {
            if state.value > state.ceiling {
                return Err(NotifyError::new("incoherent snapshot"));
            }
            Ok(())
        };
        assert!(hook.notify(CounterState::new(1, 1, 10)).is_ok());
        assert!(hook.notify(CounterState::new(11, 1, 10)).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = NotifyError::new("disk full");
        assert_eq!(err.to_string(), "disk full");
    }
}
