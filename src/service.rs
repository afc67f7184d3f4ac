//! Request/response boundary for mounting the counter behind a transport.
//!
//! [`CounterService`] exposes the three logical operations a transport layer
//! routes to the counter: `GetValue`, `Increment`, and `SetSettings`. It is
//! deliberately thin; no protocol is implemented here, but the inputs and
//! outputs are concrete so any RPC or HTTP layer can wrap the methods
//! one-to-one.
//!
//! The service is `Clone` and shares one counter, so a transport can hand a
//! copy to each connection handler.

use std::sync::Arc;

use crate::counter::Incrementor;
use crate::error::CounterError;
use crate::settings::Settings;

/// Transport-facing handle to a shared [`Incrementor`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use incrementator::counter::Incrementor;
/// use incrementator::service::CounterService;
/// use incrementator::settings::Settings;
///
/// let service = CounterService::new(Arc::new(Incrementor::new()));
///
/// service.set_settings(Settings::new().with_step(10)).unwrap();
/// assert_eq!(service.increment().unwrap(), 10);
/// assert_eq!(service.get_value(), 10);
/// ```
#[derive(Clone)]
pub struct CounterService {
    counter: Arc<Incrementor>,
}

impl CounterService {
    /// Creates a service around an existing counter.
    pub fn new(counter: Arc<Incrementor>) -> Self {
        Self { counter }
    }

    /// The shared counter behind this service.
    pub fn counter(&self) -> &Arc<Incrementor> {
        &self.counter
    }

    /// `GetValue`: returns the current value. Never fails.
    pub fn get_value(&self) -> i64 {
        self.counter.value()
    }

    /// `Increment`: bumps the counter and returns the new value.
    ///
    /// Fails only if the notification hook fails; the counter change is
    /// kept regardless.
    pub fn increment(&self) -> Result<i64, CounterError> {
        self.counter.increment()
    }

    /// `SetSettings`: reconfigures step and/or ceiling.
    ///
    /// Fails with [`CounterError::InvalidArgument`] on a negative field
    /// (nothing applied) or [`CounterError::Persistence`] if the hook fails
    /// (settings applied anyway).
    pub fn set_settings(&self, settings: Settings) -> Result<(), CounterError> {
        self.counter.apply_settings(&settings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::counter::CounterState;
    use crate::notify::NotifyError;

    fn service() -> CounterService {
        CounterService::new(Arc::new(Incrementor::new()))
    }

    #[test]
    fn test_get_value_starts_at_zero() {
        assert_eq!(service().get_value(), 0);
    }

    #[test]
    fn test_increment_then_read() {
        let service = service();
        assert_eq!(service.increment().unwrap(), 1);
        assert_eq!(service.get_value(), 1);
    }

    #[test]
    fn test_set_settings_roundtrips_through_counter() {
        let service = service();
        service
            .set_settings(Settings::new().with_step(2).with_ceiling(3))
            .unwrap();
        assert_eq!(service.increment().unwrap(), 2);
        // 2 + 2 > 3: wraparound through the boundary too.
        assert_eq!(service.increment().unwrap(), 1);
    }

    #[test]
    fn test_set_settings_invalid_argument() {
        let service = service();
        let err = service
            .set_settings(Settings::new().with_ceiling(-1))
            .unwrap_err();
        assert!(matches!(err, CounterError::InvalidArgument { .. }));
        assert_eq!(service.get_value(), 0);
    }

    #[test]
    fn test_hook_failure_propagates_through_service() {
        let counter = Incrementor::new().with_notifier(Arc::new(
            |_: CounterState| -> Result<(), NotifyError> {
                Err(NotifyError::new("storage offline"))
            },
        ));
        let service = CounterService::new(Arc::new(counter));

        assert!(matches!(
            service.increment().unwrap_err(),
            CounterError::Persistence(_)
        ));
        assert_eq!(service.get_value(), 1);
    }

    #[test]
    fn test_cloned_services_share_one_counter() {
        let service = service();
        let mut handles = vec![];

        for _ in 0..4 {
            let service = service.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..250 {
                    service.increment().unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(service.get_value(), 1000);
    }
}
