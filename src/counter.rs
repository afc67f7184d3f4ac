//! Core bounded counter with wraparound semantics.
//!
//! This module provides [`Incrementor`], a thread-safe counter holding three
//! mutually dependent fields: the current `value`, the `step` added per
//! increment, and an inclusive `ceiling` that triggers wraparound.
//!
//! # Consistency model
//!
//! All three fields live behind a single reader-writer lock, so every
//! operation observes and produces a coherent state: an increment is always
//! applied against the same ceiling and step, and no caller can see a value
//! that was bumped without its bound check. The lock is held only for the
//! field copies and arithmetic; the persistence hook (see [`crate::notify`])
//! runs strictly after the lock has been released.
//!
//! An earlier design used one lock per field, which allowed an increment to
//! race against a concurrent ceiling change and apply against the stale
//! bound. The single lock trades that sliver of concurrency for the stronger
//! guarantee that once all calls have returned, `value <= ceiling` holds for
//! the final ceiling in effect.
//!
//! # Reset policy
//!
//! Two distinct reset constants are used, on purpose:
//!
//! | Trigger | Constant |
//! |---------|----------|
//! | Organic overflow during [`increment`](Incrementor::increment) | [`OVERFLOW_RESET`] (`1`) |
//! | Explicit reconfiguration or rehydration clamping | [`RECONFIGURE_RESET`] (`0`) |
//!
//! With `ceiling = 0` the organic reset constant itself exceeds the ceiling,
//! so the post-increment bound `value <= ceiling` is stated for
//! `ceiling >= 1`; a zero-ceiling counter pins at `1` after the first
//! increment.

use std::fmt::{self, Debug};
use std::sync::Arc;

use crossbeam_utils::CachePadded;
use log::{debug, warn};
use parking_lot::RwLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CounterError;
use crate::notify::Notify;
use crate::settings::{Settings, DEFAULT_CEILING, DEFAULT_STEP};

/// Value assigned when an increment pushes the counter past its ceiling.
pub const OVERFLOW_RESET: i64 = 1;

/// Value assigned when a reconfiguration (or rehydration) leaves the counter
/// above its new ceiling.
pub const RECONFIGURE_RESET: i64 = 0;

/// A coherent snapshot of all three counter fields.
///
/// Snapshots are taken under the counter's lock, so the three fields are
/// always mutually consistent. Persistence collaborators receive a
/// `CounterState` with every notification and can serialize it as-is when
/// the `serde` feature is enabled.
///
/// # Examples
///
/// ```rust
/// use incrementator::counter::Incrementor;
///
/// let counter = Incrementor::new();
/// counter.increment().unwrap();
///
/// let state = counter.state();
/// assert_eq!(state.value, 1);
/// assert_eq!(state.step, 1);
/// assert_eq!(state.ceiling, i64::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CounterState {
    /// Current count.
    pub value: i64,
    /// Amount added per increment.
    pub step: i64,
    /// Inclusive upper bound triggering wraparound.
    pub ceiling: i64,
}

impl CounterState {
    /// Creates a snapshot from explicit field values.
    pub const fn new(value: i64, step: i64, ceiling: i64) -> Self {
        Self {
            value,
            step,
            ceiling,
        }
    }
}

impl Default for CounterState {
    /// The state of a freshly created counter: `value = 0`, `step = 1`,
    /// `ceiling = i64::MAX`.
    fn default() -> Self {
        Self::new(0, DEFAULT_STEP, DEFAULT_CEILING)
    }
}

/// The three fields guarded by the counter's lock.
struct Fields {
    value: i64,
    step: i64,
    ceiling: i64,
}

impl Fields {
    fn snapshot(&self) -> CounterState {
        CounterState::new(self.value, self.step, self.ceiling)
    }
}

/// A thread-safe counter with a configurable step and wraparound ceiling.
///
/// One `Incrementor` is typically created at process start, shared via
/// `Arc`, and lives for the process lifetime. Reads run concurrently with
/// each other; mutations are serialized through an exclusive lock held only
/// for O(1) arithmetic.
///
/// An optional [`Notify`] capability can be attached at construction. It is
/// invoked synchronously after every successful mutation, outside the lock,
/// and its failure is surfaced to the caller *without* rolling back the
/// in-memory change: memory state is authoritative, persistence is
/// best-effort-reported.
///
/// # Examples
///
/// Basic usage:
///
/// ```rust
/// use incrementator::counter::Incrementor;
/// use incrementator::settings::Settings;
///
/// let counter = Incrementor::with_settings(
///     &Settings::new().with_step(2).with_ceiling(5),
/// )
/// .unwrap();
///
/// assert_eq!(counter.increment().unwrap(), 2);
/// assert_eq!(counter.increment().unwrap(), 4);
/// // 4 + 2 > 5: wraparound
/// assert_eq!(counter.increment().unwrap(), 1);
/// ```
///
/// Multi-threaded usage:
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use incrementator::counter::Incrementor;
///
/// let counter = Arc::new(Incrementor::new());
/// let mut handles = vec![];
///
/// for _ in 0..4 {
///     let c = Arc::clone(&counter);
///     handles.push(thread::spawn(move || {
///         for _ in 0..1000 {
///             c.increment().unwrap();
///         }
///     }));
/// }
///
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(counter.value(), 4000);
/// ```
pub struct Incrementor {
    // Padded so the hot lock does not share a cache line with the notifier
    // pointer or neighbouring allocations.
    fields: CachePadded<RwLock<Fields>>,
    notifier: Option<Arc<dyn Notify>>,
}

impl Incrementor {
    /// Creates a counter with default settings: `value = 0`, `step = 1`,
    /// `ceiling = i64::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use incrementator::counter::Incrementor;
    ///
    /// let counter = Incrementor::new();
    /// assert_eq!(counter.value(), 0);
    /// ```
    pub fn new() -> Self {
        Self::from_fields(Fields {
            value: 0,
            step: DEFAULT_STEP,
            ceiling: DEFAULT_CEILING,
        })
    }

    /// Creates a counter from initial configuration.
    ///
    /// Unset fields fall back to the defaults. Fails with
    /// [`CounterError::InvalidArgument`] if a supplied step or ceiling is
    /// negative.
    pub fn with_settings(settings: &Settings) -> Result<Self, CounterError> {
        settings.validate()?;
        Ok(Self::from_fields(Fields {
            value: 0,
            step: settings.step.unwrap_or(DEFAULT_STEP),
            ceiling: settings.ceiling.unwrap_or(DEFAULT_CEILING),
        }))
    }

    /// Rehydrates a counter from previously persisted state.
    ///
    /// Validates that all three fields are non-negative. A persisted value
    /// above the persisted ceiling is clamped to [`RECONFIGURE_RESET`], the
    /// same policy an explicit reconfiguration applies.
    pub fn from_state(state: CounterState) -> Result<Self, CounterError> {
        for (field, value) in [
            ("value", state.value),
            ("step", state.step),
            ("ceiling", state.ceiling),
        ] {
            if value < 0 {
                return Err(CounterError::InvalidArgument { field, value });
            }
        }
        let value = if state.value > state.ceiling {
            RECONFIGURE_RESET
        } else {
            state.value
        };
        Ok(Self::from_fields(Fields {
            value,
            step: state.step,
            ceiling: state.ceiling,
        }))
    }

    /// Attaches a notification hook, returning `self` for method chaining.
    ///
    /// The hook fires after every successful mutation with the snapshot that
    /// mutation produced. See [`crate::notify`] for the exact contract.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use incrementator::counter::{CounterState, Incrementor};
    /// use incrementator::notify::NotifyError;
    ///
    /// let counter = Incrementor::new().with_notifier(Arc::new(
    ///     |state: CounterState| -> Result<(), NotifyError> {
    ///         // persist state.value / state.step / state.ceiling here
    ///         Ok(())
    ///     },
    /// ));
    /// counter.increment().unwrap();
    /// ```
    pub fn with_notifier(mut self, notifier: Arc<dyn Notify>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn from_fields(fields: Fields) -> Self {
        Self {
            fields: CachePadded::new(RwLock::new(fields)),
            notifier: None,
        }
    }

    /// Returns the current value.
    ///
    /// Takes a shared lock, so concurrent reads never block each other.
    /// Never fails.
    #[inline]
    pub fn value(&self) -> i64 {
        self.fields.read().value
    }

    /// Returns a coherent snapshot of all three fields.
    #[inline]
    pub fn state(&self) -> CounterState {
        self.fields.read().snapshot()
    }

    /// Adds `step` to the counter, wrapping around to [`OVERFLOW_RESET`]
    /// when the result would exceed the ceiling.
    ///
    /// The addition, the bound check, and the reset are a single critical
    /// section: no other caller can observe the value incremented without
    /// its bound check. Returns the new value.
    ///
    /// The only possible failure is [`CounterError::Persistence`] from the
    /// notification hook; the in-memory change is kept either way.
    pub fn increment(&self) -> Result<i64, CounterError> {
        let (state, wrapped) = {
            let mut fields = self.fields.write();
            let wrapped = match fields.value.checked_add(fields.step) {
                Some(next) if next <= fields.ceiling => {
                    fields.value = next;
                    false
                }
                // Past the ceiling, or past i64::MAX entirely.
                _ => {
                    fields.value = OVERFLOW_RESET;
                    true
                }
            };
            (fields.snapshot(), wrapped)
        };
        if wrapped {
            debug!(
                "counter wrapped around ceiling {}, reset to {}",
                state.ceiling, state.value
            );
        }
        self.notify(state)?;
        Ok(state.value)
    }

    /// Applies new settings to the counter.
    ///
    /// Unset fields are left unchanged. Every supplied field is validated
    /// before any field is mutated, so an invalid ceiling also prevents a
    /// valid step from being applied. On success the ceiling is updated
    /// first; if the current value now exceeds it, the value is reset to
    /// [`RECONFIGURE_RESET`]. The step is updated last.
    ///
    /// Fails with [`CounterError::InvalidArgument`] on a negative step or
    /// ceiling (no state is mutated), or with [`CounterError::Persistence`]
    /// if the notification hook fails (the mutation is kept).
    pub fn apply_settings(&self, settings: &Settings) -> Result<(), CounterError> {
        settings.validate()?;
        let state = {
            let mut fields = self.fields.write();
            if let Some(ceiling) = settings.ceiling {
                fields.ceiling = ceiling;
                if fields.value > ceiling {
                    fields.value = RECONFIGURE_RESET;
                }
            }
            if let Some(step) = settings.step {
                fields.step = step;
            }
            fields.snapshot()
        };
        debug!(
            "settings applied: value={} step={} ceiling={}",
            state.value, state.step, state.ceiling
        );
        self.notify(state)?;
        Ok(())
    }

    /// Runs the notification hook, if any, outside all locks.
    fn notify(&self, state: CounterState) -> Result<(), CounterError> {
        if let Some(notifier) = &self.notifier {
            if let Err(err) = notifier.notify(state) {
                warn!("notification hook failed: {err}");
                return Err(CounterError::Persistence(err));
            }
        }
        Ok(())
    }
}

impl Default for Incrementor {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Incrementor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Incrementor")
            .field("value", &state.value)
            .field("step", &state.step)
            .field("ceiling", &state.ceiling)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}
