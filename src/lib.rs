//! # Incrementator - Thread-Safe Bounded Counter with Wraparound
//!
//! A Rust library providing a shared, mutable counting primitive that many
//! concurrent callers read and mutate through a synchronous interface. The
//! counter holds three mutually dependent fields — current **value**, the
//! **step** added per increment, and an inclusive **ceiling** that triggers
//! wraparound — and keeps them coherent under unbounded concurrent access.
//!
//! ## The Problem
//!
//! A bounded counter is deceptively racy. The increment must add the step,
//! compare against the ceiling, and possibly reset — and a concurrent
//! reconfiguration may be replacing the ceiling or the step at the same
//! moment. A naive design with one lock per field lets an increment read the
//! ceiling, lose the CPU, and then apply its bound check against a limit
//! that no longer exists, leaving the value above the new ceiling.
//!
//! ## The Solution
//!
//! This library guards all three fields with a **single reader-writer lock**,
//! cache-line padded to keep the hot lock word off its neighbours' cache
//! lines. Every mutation is one critical section: field reads, arithmetic,
//! bound check, and reset happen against one coherent state, and no caller
//! ever observes a torn intermediate. Reads take the shared side of the lock
//! and never block each other. All critical sections are O(1) — no I/O and
//! no callback ever runs under the lock.
//!
//! ## Operations
//!
//! | Operation | Effect | Failure |
//! |-----------|--------|---------|
//! | [`value`](counter::Incrementor::value) | read the current value | never |
//! | [`increment`](counter::Incrementor::increment) | `value += step`, wrap past ceiling | hook failure |
//! | [`apply_settings`](counter::Incrementor::apply_settings) | replace step and/or ceiling | `InvalidArgument`, hook failure |
//! | [`state`](counter::Incrementor::state) | coherent three-field snapshot | never |
//!
//! ## Reset Policy
//!
//! Wraparound uses two documented constants: organic overflow during an
//! increment resets the value to `1`
//! ([`OVERFLOW_RESET`](counter::OVERFLOW_RESET)), while an explicit
//! reconfiguration that strands the value above the new ceiling resets it to
//! `0` ([`RECONFIGURE_RESET`](counter::RECONFIGURE_RESET)). See the
//! [`counter`] module docs for the rationale.
//!
//! ## Persistence Hook
//!
//! The counter's only outbound dependency is an optional [`notify::Notify`]
//! capability, invoked synchronously after every successful mutation with
//! the snapshot that mutation produced. A hook failure is surfaced to the
//! caller but the in-memory change is kept: memory state is authoritative,
//! persistence is best-effort-reported. Startup rehydration goes the other
//! way through [`Incrementor::from_state`](counter::Incrementor::from_state).
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use incrementator::counter::Incrementor;
//! use incrementator::settings::Settings;
//!
//! // Create a counter that steps by 2 and wraps past 10.
//! let counter = Arc::new(
//!     Incrementor::with_settings(&Settings::new().with_step(2).with_ceiling(10))
//!         .unwrap(),
//! );
//!
//! counter.increment().unwrap();
//! counter.increment().unwrap();
//! assert_eq!(counter.value(), 4);
//!
//! // Reconfigure at runtime; lowering the ceiling below the value resets it.
//! counter
//!     .apply_settings(&Settings::new().with_ceiling(3))
//!     .unwrap();
//! assert_eq!(counter.value(), 0);
//! ```
//!
//! ## Thread Safety
//!
//! [`Incrementor`](counter::Incrementor) is `Send + Sync` and is meant to be
//! shared across threads via `Arc`. Concurrent increments are serialized by
//! the exclusive lock, so no update is ever lost, and once all calls have
//! returned the value never exceeds the ceiling then in effect.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for [`settings::Settings`] and [`counter::CounterState`] |
//! | `json`  | JSON parsing of settings documents (implies `serde`) |
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: `debug!` on wraparound and
//! applied settings, `warn!` when a notification hook fails. The embedding
//! process owns logger initialization.

pub mod counter;
pub mod error;
pub mod notify;
pub mod service;
pub mod settings;
