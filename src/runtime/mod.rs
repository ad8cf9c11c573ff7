//! Runtime services injected into the core components.
//!
//! Both core state machines are pure with respect to time and randomness:
//! they receive "now" as a parameter and draw random picks through a trait.
//! This module provides the production implementations and the deterministic
//! test doubles.
//!
//! # Modules
//!
//! - [`clock`]: Monotonic [`Clock`] trait, [`SystemClock`], [`ManualClock`]
//! - [`random`]: [`RandomSource`] trait, [`ThreadRandom`], [`SeededRandom`]
//! - [`notify`]: Fire-and-forget observer registration

pub mod clock;
pub mod notify;
pub mod random;

pub use clock::{Clock, ManualClock, SystemClock};
pub use notify::Notifier;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
