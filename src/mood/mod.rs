//! Mood state machine for the bunny's presentation.
//!
//! This module owns one of the two cores of the companion: the four-state
//! machine behind the bunny's display (sleeping, eating, reading, listening),
//! its status messages, and the timer-driven sequences layered on top of the
//! plain transitions.
//!
//! # Modules
//!
//! - [`machine`]: [`MoodMachine`], its events, and the timing contract
//! - [`messages`]: idle/reaction message pools and fixed status lines

pub mod machine;
pub mod messages;

pub use machine::{MoodEvent, MoodMachine, Reaction, VisualEffect};
