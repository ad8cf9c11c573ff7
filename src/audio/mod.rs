//! Ambient-sound playback for the companion.
//!
//! This module owns the second core of the companion: the coordinator that
//! manages the single playback session, its countdown timer, and fades, plus
//! the fixed sound catalog and the audio engine seam.
//!
//! # Modules
//!
//! - [`coordinator`]: [`PlaybackCoordinator`], sessions, and events
//! - [`catalog`]: the fixed sound catalog
//! - [`backend`]: the [`AudioBackend`] trait and the silent default

pub mod backend;
pub mod catalog;
pub mod coordinator;

pub use backend::{AudioBackend, BackendStartError, SilentBackend};
pub use catalog::{SoundCatalog, SoundInfo};
pub use coordinator::{PlaybackCoordinator, PlaybackEvent, PlaybackSession};
