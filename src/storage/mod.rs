//! Persistence layer.
//!
//! One JSON document holds everything the companion remembers: profile,
//! settings, bounded histories, and lifetime counters.

pub mod document;
pub mod json;
pub mod stats;

pub use document::{
    FeedEntry, PersistedDocument, PlayEntry, ReadingRecord, Settings, SoundSettings, Statistics,
    UserProfile,
};
pub use json::JsonStore;
pub use stats::{FEED_HISTORY_CAP, PLAY_HISTORY_CAP};
