//! The persisted document model.
//!
//! Everything SleepBunny remembers across sessions lives in one JSON document:
//! the user profile, settings, bounded history lists, and counters. Field
//! names are camelCase on disk so that backups exported by earlier builds of
//! the app import cleanly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current on-disk format version.
pub const DOCUMENT_VERSION: u32 = 1;

/// The single persisted record.
///
/// Loaded and saved wholesale. Missing fields deserialize to their defaults,
/// so documents written by older builds keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
    /// Format version for future migrations.
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub user_profile: UserProfile,

    #[serde(default)]
    pub settings: Settings,

    /// Most recent feed actions, oldest first. Capped at
    /// [`crate::storage::stats::FEED_HISTORY_CAP`].
    #[serde(default)]
    pub feed_history: Vec<FeedEntry>,

    /// One record per book ever opened, upserted on each read.
    #[serde(default)]
    pub reading_history: Vec<ReadingRecord>,

    #[serde(default)]
    pub sound_settings: SoundSettings,

    #[serde(default)]
    pub statistics: Statistics,
}

impl Default for PersistedDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            user_profile: UserProfile::default(),
            settings: Settings::default(),
            feed_history: Vec::new(),
            reading_history: Vec::new(),
            sound_settings: SoundSettings::default(),
            statistics: Statistics::default(),
        }
    }
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

/// Who the companion belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name; empty until the user sets one.
    #[serde(default)]
    pub name: String,

    /// When the document was first created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last time the app was opened over this document.
    #[serde(default = "Utc::now")]
    pub last_visit: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            name: String::new(),
            created_at: now,
            last_visit: now,
        }
    }
}

/// App-wide preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub dark_mode: bool,

    /// Default playback volume in `[0, 1]`.
    #[serde(default = "default_volume")]
    pub volume: f32,

    #[serde(default = "default_true")]
    pub notifications: bool,

    #[serde(default)]
    pub auto_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            volume: default_volume(),
            notifications: true,
            auto_start: false,
        }
    }
}

fn default_volume() -> f32 {
    0.7
}

fn default_true() -> bool {
    true
}

/// One feed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    /// Calendar date of the feed (`YYYY-MM-DD`).
    pub date: String,
    /// Food id as passed to the feed command.
    pub food: String,
    pub timestamp: DateTime<Utc>,
}

/// Reading progress for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRecord {
    pub book_id: String,
    pub title: String,
    /// Last scroll position within the book view.
    #[serde(default)]
    pub last_position: u32,
    #[serde(default)]
    pub completed: bool,
    pub last_read: DateTime<Utc>,
}

/// Playback preferences and recent plays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundSettings {
    /// Id of the most recently played sound.
    #[serde(default)]
    pub last_sound: Option<String>,

    #[serde(default = "default_sound_volume")]
    pub volume: f32,

    /// Countdown minutes the user last chose.
    #[serde(default = "default_timer")]
    pub preferred_timer: u32,

    /// Most recent plays, oldest first. Capped at
    /// [`crate::storage::stats::PLAY_HISTORY_CAP`].
    #[serde(default)]
    pub play_history: Vec<PlayEntry>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            last_sound: None,
            volume: default_sound_volume(),
            preferred_timer: default_timer(),
            play_history: Vec::new(),
        }
    }
}

fn default_sound_volume() -> f32 {
    0.6
}

fn default_timer() -> u32 {
    30
}

/// One sound play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayEntry {
    /// Display name of the played sound.
    pub sound: String,
    pub timestamp: DateTime<Utc>,
}

/// Lifetime counters. Monotonically non-decreasing until an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_feeds: u64,

    #[serde(default)]
    pub total_sound_plays: u64,

    #[serde(default)]
    pub total_call_names: u64,

    #[serde(default)]
    pub app_open_count: u64,

    /// Feed count per food id.
    #[serde(default)]
    pub feed_details: BTreeMap<String, u64>,

    /// Play count per sound display name.
    #[serde(default)]
    pub sound_details: BTreeMap<String, u64>,
}
