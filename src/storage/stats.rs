//! Recording operations over the persisted document.
//!
//! These mutate the in-memory [`PersistedDocument`] only; callers persist the
//! result through [`crate::storage::JsonStore`]. History lists are bounded so
//! the document stays small no matter how long the companion lives.

use chrono::{DateTime, Utc};

use crate::storage::document::{FeedEntry, PersistedDocument, PlayEntry, ReadingRecord};

/// Maximum retained feed entries.
pub const FEED_HISTORY_CAP: usize = 30;

/// Maximum retained sound play entries.
pub const PLAY_HISTORY_CAP: usize = 20;

impl PersistedDocument {
    /// Records a feed of `food` (a food id) at `at`.
    ///
    /// Appends to the feed history, bumps the total feed counter and the
    /// per-food counter. When the history exceeds [`FEED_HISTORY_CAP`] the
    /// oldest entries are dropped.
    pub fn record_feed(&mut self, food: &str, at: DateTime<Utc>) {
        self.feed_history.push(FeedEntry {
            date: at.format("%Y-%m-%d").to_string(),
            food: food.to_owned(),
            timestamp: at,
        });
        trim_front(&mut self.feed_history, FEED_HISTORY_CAP);

        self.statistics.total_feeds += 1;
        *self
            .statistics
            .feed_details
            .entry(food.to_owned())
            .or_insert(0) += 1;
    }

    /// Records a play of the sound with display name `sound_name` at `at`.
    pub fn record_sound_play(&mut self, sound_name: &str, at: DateTime<Utc>) {
        self.sound_settings.play_history.push(PlayEntry {
            sound: sound_name.to_owned(),
            timestamp: at,
        });
        trim_front(&mut self.sound_settings.play_history, PLAY_HISTORY_CAP);

        self.statistics.total_sound_plays += 1;
        *self
            .statistics
            .sound_details
            .entry(sound_name.to_owned())
            .or_insert(0) += 1;
    }

    /// Records one name call.
    pub fn record_name_call(&mut self) {
        self.statistics.total_call_names += 1;
    }

    /// Records an app open at `at`, updating the last visit timestamp.
    pub fn record_app_open(&mut self, at: DateTime<Utc>) {
        self.statistics.app_open_count += 1;
        self.user_profile.last_visit = at;
    }

    /// Upserts reading progress for `book_id`.
    ///
    /// An existing record for the book is updated in place; otherwise a new
    /// record is appended. `completed` only ever flips forward here.
    pub fn update_reading(
        &mut self,
        book_id: &str,
        title: &str,
        last_position: u32,
        completed: bool,
        at: DateTime<Utc>,
    ) {
        match self
            .reading_history
            .iter_mut()
            .find(|r| r.book_id == book_id)
        {
            Some(record) => {
                record.last_position = last_position;
                record.completed = record.completed || completed;
                record.last_read = at;
            }
            None => self.reading_history.push(ReadingRecord {
                book_id: book_id.to_owned(),
                title: title.to_owned(),
                last_position,
                completed,
                last_read: at,
            }),
        }
    }

    /// Last recorded reading position for `book_id`, or 0 when the book was
    /// never opened.
    pub fn reading_position(&self, book_id: &str) -> u32 {
        self.reading_history
            .iter()
            .find(|r| r.book_id == book_id)
            .map(|r| r.last_position)
            .unwrap_or(0)
    }
}

fn trim_front<T>(list: &mut Vec<T>, cap: usize) {
    if list.len() > cap {
        let excess = list.len() - cap;
        list.drain(..excess);
    }
}
