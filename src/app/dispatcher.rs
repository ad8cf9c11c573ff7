//! Command handling and component coordination.
//!
//! [`Dispatcher`] is the only place that couples the mood machine, the
//! playback coordinator, and the store. Flow is unidirectional:
//!
//! 1. A [`Command`] arrives from the host interface
//! 2. [`Dispatcher::dispatch`] pattern-matches it
//! 3. Component methods mutate their own state and hand back events
//! 4. Events are collected into [`AppEvent`]s and returned for presentation
//!
//! The host also drives [`Dispatcher::tick`] periodically; that is where
//! deferred component work fires and where cross-component reactions happen
//! (a playback start puts the bunny in `Listening`, a playback stop releases
//! it back to idle).

use std::time::Instant;

use chrono::Utc;

use crate::audio::{PlaybackCoordinator, PlaybackEvent};
use crate::domain::book::BookLibrary;
use crate::domain::error::Result;
use crate::domain::mood::MoodVariant;
use crate::mood::{MoodEvent, MoodMachine};
use crate::runtime::Clock;
use crate::storage::JsonStore;

/// Commands accepted by the dispatcher.
///
/// Each command is one discrete user action. The dispatcher processes them
/// sequentially so state transitions stay deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Taps the bunny; a brief bounce, no state change.
    Tap,
    /// Calls the bunny by name; draws a reaction from the fixed pool.
    CallName,
    /// Feeds the bunny.
    Feed {
        /// Food id, e.g. `carrot`.
        food: String,
    },
    /// Opens a book from the library.
    OpenBook {
        /// Library id of the book.
        book_id: String,
    },
    /// Closes the open book, saving the final reading position.
    CloseBook {
        /// Scroll position within the book view.
        last_position: u32,
        /// Whether the reader reached the end.
        completed: bool,
    },
    /// Starts an ambient sound, optionally arming the countdown timer.
    PlaySound {
        /// Catalog id of the sound.
        sound_id: String,
        /// Countdown minutes; `None` keeps the current timer state.
        timer_minutes: Option<u32>,
    },
    /// Toggles pause on the live session.
    PauseOrResume,
    /// Stops playback.
    StopSound,
    /// Sets the playback volume, persisted as the new default.
    SetVolume {
        /// Target volume in `[0, 1]`; out-of-range values are clamped.
        volume: f32,
    },
    /// Arms or clears the countdown timer (0 clears).
    SetTimer {
        /// Countdown minutes.
        minutes: u32,
    },
    /// Names the bunny's person.
    SetUserName {
        /// The new display name; surrounding whitespace is trimmed.
        name: String,
    },
    /// Toggles the dark-mode preference.
    ToggleDarkMode,
    /// Serializes the persisted document for backup.
    Export,
    /// Replaces the persisted document with a backup payload.
    Import {
        /// The backup JSON.
        json: String,
    },
    /// Deletes all persisted data and resets the in-memory state.
    Reset,
}

/// Notification produced by a dispatched command or a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A mood machine notification.
    Mood(MoodEvent),
    /// A playback coordinator notification.
    Playback(PlaybackEvent),
    /// The dark-mode preference changed.
    DarkModeChanged(bool),
    /// A backup was produced; carries the JSON payload.
    BackupExported(String),
    /// A backup was imported over the stored document.
    BackupImported,
    /// All persisted data was deleted.
    DataReset,
    /// A transient user-facing notice outside the mood message.
    Notice(String),
}

/// Korean display name for a food id. Unknown ids pass through unchanged so
/// free-form foods still read naturally in the eating message.
fn food_name(food: &str) -> &str {
    match food {
        "carrot" => "당근",
        "cabbage" => "양배추",
        "apple" => "사과",
        "lettuce" => "상추",
        other => other,
    }
}

/// The application core: mood machine, playback coordinator, and store under
/// one command surface.
pub struct Dispatcher {
    mood: MoodMachine,
    playback: PlaybackCoordinator,
    store: JsonStore,
    library: BookLibrary,
    clock: Box<dyn Clock>,
    /// Id of the currently open book, if any.
    open_book: Option<String>,
    user_name: Option<String>,
}

impl Dispatcher {
    /// Creates a dispatcher over `store`, loading the persisted document,
    /// recording the app open, and seeding component state from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial document save fails.
    pub fn new(store: JsonStore, clock: Box<dyn Clock>) -> Result<Self> {
        Self::with_parts(MoodMachine::new(), PlaybackCoordinator::new(), store, clock)
    }

    /// Creates a dispatcher from pre-built components (injected in tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the initial document save fails.
    pub fn with_parts(
        mut mood: MoodMachine,
        mut playback: PlaybackCoordinator,
        store: JsonStore,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let _span = tracing::debug_span!("dispatcher_init").entered();

        let doc = store.initialize_session()?;
        let user_name = Some(doc.user_profile.name.clone()).filter(|name| !name.is_empty());
        mood.set_user_name(user_name.clone());
        playback.set_volume(doc.sound_settings.volume);

        tracing::debug!(
            opens = doc.statistics.app_open_count,
            named = user_name.is_some(),
            "session initialized"
        );

        Ok(Self {
            mood,
            playback,
            store,
            library: BookLibrary,
            clock,
            open_book: None,
            user_name,
        })
    }

    /// The mood machine, for observer registration and state queries.
    pub fn mood(&mut self) -> &mut MoodMachine {
        &mut self.mood
    }

    /// The playback coordinator, for observer registration and state queries.
    pub fn playback(&mut self) -> &mut PlaybackCoordinator {
        &mut self.playback
    }

    /// The store, for direct document reads (statistics views).
    #[must_use]
    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// The book library.
    #[must_use]
    pub fn library(&self) -> &BookLibrary {
        &self.library
    }

    /// The configured user name, if any.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Processes one command and returns the events it produced.
    ///
    /// # Errors
    ///
    /// Returns errors from component validation (unknown sound or book ids)
    /// and from store writes. Validation errors leave all state untouched.
    #[allow(clippy::too_many_lines)]
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<AppEvent>> {
        let _span = tracing::debug_span!("dispatch", command = ?command).entered();
        let now = self.clock.now();

        match command {
            Command::Tap => Ok(wrap_mood(self.mood.play_interaction_animation())),

            Command::CallName => self.call_name(),

            Command::Feed { food } => {
                let name = food_name(&food).to_string();
                let events = self.mood.play_eating_animation(&name, now);
                self.store.update(|doc| doc.record_feed(&food, Utc::now()))?;
                Ok(wrap_mood(events))
            }

            Command::OpenBook { book_id } => self.open_book(&book_id, now),

            Command::CloseBook {
                last_position,
                completed,
            } => self.close_book(last_position, completed, now),

            Command::PlaySound {
                sound_id,
                timer_minutes,
            } => self.play_sound(&sound_id, timer_minutes, now),

            Command::PauseOrResume => {
                if self.playback.is_playing() {
                    self.playback.pause();
                } else {
                    self.playback.resume();
                }
                Ok(Vec::new())
            }

            Command::StopSound => {
                let mut events = wrap_playback(self.playback.stop());
                if self.mood.variant() == MoodVariant::Listening {
                    events.extend(wrap_mood(self.mood.return_to_idle(now)));
                }
                Ok(events)
            }

            Command::SetVolume { volume } => {
                let applied = self.playback.set_volume(volume);
                self.store
                    .update(|doc| doc.sound_settings.volume = applied)?;
                Ok(Vec::new())
            }

            Command::SetTimer { minutes } => {
                self.playback.set_timer(minutes, now);
                self.store
                    .update(|doc| doc.sound_settings.preferred_timer = minutes)?;
                Ok(Vec::new())
            }

            Command::SetUserName { name } => self.set_user_name(&name),

            Command::ToggleDarkMode => {
                let doc = self.store.update(|doc| {
                    doc.settings.dark_mode = !doc.settings.dark_mode;
                })?;
                Ok(vec![AppEvent::DarkModeChanged(doc.settings.dark_mode)])
            }

            Command::Export => {
                let json = self.store.export()?;
                Ok(vec![AppEvent::BackupExported(json)])
            }

            Command::Import { json } => {
                let doc = self.store.import(&json)?;
                self.user_name =
                    Some(doc.user_profile.name.clone()).filter(|name| !name.is_empty());
                self.mood.set_user_name(self.user_name.clone());
                self.playback.set_volume(doc.sound_settings.volume);
                Ok(vec![AppEvent::BackupImported])
            }

            Command::Reset => {
                let mut events = wrap_playback(self.playback.stop());
                self.store.reset()?;
                self.user_name = None;
                self.mood.set_user_name(None);
                self.open_book = None;
                events.extend(wrap_mood(self.mood.return_to_idle(now)));
                events.push(AppEvent::DataReset);
                Ok(events)
            }
        }
    }

    /// Advances both timer-driven components and applies cross-component
    /// reactions to what they fired.
    pub fn tick(&mut self, now: Instant) -> Vec<AppEvent> {
        let mut events = wrap_mood(self.mood.tick(now));

        let playback_events = self.playback.tick(now);
        for event in &playback_events {
            match event {
                PlaybackEvent::Started { name, .. } => {
                    events.extend(wrap_mood(self.mood.play_listening_animation(name, now)));
                }
                PlaybackEvent::Stopped | PlaybackEvent::TimerFinished
                    if self.mood.variant() == MoodVariant::Listening =>
                {
                    events.extend(wrap_mood(self.mood.return_to_idle(now)));
                }
                _ => {}
            }
        }
        events.extend(wrap_playback(playback_events));

        events
    }

    fn set_user_name(&mut self, name: &str) -> Result<Vec<AppEvent>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(vec![AppEvent::Notice("이름을 입력해주세요!".to_string())]);
        }

        self.store
            .update(|doc| doc.user_profile.name = name.to_string())?;
        self.user_name = Some(name.to_string());
        self.mood.set_user_name(self.user_name.clone());

        let greeting = format!("{name}... 멋진 이름이네요! 💕");
        Ok(wrap_mood(self.mood.play_happy_reaction(Some(greeting.as_str()))))
    }

    fn call_name(&mut self) -> Result<Vec<AppEvent>> {
        let Some(name) = self.user_name.clone() else {
            return Ok(vec![AppEvent::Notice(
                "먼저 이름을 지어주세요! ✏️".to_string(),
            )]);
        };

        let reaction = self.mood.draw_name_call_reaction();
        let events = self.mood.play_happy_reaction(Some(reaction));
        self.store.update(|doc| doc.record_name_call())?;

        tracing::debug!(name = %name, "name call");
        Ok(wrap_mood(events))
    }

    fn open_book(&mut self, book_id: &str, now: Instant) -> Result<Vec<AppEvent>> {
        let book = self.library.get(book_id)?;
        let events = self.mood.play_reading_animation(book.title, now);

        let doc = self.store.load_or_default();
        let position = doc.reading_position(book_id);
        self.store
            .update(|doc| doc.update_reading(book_id, book.title, position, false, Utc::now()))?;
        self.open_book = Some(book_id.to_string());

        Ok(wrap_mood(events))
    }

    fn close_book(
        &mut self,
        last_position: u32,
        completed: bool,
        now: Instant,
    ) -> Result<Vec<AppEvent>> {
        if let Some(book_id) = self.open_book.take() {
            if let Ok(book) = self.library.get(&book_id) {
                self.store.update(|doc| {
                    doc.update_reading(&book_id, book.title, last_position, completed, Utc::now());
                })?;
            }
        }

        let mut events = Vec::new();
        if completed {
            events.extend(wrap_mood(self.mood.play_celebration_effect(now)));
        }
        if self.mood.variant() == MoodVariant::Reading {
            events.extend(wrap_mood(self.mood.return_to_idle(now)));
        }
        Ok(events)
    }

    fn play_sound(
        &mut self,
        sound_id: &str,
        timer_minutes: Option<u32>,
        now: Instant,
    ) -> Result<Vec<AppEvent>> {
        let sound_name = self.playback.catalog().get(sound_id)?.name.to_string();

        let mut events = wrap_playback(self.playback.play(sound_id, now)?);
        if let Some(minutes) = timer_minutes {
            self.playback.set_timer(minutes, now);
        }

        self.store.update(|doc| {
            doc.sound_settings.last_sound = Some(sound_id.to_string());
            if let Some(minutes) = timer_minutes {
                doc.sound_settings.preferred_timer = minutes;
            }
            doc.record_sound_play(&sound_name, Utc::now());
        })?;

        if self.mood.variant() == MoodVariant::Listening {
            events.extend(wrap_mood(self.mood.return_to_idle(now)));
        }
        Ok(events)
    }
}

fn wrap_mood(events: Vec<MoodEvent>) -> Vec<AppEvent> {
    events.into_iter().map(AppEvent::Mood).collect()
}

fn wrap_playback(events: Vec<PlaybackEvent>) -> Vec<AppEvent> {
    events.into_iter().map(AppEvent::Playback).collect()
}
