//! SleepBunny: a bedtime companion that keeps you company while falling asleep.
//!
//! SleepBunny is a small virtual pet for winding down:
//! - A mood state machine driving the bunny's expression and status message
//! - Feeding, reading, and ambient-sound sessions with timer-driven sequences
//! - A sleep timer and volume control over the playback session
//! - Persistent statistics and history backed by a single JSON document
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shim (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Command routing
//! │  - Command dispatching                              │  ← Cross-component
//! │  - Component coupling on tick                       │    coupling
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Mood Layer    │   │ Audio Layer   │   │ Storage Layer │
//! │ (mood/)       │   │ (audio/)      │   │ (storage/)    │
//! │ - State mach. │   │ - Coordinator │   │ - JSON I/O    │
//! │ - Messages    │   │ - Catalog     │   │ - Statistics  │
//! │ - Sequences   │   │ - Backend API │   │ - Histories   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime & Domain Layers                            │
//! │  - Clock and random seams (runtime/)                │
//! │  - Observer registry (runtime/notify)               │
//! │  - Error types, moods, books, hangul (domain/)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Command dispatcher coupling the components
//! - [`mood`]: The bunny's presentation state machine
//! - [`audio`]: Ambient-sound playback coordination
//! - [`storage`]: JSON document persistence and statistics
//! - [`domain`]: Core domain types (moods, books, errors, hangul)
//! - [`runtime`]: Clock, random, and observer seams
//! - [`observability`]: Structured tracing setup
//!
//! # Timing Model
//!
//! No component reads a clock or spawns a thread. Every mutating operation
//! takes the current [`std::time::Instant`] and the host drives periodic
//! `tick` calls where deferred work fires. Tests substitute a
//! [`runtime::ManualClock`] and step time explicitly.
//!
//! # Example
//!
//! ```no_run
//! use sleepbunny::{initialize, Command, Config};
//!
//! let config = Config::default();
//! let mut app = initialize(&config)?;
//!
//! let events = app.dispatch(Command::Feed { food: "carrot".to_string() })?;
//! // Present events, then keep ticking:
//! // let events = app.tick(std::time::Instant::now());
//! # Ok::<(), sleepbunny::SleepBunnyError>(())
//! ```

pub mod app;
pub mod audio;
pub mod domain;
pub mod mood;
pub mod observability;
pub mod runtime;
pub mod storage;

pub use app::{AppEvent, Command, Dispatcher};
pub use domain::{Result, SleepBunnyError};

use std::path::PathBuf;

use serde::Deserialize;

use crate::runtime::SystemClock;
use crate::storage::JsonStore;

/// Application configuration, loaded from a TOML file or built in code.
///
/// # Example
///
/// ```toml
/// # ~/.config/sleepbunny/config.toml
/// data_dir = "/home/me/.local/share/sleepbunny"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the persisted document.
    ///
    /// Default: `$XDG_DATA_HOME/sleepbunny` or `~/.local/share/sleepbunny`.
    pub data_dir: Option<PathBuf>,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`.
    /// Overridden by the `SLEEPBUNNY_LOG` environment variable.
    pub trace_level: Option<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| SleepBunnyError::Config(format!("invalid config file: {e}")))
    }

    /// Resolves the directory holding the persisted document.
    #[must_use]
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            if !xdg.is_empty() {
                return PathBuf::from(xdg).join("sleepbunny");
            }
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("sleepbunny")
    }

    /// Path of the persisted document file.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.resolve_data_dir().join("sleepbunny.json")
    }
}

/// Builds a ready [`Dispatcher`] from configuration.
///
/// Opens the document store at the configured location, loads or creates the
/// persisted document, records the app open, and seeds the components from
/// the stored settings.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the initial
/// document save fails.
pub fn initialize(config: &Config) -> Result<Dispatcher> {
    tracing::debug!("initializing sleepbunny");

    let store = JsonStore::open(config.data_file())?;
    Dispatcher::new(store, Box::new(SystemClock))
}
