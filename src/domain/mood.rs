//! Mood variants for the bunny presentation state machine.
//!
//! The bunny is always in exactly one of four moods. `Idle` is the resting
//! state; `Eating` auto-returns to `Idle` after a fixed duration, while
//! `Reading` and `Listening` persist until explicitly ended.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::SleepBunnyError;

/// How long the bunny chews before automatically falling back asleep.
pub const EATING_DURATION: Duration = Duration::from_millis(3000);

/// The bunny's presentation state.
///
/// Exactly one variant is active at any time. Only `Eating` carries an
/// auto-return duration; `Reading` and `Listening` are ended by an explicit
/// return-to-idle command from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodVariant {
    /// Sleeping peacefully. The default and fallback state.
    Idle,
    /// Munching on food. Returns to `Idle` after [`EATING_DURATION`].
    Eating,
    /// Absorbed in a book. Ends when the reading view closes.
    Reading,
    /// Listening to an ambient sound. Ends when playback stops.
    Listening,
}

impl MoodVariant {
    /// Fixed per-variant status label, used when no explicit message is given.
    ///
    /// `Idle` has no fixed label; its message is drawn at random from the
    /// idle message pools instead.
    #[must_use]
    pub fn default_label(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Eating => Some("맛있게 먹고 있어요 😋"),
            Self::Reading => Some("책을 읽고 있어요 📖"),
            Self::Listening => Some("음악을 듣고 있어요 🎵"),
        }
    }

    /// Duration after which the variant automatically returns to `Idle`.
    ///
    /// `None` means the variant never expires on its own.
    #[must_use]
    pub fn auto_return_after(self) -> Option<Duration> {
        match self {
            Self::Eating => Some(EATING_DURATION),
            Self::Idle | Self::Reading | Self::Listening => None,
        }
    }

    /// Lowercase name used in notifications and the string entry point.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Eating => "eating",
            Self::Reading => "reading",
            Self::Listening => "listening",
        }
    }
}

impl fmt::Display for MoodVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoodVariant {
    type Err = SleepBunnyError;

    /// Parses a variant name as used by callers driving the machine by string.
    ///
    /// # Errors
    ///
    /// Returns [`SleepBunnyError::UnknownMood`] for anything that is not one
    /// of the four variant names. The caller's state machine is untouched.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "eating" => Ok(Self::Eating),
            "reading" => Ok(Self::Reading),
            "listening" => Ok(Self::Listening),
            other => Err(SleepBunnyError::UnknownMood(other.to_string())),
        }
    }
}
