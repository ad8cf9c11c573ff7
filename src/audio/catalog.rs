//! Fixed catalog of ambient sounds.
//!
//! Maps a sound id to its display name, emoji, and candidate audio resources.
//! An empty candidate list is a valid, supported case: playing such a sound
//! enters simulated mode rather than failing.

use crate::domain::error::{Result, SleepBunnyError};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundInfo {
    /// Stable identifier used by play commands and statistics.
    pub id: &'static str,
    /// Display name shown in status messages and history.
    pub name: &'static str,
    /// Emoji shown next to the name.
    pub emoji: &'static str,
    /// Candidate audio files; one is picked uniformly at random on start.
    pub files: &'static [&'static str],
}

const SOUNDS: &[SoundInfo] = &[
    SoundInfo {
        id: "page-turn",
        name: "책 넘기는 소리",
        emoji: "📖",
        files: &["assets/audio/book/turning-pages.mp3"],
    },
    SoundInfo {
        id: "ocean-waves",
        name: "파도 소리",
        emoji: "🌊",
        // No shipped file; plays in simulated mode.
        files: &[],
    },
    SoundInfo {
        id: "bonfire",
        name: "모닥불 소리",
        emoji: "🔥",
        files: &[],
    },
    SoundInfo {
        id: "rain",
        name: "빗소리",
        emoji: "🌧️",
        files: &["assets/audio/rain/light-rain.mp3"],
    },
    SoundInfo {
        id: "forest",
        name: "숲속 소리",
        emoji: "🌲",
        files: &["assets/audio/forest/eerie-forest.mp3"],
    },
    SoundInfo {
        id: "white-noise",
        name: "백색 소음",
        emoji: "💤",
        files: &[
            "assets/audio/white/dark-ambient-loop.ogg",
            "assets/audio/white/wall-clock-ticking.wav",
        ],
    },
];

/// Fixed mapping from sound id to its entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundCatalog;

impl SoundCatalog {
    /// Returns every catalog entry, in display order.
    #[must_use]
    pub fn all(&self) -> &'static [SoundInfo] {
        SOUNDS
    }

    /// Looks up a sound by id.
    ///
    /// # Errors
    ///
    /// Returns [`SleepBunnyError::UnknownSound`] when the id has no entry.
    pub fn get(&self, id: &str) -> Result<&'static SoundInfo> {
        SOUNDS
            .iter()
            .find(|sound| sound.id == id)
            .ok_or_else(|| SleepBunnyError::UnknownSound(id.to_string()))
    }

    /// Finds the id for a display name. Play history stores display names, so
    /// callers resolving a history entry back to a playable id go through
    /// this.
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<&'static str> {
        SOUNDS
            .iter()
            .find(|sound| sound.name == name)
            .map(|sound| sound.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_resolves_by_id_and_name() {
        let catalog = SoundCatalog;
        for sound in catalog.all() {
            assert_eq!(catalog.get(sound.id).unwrap().name, sound.name);
            assert_eq!(catalog.id_by_name(sound.name), Some(sound.id));
        }
    }

    #[test]
    fn empty_candidate_lists_are_present() {
        let catalog = SoundCatalog;
        assert!(catalog.get("ocean-waves").unwrap().files.is_empty());
        assert!(catalog.get("bonfire").unwrap().files.is_empty());
    }

    #[test]
    fn unknown_id_is_an_error() {
        assert!(matches!(
            SoundCatalog.get("thunder"),
            Err(SleepBunnyError::UnknownSound(_))
        ));
    }
}
