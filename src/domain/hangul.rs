//! Korean particle selection for display text.
//!
//! Status messages attach a grammatical particle to whatever label they talk
//! about ("당근을 먹고 있어요", "사과를 먹고 있어요"). Which particle of a
//! pair applies depends on whether the label's final syllable ends in a
//! trailing consonant (받침). For precomposed Hangul syllables the trailing
//! consonant is recoverable from the code point: the syllable block starting
//! at U+AC00 is laid out so that `(cp - 0xAC00) % 28` is zero exactly when
//! the syllable has no trailing consonant.
//!
//! This is locale-specific text formatting, not state-machine logic; it is
//! applied identically to food names, book titles, sound labels, and the
//! user's display name.

/// First code point of the precomposed Hangul syllable block.
const SYLLABLE_BASE: u32 = 0xAC00;

/// Last code point of the precomposed Hangul syllable block.
const SYLLABLE_LAST: u32 = 0xD7A3;

/// Number of trailing-consonant slots per leading/vowel combination.
const JONGSEONG_COUNT: u32 = 28;

/// A pair of particles selected by the trailing sound of the preceding word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticlePair {
    /// Object-marking pair: 을 (after a trailing consonant) / 를.
    Object,
    /// Subject-marking pair: 이 (after a trailing consonant) / 가.
    Subject,
}

impl ParticlePair {
    /// Picks the particle of this pair that follows `label`.
    #[must_use]
    pub fn select(self, label: &str) -> &'static str {
        match (self, has_final_consonant(label)) {
            (Self::Object, true) => "을",
            (Self::Object, false) => "를",
            (Self::Subject, true) => "이",
            (Self::Subject, false) => "가",
        }
    }
}

/// Reports whether the final character of `label` is a Hangul syllable with a
/// trailing consonant.
///
/// Characters outside the precomposed syllable block (Latin letters, digits,
/// emoji, an empty label) are treated as having no trailing consonant, so the
/// vowel-following particle applies.
#[must_use]
pub fn has_final_consonant(label: &str) -> bool {
    let Some(last) = label.chars().last() else {
        return false;
    };

    let cp = last as u32;
    if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&cp) {
        return false;
    }

    (cp - SYLLABLE_BASE) % JONGSEONG_COUNT > 0
}

/// Formats `label` with the matching particle of `pair` appended.
///
/// # Examples
///
/// ```
/// use sleepbunny::domain::hangul::{attach_particle, ParticlePair};
///
/// assert_eq!(attach_particle("당근", ParticlePair::Object), "당근을");
/// assert_eq!(attach_particle("사과", ParticlePair::Object), "사과를");
/// ```
#[must_use]
pub fn attach_particle(label: &str, pair: ParticlePair) -> String {
    format!("{label}{}", pair.select(label))
}
