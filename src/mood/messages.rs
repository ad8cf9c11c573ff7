//! Message pools for the bunny's status line.
//!
//! The idle message is drawn uniformly at random from the basic, dream, and
//! comfort pools. When the user has set a display name, a name-personalized
//! pool is unioned in before the draw, so a name increases variety without
//! reweighting any single message.

use crate::domain::hangul::{attach_particle, ParticlePair};
use crate::runtime::RandomSource;

/// Plain sleeping messages.
const BASIC_MESSAGES: &[&str] = &[
    "평화롭게 잠들어 있어요 💤",
    "자고 있어요 💤",
    "스르르 잠들어 있어요 😴",
    "깊은 잠에 빠져 있어요 🌙",
];

/// Messages about what the bunny might be dreaming.
const DREAM_MESSAGES: &[&str] = &[
    "웃고 있네요. 좋은 꿈을 꾸고 있는 걸까요 ✨",
    "행복한 표정이에요. 무슨 꿈을 꾸고 있을까요 🌟",
    "행복해하네요. 당근이 산더미처럼 쌓인 꿈을 꾸고 있는 걸까요 🥕",
    "꿈속에서 뛰놀고 있는 것 같아요 🌈",
    "달콤한 꿈을 꾸고 있어요 💭",
];

/// Messages addressed to the user winding down for the night.
const COMFORT_MESSAGES: &[&str] = &[
    "오늘 하루도 수고하셨어요 💙",
    "편안히 쉬고 있어요 ☁️",
    "푹 쉬고 있어요. 당신도 쉬세요 🌸",
    "당신도 오늘 최선을 다했어요 ✨",
    "내일은 더 좋은 날이 될 거예요 🌅",
];

/// Reaction glyphs and utterances shown when the user calls the bunny's name.
pub const NAME_CALL_REACTIONS: &[&str] = &[
    "💖", "✨", "⭐", "💕", "🌟", "💗", "💫", "🎀",
    "앗!", "네!", "헤헤", "히히", "좋아요!", "뭐야~", "응?", "왈!",
    "🥰", "😊", "😄", "💝", "🌸", "🦋", "🌺",
];

/// Greeting shown once by the host when the app starts.
pub const WELCOME_MESSAGES: &[&str] = &[
    "오늘 하루도 수고하셨어요!",
    "편안한 밤 되세요 ✨",
    "좋은 꿈 꾸시길 바랍니다",
    "당신은 오늘도 최선을 다했어요",
    "내일은 더 좋은 날이 될 거예요",
    "푹 쉬고 내일 또 만나요",
    "오늘도 고생 많으셨어요 💙",
    "달콤한 휴식의 시간이에요",
];

/// Message shown at the end of the eating sequence, once the bunny is back
/// asleep.
pub const AFTER_MEAL_MESSAGE: &str = "자고 있어요 💤";

/// Status line for the sad reaction.
pub const SAD_MESSAGE: &str = "배고파요... 😢";

/// Default status line for the happy reaction.
pub const HAPPY_MESSAGE: &str = "기분이 좋아요! 😊";

/// Draws an idle message uniformly from the fixed pools.
///
/// With `user_name` set, three name-personalized messages join the pool, each
/// as likely as any fixed message.
pub fn draw_idle_message(user_name: Option<&str>, random: &mut dyn RandomSource) -> String {
    let mut pool: Vec<String> = BASIC_MESSAGES
        .iter()
        .chain(DREAM_MESSAGES)
        .chain(COMFORT_MESSAGES)
        .map(|&message| message.to_string())
        .collect();

    if let Some(name) = user_name.filter(|name| !name.is_empty()) {
        let subject = attach_particle(name, ParticlePair::Subject);
        pool.push(format!(
            "{subject} 당신을 너무 좋아하는 것 같아요. 당신 꿈을 꾸고 있어요 💕"
        ));
        pool.push(format!("{subject} 행복해하네요 💖"));
        pool.push(format!("{subject} 당신을 기다리며 자고 있어요 🌙"));
    }

    let index = random.pick(pool.len());
    pool.swap_remove(index)
}

/// Size of the idle pool for a given name presence, exposed for tests.
#[must_use]
pub fn idle_pool_size(has_name: bool) -> usize {
    let fixed = BASIC_MESSAGES.len() + DREAM_MESSAGES.len() + COMFORT_MESSAGES.len();
    if has_name {
        fixed + 3
    } else {
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::SeededRandom;

    #[test]
    fn name_extends_the_pool_without_replacing_it() {
        assert_eq!(idle_pool_size(false), 14);
        assert_eq!(idle_pool_size(true), 17);
    }

    #[test]
    fn personalized_messages_carry_the_subject_particle() {
        // Force a pick from the personalized tail of the pool.
        struct LastPick;
        impl crate::runtime::RandomSource for LastPick {
            fn pick(&mut self, len: usize) -> usize {
                len - 1
            }
        }

        let message = draw_idle_message(Some("달님"), &mut LastPick);
        assert!(message.starts_with("달님이 "), "got: {message}");
    }

    #[test]
    fn empty_name_draws_from_the_fixed_pool_only() {
        let fixed: Vec<&str> = BASIC_MESSAGES
            .iter()
            .chain(DREAM_MESSAGES)
            .chain(COMFORT_MESSAGES)
            .copied()
            .collect();

        let mut random = SeededRandom::new(1);
        for _ in 0..50 {
            let message = draw_idle_message(Some(""), &mut random);
            assert!(fixed.contains(&message.as_str()), "got: {message}");
        }
    }
}
