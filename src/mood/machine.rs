//! The bunny presentation state machine.
//!
//! [`MoodMachine`] owns the current mood variant, the status message, and all
//! timer-driven behavior layered on top: the eating auto-return, the dot
//! animation on the eating message, the music-note pulse while listening, and
//! the celebration burst sequence.
//!
//! # Timing model
//!
//! The machine never reads a clock. Every mutating operation takes `now` and
//! the host drives [`MoodMachine::tick`] with the current instant; due work
//! fires there. All deferred state transitions share a *single* cancellable
//! slot: scheduling a new deferred action replaces the old one, so at most one
//! is ever outstanding and a superseded auto-return can never fire into a
//! newer mood. The eating sequence relies on this: entering `Eating`
//! schedules the plain 3-second auto-return, and `play_eating_animation`
//! immediately supersedes it with the finish-meal step.
//!
//! # Notifications
//!
//! Every emitted [`MoodEvent`] is delivered to observers registered through
//! [`MoodMachine::subscribe`] (fire and forget) and also returned from the
//! operation that produced it, so the dispatcher can react without observing
//! itself.

use std::fmt;
use std::time::{Duration, Instant};

use crate::domain::hangul::{attach_particle, ParticlePair};
use crate::domain::mood::MoodVariant;
use crate::domain::Result;
use crate::mood::messages;
use crate::runtime::{Notifier, RandomSource, ThreadRandom};

/// Interval of the dot animation on the eating message.
pub const DOT_TICK: Duration = Duration::from_millis(500);

/// How long the "잘 먹었어요" message is held before returning to idle.
pub const MEAL_MESSAGE_HOLD: Duration = Duration::from_millis(2000);

/// Interval of the music-note pulse while listening.
pub const NOTE_PULSE: Duration = Duration::from_millis(1000);

/// Interval between celebration bursts.
pub const CELEBRATION_STEP: Duration = Duration::from_millis(100);

/// Total number of celebration bursts.
pub const CELEBRATION_BURSTS: u8 = 10;

/// Duration of the interaction bounce, for the presentation layer.
pub const BOUNCE_DURATION: Duration = Duration::from_millis(500);

/// Visual effect owned by a mood state and cleared on transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualEffect {
    /// Floating book icon shown while reading.
    ReadingIcon,
    /// Music-note emitter shown while listening.
    MusicNotes,
}

/// Brief side-effectful reactions with no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Short bounce on tap or happy moments ([`BOUNCE_DURATION`]).
    Bounce,
    /// Heart particle released when eating starts.
    Heart,
    /// One of the ten celebration particle bursts.
    CelebrationBurst {
        /// Burst position in `0..CELEBRATION_BURSTS`.
        index: u8,
    },
    /// Horizontal shake accompanying the sad message.
    Shake,
}

/// Notification emitted by the mood machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodEvent {
    /// The mood variant changed; carries the new display message.
    StateChanged {
        /// The freshly entered variant.
        variant: MoodVariant,
        /// The display message computed for it.
        message: String,
    },
    /// The display message changed without a variant change (dot animation,
    /// meal completion, reactions).
    MessageChanged {
        /// The new display message.
        message: String,
    },
    /// A state-owned visual effect started.
    EffectStarted(VisualEffect),
    /// A state-owned visual effect was cleared.
    EffectCleared(VisualEffect),
    /// The music-note emitter pulsed.
    NotePulse,
    /// A brief reaction fired.
    Reaction(Reaction),
}

/// The deferred transition occupying the machine's single pending slot.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DeferredAction {
    /// Fall back to idle, optionally with a fixed message.
    ReturnToIdle { message: Option<String> },
    /// End the eating sequence: stop dots, show the completion message, then
    /// hold before the idle return.
    FinishEating { food: String },
}

#[derive(Debug, Clone)]
struct Deferred {
    deadline: Instant,
    action: DeferredAction,
}

#[derive(Debug, Clone)]
struct DotTicker {
    base: String,
    next_at: Instant,
    count: u8,
}

#[derive(Debug, Clone, Copy)]
struct NoteTicker {
    next_at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Celebration {
    next_at: Instant,
    fired: u8,
}

/// The bunny's mood state machine.
///
/// Constructed fresh per app session; there are no globals. Exactly one
/// variant is active at any time and the whole presentation state is replaced
/// wholesale on every transition.
pub struct MoodMachine {
    variant: MoodVariant,
    message: String,
    user_name: Option<String>,
    deferred: Option<Deferred>,
    dots: Option<DotTicker>,
    notes: Option<NoteTicker>,
    celebration: Option<Celebration>,
    active_effect: Option<VisualEffect>,
    random: Box<dyn RandomSource>,
    notifier: Notifier<MoodEvent>,
    outbox: Vec<MoodEvent>,
}

impl fmt::Debug for MoodMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoodMachine")
            .field("variant", &self.variant)
            .field("message", &self.message)
            .field("deferred", &self.deferred)
            .field("active_effect", &self.active_effect)
            .finish_non_exhaustive()
    }
}

impl Default for MoodMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodMachine {
    /// Creates a machine resting in `Idle` with a freshly drawn idle message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_random(Box::new(ThreadRandom))
    }

    /// Creates a machine with an injected random source (seeded in tests).
    #[must_use]
    pub fn with_random(random: Box<dyn RandomSource>) -> Self {
        let mut machine = Self {
            variant: MoodVariant::Idle,
            message: String::new(),
            user_name: None,
            deferred: None,
            dots: None,
            notes: None,
            celebration: None,
            active_effect: None,
            random,
            notifier: Notifier::new(),
            outbox: Vec::new(),
        };
        machine.message =
            messages::draw_idle_message(machine.user_name.as_deref(), machine.random.as_mut());
        machine
    }

    /// Registers an observer for every subsequent [`MoodEvent`].
    pub fn subscribe(&mut self, observer: impl FnMut(&MoodEvent) + 'static) {
        self.notifier.subscribe(observer);
    }

    /// Sets the user's display name, extending the idle message pool with
    /// name-personalized lines.
    pub fn set_user_name(&mut self, name: Option<String>) {
        self.user_name = name.filter(|name| !name.is_empty());
    }

    /// The currently active variant.
    #[must_use]
    pub fn variant(&self) -> MoodVariant {
        self.variant
    }

    /// The current display message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a deferred transition is pending, exposed for tests.
    #[must_use]
    pub fn has_pending_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Transitions to `variant`, replacing the presentation state wholesale.
    ///
    /// Cancels any pending deferred transition and the dot ticker, clears the
    /// previous state's visual effect, computes the display message (explicit
    /// message, fixed per-variant label, or a random idle draw), schedules the
    /// auto-return for variants that carry one, and emits `StateChanged`.
    pub fn set_state(
        &mut self,
        variant: MoodVariant,
        message: Option<&str>,
        now: Instant,
    ) -> Vec<MoodEvent> {
        let _span = tracing::debug_span!("set_state", variant = %variant).entered();
        self.apply_state(variant, message, now);
        self.drain()
    }

    /// String entry point for callers driving the machine by variant name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::SleepBunnyError::UnknownMood`] for an unknown
    /// name; the machine is left untouched.
    pub fn set_state_by_name(
        &mut self,
        name: &str,
        message: Option<&str>,
        now: Instant,
    ) -> Result<Vec<MoodEvent>> {
        let variant: MoodVariant = name.parse()?;
        Ok(self.set_state(variant, message, now))
    }

    /// Returns to idle with a freshly drawn idle message.
    pub fn return_to_idle(&mut self, now: Instant) -> Vec<MoodEvent> {
        self.set_state(MoodVariant::Idle, None, now)
    }

    /// Runs the eating sequence for `food`.
    ///
    /// Enters `Eating` with "{food}{을|를} 먹고 있어요", starts the dot
    /// animation, and supersedes the plain auto-return with the finish-meal
    /// step: at +3000 ms the dots stop and the message becomes
    /// "{food} 잘 먹었어요! 😊" with the variant unchanged; 2000 ms later the
    /// bunny is back in `Idle` with [`messages::AFTER_MEAL_MESSAGE`]. Exactly
    /// one idle return occurs.
    pub fn play_eating_animation(&mut self, food: &str, now: Instant) -> Vec<MoodEvent> {
        let _span = tracing::debug_span!("play_eating_animation", food = %food).entered();

        let base = format!("{} 먹고 있어요", attach_particle(food, ParticlePair::Object));
        self.apply_state(MoodVariant::Eating, Some(&base), now);

        // Supersede the auto-return scheduled by apply_state. Same slot, so
        // the plain idle return can never double-fire.
        self.deferred = Some(Deferred {
            deadline: now + crate::domain::mood::EATING_DURATION,
            action: DeferredAction::FinishEating {
                food: food.to_string(),
            },
        });
        self.dots = Some(DotTicker {
            base,
            next_at: now + DOT_TICK,
            count: 0,
        });

        self.emit(MoodEvent::Reaction(Reaction::Heart));
        self.drain()
    }

    /// Enters `Reading` with "{title}{을|를} 읽고 있어요 📚" and the reading
    /// icon. No auto-return; the caller ends it with [`Self::return_to_idle`]
    /// when the reading view closes.
    pub fn play_reading_animation(&mut self, title: &str, now: Instant) -> Vec<MoodEvent> {
        let _span = tracing::debug_span!("play_reading_animation", title = %title).entered();

        let message = format!("{} 읽고 있어요 📚", attach_particle(title, ParticlePair::Object));
        self.apply_state(MoodVariant::Reading, Some(&message), now);
        self.start_effect(VisualEffect::ReadingIcon, now);
        self.drain()
    }

    /// Enters `Listening` with "{label}{을|를} 듣고 있어요 🎶" and the pulsing
    /// music-note emitter. No auto-return; ended when playback stops.
    pub fn play_listening_animation(&mut self, label: &str, now: Instant) -> Vec<MoodEvent> {
        let _span = tracing::debug_span!("play_listening_animation", label = %label).entered();

        let message = format!("{} 듣고 있어요 🎶", attach_particle(label, ParticlePair::Object));
        self.apply_state(MoodVariant::Listening, Some(&message), now);
        self.start_effect(VisualEffect::MusicNotes, now);
        self.drain()
    }

    /// Brief bounce on tap. No state change.
    pub fn play_interaction_animation(&mut self) -> Vec<MoodEvent> {
        self.emit(MoodEvent::Reaction(Reaction::Bounce));
        self.drain()
    }

    /// Fires the first of ten celebration bursts and schedules the rest at
    /// [`CELEBRATION_STEP`] intervals. No state change.
    pub fn play_celebration_effect(&mut self, now: Instant) -> Vec<MoodEvent> {
        self.emit(MoodEvent::Reaction(Reaction::CelebrationBurst { index: 0 }));
        self.celebration = Some(Celebration {
            next_at: now + CELEBRATION_STEP,
            fired: 1,
        });
        self.drain()
    }

    /// Shows the hungry message with a shake. No state change.
    pub fn play_sad_reaction(&mut self) -> Vec<MoodEvent> {
        self.message = messages::SAD_MESSAGE.to_string();
        self.emit(MoodEvent::MessageChanged {
            message: messages::SAD_MESSAGE.to_string(),
        });
        self.emit(MoodEvent::Reaction(Reaction::Shake));
        self.drain()
    }

    /// Shows a happy message with a bounce. No state change.
    pub fn play_happy_reaction(&mut self, message: Option<&str>) -> Vec<MoodEvent> {
        let message = message.unwrap_or(messages::HAPPY_MESSAGE).to_string();
        self.message = message.clone();
        self.emit(MoodEvent::MessageChanged { message });
        self.emit(MoodEvent::Reaction(Reaction::Bounce));
        self.drain()
    }

    /// Draws a random name-call reaction from the fixed pool.
    pub fn draw_name_call_reaction(&mut self) -> &'static str {
        let index = self.random.pick(messages::NAME_CALL_REACTIONS.len());
        messages::NAME_CALL_REACTIONS[index]
    }

    /// Fires all work due at `now`: the pending deferred transition first,
    /// then dot, note, and celebration ticks.
    ///
    /// The deferred slot is processed before the dot ticker so that a finished
    /// meal stops the dots before they would append another run at the same
    /// instant.
    pub fn tick(&mut self, now: Instant) -> Vec<MoodEvent> {
        // A fired action may schedule a successor that is itself already due
        // when the host ticks coarsely, hence the loop.
        loop {
            let due = match self.deferred.take() {
                Some(deferred) if deferred.deadline <= now => deferred,
                other => {
                    self.deferred = other;
                    break;
                }
            };

            match due.action {
                DeferredAction::ReturnToIdle { message } => {
                    tracing::debug!("deferred idle return firing");
                    self.apply_state(MoodVariant::Idle, message.as_deref(), now);
                }
                DeferredAction::FinishEating { food } => {
                    tracing::debug!(food = %food, "meal finished");
                    self.dots = None;
                    let message = format!("{food} 잘 먹었어요! 😊");
                    self.message = message.clone();
                    self.emit(MoodEvent::MessageChanged { message });
                    // Anchor the hold on the meal deadline, not on a late tick.
                    self.deferred = Some(Deferred {
                        deadline: due.deadline + MEAL_MESSAGE_HOLD,
                        action: DeferredAction::ReturnToIdle {
                            message: Some(messages::AFTER_MEAL_MESSAGE.to_string()),
                        },
                    });
                }
            }
        }

        let mut dot_updates = Vec::new();
        if let Some(dots) = self.dots.as_mut() {
            while dots.next_at <= now {
                dots.count = dots.count % 3 + 1;
                dot_updates.push(format!(
                    "{}{}",
                    dots.base,
                    ".".repeat(usize::from(dots.count))
                ));
                dots.next_at += DOT_TICK;
            }
        }
        for message in dot_updates {
            self.message = message.clone();
            self.emit(MoodEvent::MessageChanged { message });
        }

        let mut note_pulses = 0;
        if let Some(notes) = self.notes.as_mut() {
            while notes.next_at <= now {
                note_pulses += 1;
                notes.next_at += NOTE_PULSE;
            }
        }
        for _ in 0..note_pulses {
            self.emit(MoodEvent::NotePulse);
        }

        let mut bursts = Vec::new();
        if let Some(celebration) = self.celebration.as_mut() {
            while celebration.fired < CELEBRATION_BURSTS && celebration.next_at <= now {
                bursts.push(celebration.fired);
                celebration.fired += 1;
                celebration.next_at += CELEBRATION_STEP;
            }
            if celebration.fired >= CELEBRATION_BURSTS {
                self.celebration = None;
            }
        }
        for index in bursts {
            self.emit(MoodEvent::Reaction(Reaction::CelebrationBurst { index }));
        }

        self.drain()
    }

    /// Core transition shared by the public operations; emits into the outbox.
    fn apply_state(&mut self, variant: MoodVariant, message: Option<&str>, now: Instant) {
        self.deferred = None;
        self.dots = None;
        self.clear_effect();

        self.variant = variant;
        let display = match message {
            Some(explicit) => explicit.to_string(),
            None => match variant.default_label() {
                Some(label) => label.to_string(),
                None => {
                    messages::draw_idle_message(self.user_name.as_deref(), self.random.as_mut())
                }
            },
        };
        self.message = display.clone();

        if let Some(after) = variant.auto_return_after() {
            self.deferred = Some(Deferred {
                deadline: now + after,
                action: DeferredAction::ReturnToIdle { message: None },
            });
        }

        self.emit(MoodEvent::StateChanged {
            variant,
            message: display,
        });
    }

    fn start_effect(&mut self, effect: VisualEffect, now: Instant) {
        self.active_effect = Some(effect);
        if effect == VisualEffect::MusicNotes {
            self.notes = Some(NoteTicker {
                next_at: now + NOTE_PULSE,
            });
        }
        self.emit(MoodEvent::EffectStarted(effect));
    }

    fn clear_effect(&mut self) {
        self.notes = None;
        if let Some(effect) = self.active_effect.take() {
            self.emit(MoodEvent::EffectCleared(effect));
        }
    }

    fn emit(&mut self, event: MoodEvent) {
        self.notifier.emit(&event);
        self.outbox.push(event);
    }

    fn drain(&mut self) -> Vec<MoodEvent> {
        std::mem::take(&mut self.outbox)
    }
}
