//! The ambient-sound playback coordinator.
//!
//! [`PlaybackCoordinator`] owns at most one playback session at a time.
//! Starting a sound unconditionally tears down whatever was live before
//! (stop-before-start); the actual start is deferred by a fixed presentation
//! delay so it lands after the host's modal-close animation. A sound without
//! usable resources, or one whose backend start fails, plays in *simulated*
//! mode: the session and its notifications exist, there is just no audio
//! backing.
//!
//! Like the mood machine, the coordinator never reads a clock; operations take
//! `now` and due work (the deferred start, the countdown timer, fade ramps)
//! fires in [`PlaybackCoordinator::tick`]. Events are delivered to registered
//! observers and returned from the producing operation.

use std::fmt;
use std::time::{Duration, Instant};

use crate::audio::backend::{AudioBackend, SilentBackend};
use crate::audio::catalog::SoundCatalog;
use crate::domain::Result;
use crate::runtime::{Notifier, RandomSource, ThreadRandom};

/// Presentation delay between the play command and the actual start. Purely
/// UI sequencing, not an audio-engine requirement.
pub const START_DELAY: Duration = Duration::from_millis(500);

/// Number of volume steps in a fade ramp.
pub const FADE_STEPS: u32 = 20;

/// Notification emitted by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A session started (real or simulated).
    Started {
        /// Catalog id of the sound.
        sound_id: String,
        /// Display name of the sound.
        name: String,
        /// Whether the session has no real audio backing.
        simulated: bool,
    },
    /// Transient acknowledgment shown when a simulated session starts.
    SimulatedNotice {
        /// Display name of the sound.
        name: String,
    },
    /// The session ended (explicit stop, replacement, or timer expiry).
    Stopped,
    /// The countdown timer expired; follows the `Stopped` it caused.
    TimerFinished,
}

/// The single live playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    /// Catalog id of the playing sound.
    pub sound_id: String,
    /// The chosen resource path; `None` for simulated sessions.
    pub resource: Option<String>,
    /// Whether the session is paused.
    pub paused: bool,
}

impl PlaybackSession {
    /// Whether this session has no real audio backing.
    #[must_use]
    pub fn simulated(&self) -> bool {
        self.resource.is_none()
    }
}

#[derive(Debug, Clone)]
struct PendingStart {
    deadline: Instant,
    sound_id: String,
}

#[derive(Debug, Clone, Copy)]
struct Countdown {
    deadline: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Fade {
    next_at: Instant,
    step_time: Duration,
    step: u32,
    from: f32,
    to: f32,
    stop_on_complete: bool,
}

/// Coordinator for ambient-sound playback.
pub struct PlaybackCoordinator {
    catalog: SoundCatalog,
    backend: Box<dyn AudioBackend>,
    session: Option<PlaybackSession>,
    pending_start: Option<PendingStart>,
    countdown: Option<Countdown>,
    fade: Option<Fade>,
    volume: f32,
    random: Box<dyn RandomSource>,
    notifier: Notifier<PlaybackEvent>,
    outbox: Vec<PlaybackEvent>,
}

impl fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("session", &self.session)
            .field("volume", &self.volume)
            .field("pending_start", &self.pending_start)
            .field("countdown", &self.countdown)
            .finish_non_exhaustive()
    }
}

impl Default for PlaybackCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackCoordinator {
    /// Default volume before a persisted setting is applied.
    pub const DEFAULT_VOLUME: f32 = 0.7;

    /// Creates a stopped coordinator over the silent backend.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Box::new(SilentBackend), Box::new(ThreadRandom))
    }

    /// Creates a stopped coordinator with an injected backend and random
    /// source.
    #[must_use]
    pub fn with_parts(backend: Box<dyn AudioBackend>, random: Box<dyn RandomSource>) -> Self {
        Self {
            catalog: SoundCatalog,
            backend,
            session: None,
            pending_start: None,
            countdown: None,
            fade: None,
            volume: Self::DEFAULT_VOLUME,
            random,
            notifier: Notifier::new(),
            outbox: Vec::new(),
        }
    }

    /// Registers an observer for every subsequent [`PlaybackEvent`].
    pub fn subscribe(&mut self, observer: impl FnMut(&PlaybackEvent) + 'static) {
        self.notifier.subscribe(observer);
    }

    /// The sound catalog this coordinator resolves ids against.
    #[must_use]
    pub fn catalog(&self) -> &SoundCatalog {
        &self.catalog
    }

    /// The live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Whether a session is live and not paused.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|session| !session.paused)
    }

    /// The current volume default, in `[0, 1]`.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Whether a countdown timer is armed, exposed for tests.
    #[must_use]
    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Starts `sound_id`, tearing down any current session first.
    ///
    /// The start itself lands after [`START_DELAY`], in [`Self::tick`]; the
    /// resource pick, the simulated-mode decision, and the `Started` event all
    /// happen there.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::SleepBunnyError::UnknownSound`] for an id the
    /// catalog does not know. Nothing is torn down in that case.
    pub fn play(&mut self, sound_id: &str, now: Instant) -> Result<Vec<PlaybackEvent>> {
        let _span = tracing::debug_span!("play", sound_id = %sound_id).entered();

        // Validate before teardown so an unknown id is a true no-op.
        self.catalog.get(sound_id)?;

        self.teardown();
        self.pending_start = Some(PendingStart {
            deadline: now + START_DELAY,
            sound_id: sound_id.to_string(),
        });

        tracing::debug!("start scheduled");
        Ok(self.drain())
    }

    /// Pauses the live session. Returns `false` when none exists.
    pub fn pause(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.paused {
            session.paused = true;
            if session.resource.is_some() {
                self.backend.pause();
            }
        }
        true
    }

    /// Resumes a paused session. Returns `false` when none exists.
    pub fn resume(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.paused {
            session.paused = false;
            if session.resource.is_some() {
                self.backend.resume();
            }
        }
        true
    }

    /// Stops playback, releases the audio resource, and clears the countdown,
    /// any fade, and any pending start. Idempotent: emits `Stopped` only when
    /// something was live or pending.
    pub fn stop(&mut self) -> Vec<PlaybackEvent> {
        let _span = tracing::debug_span!("stop").entered();
        self.teardown();
        self.drain()
    }

    /// Arms the countdown timer, replacing any existing one. `minutes == 0`
    /// clears the timer without scheduling a new one. On expiry the session is
    /// stopped and `TimerFinished` is emitted.
    pub fn set_timer(&mut self, minutes: u32, now: Instant) {
        self.countdown = None;
        if minutes == 0 {
            tracing::debug!("countdown cleared");
            return;
        }
        self.countdown = Some(Countdown {
            deadline: now + Duration::from_secs(u64::from(minutes) * 60),
        });
        tracing::debug!(minutes, "countdown armed");
    }

    /// Clamps `volume` to `[0, 1]`, applies it to the live session, and keeps
    /// it as the default for future sessions. Returns the clamped value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = volume.clamp(0.0, 1.0);
        if self.session.as_ref().is_some_and(|s| s.resource.is_some()) {
            self.backend.set_volume(self.volume);
        }
        self.volume
    }

    /// Ramps the session volume from silence up to the current default over
    /// `duration` in [`FADE_STEPS`] linear steps. No-op without a session.
    pub fn fade_in(&mut self, duration: Duration, now: Instant) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.resource.is_some() {
            self.backend.set_volume(0.0);
        }
        self.fade = Some(Self::fade_ramp(duration, now, 0.0, self.volume, false));
    }

    /// Ramps the session volume down to silence over `duration` and stops
    /// playback at completion. No-op without a session.
    pub fn fade_out(&mut self, duration: Duration, now: Instant) {
        if self.session.is_none() {
            return;
        }
        self.fade = Some(Self::fade_ramp(duration, now, self.volume, 0.0, true));
    }

    /// Fires all work due at `now`: the deferred start, the countdown, fade
    /// steps.
    pub fn tick(&mut self, now: Instant) -> Vec<PlaybackEvent> {
        if let Some(pending) = self.pending_start.take() {
            if pending.deadline <= now {
                self.start_session(&pending.sound_id);
            } else {
                self.pending_start = Some(pending);
            }
        }

        if let Some(countdown) = self.countdown {
            if countdown.deadline <= now {
                tracing::debug!("countdown expired");
                self.teardown();
                self.emit(PlaybackEvent::TimerFinished);
            }
        }

        self.run_fade(now);

        self.drain()
    }

    /// Performs the actual (deferred) start for `sound_id`.
    fn start_session(&mut self, sound_id: &str) {
        let Ok(sound) = self.catalog.get(sound_id) else {
            // The id was validated in play(); a miss here means the catalog
            // changed under us, which a fixed catalog cannot do.
            return;
        };

        let resource = if sound.files.is_empty() {
            None
        } else {
            let pick = self.random.pick(sound.files.len());
            let path = sound.files[pick];
            match self.backend.start(path, self.volume) {
                Ok(()) => Some(path.to_string()),
                Err(error) => {
                    tracing::warn!(%error, "backend start failed, simulating playback");
                    None
                }
            }
        };

        let simulated = resource.is_none();
        self.session = Some(PlaybackSession {
            sound_id: sound_id.to_string(),
            resource,
            paused: false,
        });

        tracing::debug!(sound = %sound.name, simulated, "playback started");
        self.emit(PlaybackEvent::Started {
            sound_id: sound_id.to_string(),
            name: sound.name.to_string(),
            simulated,
        });
        if simulated {
            self.emit(PlaybackEvent::SimulatedNotice {
                name: sound.name.to_string(),
            });
        }
    }

    fn run_fade(&mut self, now: Instant) {
        let mut finished = false;
        let mut volumes = Vec::new();

        if let Some(fade) = self.fade.as_mut() {
            while fade.step < FADE_STEPS && fade.next_at <= now {
                fade.step += 1;
                #[allow(clippy::cast_precision_loss)]
                let t = fade.step as f32 / FADE_STEPS as f32;
                volumes.push(fade.from + (fade.to - fade.from) * t);
                fade.next_at += fade.step_time;
            }
            if fade.step >= FADE_STEPS {
                finished = true;
            }
        }

        let live = self.session.as_ref().is_some_and(|s| s.resource.is_some());
        if live {
            for volume in volumes {
                self.backend.set_volume(volume);
            }
        }

        if finished {
            if let Some(fade) = self.fade.take() {
                if fade.stop_on_complete {
                    self.teardown();
                } else if live {
                    self.backend.set_volume(fade.to);
                }
            }
        }
    }

    /// Synchronous teardown shared by stop, replacement, and timer expiry.
    fn teardown(&mut self) {
        let had_activity = self.session.is_some() || self.pending_start.is_some();

        if let Some(session) = self.session.take() {
            if session.resource.is_some() {
                self.backend.stop();
            }
        }
        self.pending_start = None;
        self.countdown = None;
        self.fade = None;

        if had_activity {
            self.emit(PlaybackEvent::Stopped);
        }
    }

    fn fade_ramp(
        duration: Duration,
        now: Instant,
        from: f32,
        to: f32,
        stop_on_complete: bool,
    ) -> Fade {
        let step_time = duration / FADE_STEPS;
        Fade {
            next_at: now + step_time,
            step_time,
            step: 0,
            from,
            to,
            stop_on_complete,
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.notifier.emit(&event);
        self.outbox.push(event);
    }

    fn drain(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.outbox)
    }
}
