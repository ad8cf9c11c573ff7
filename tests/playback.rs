//! Scenario tests for the playback coordinator.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sleepbunny::audio::{
    AudioBackend, BackendStartError, PlaybackCoordinator, PlaybackEvent, SilentBackend,
};
use sleepbunny::runtime::{Clock, ManualClock, SeededRandom};

/// Backend test double that records every call and always starts cleanly.
#[derive(Debug, Clone, Default)]
struct RecordingBackend {
    calls: Rc<RefCell<Vec<String>>>,
}

impl AudioBackend for RecordingBackend {
    fn start(&mut self, path: &str, volume: f32) -> Result<(), BackendStartError> {
        self.calls.borrow_mut().push(format!("start {path} @{volume:.2}"));
        Ok(())
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push("stop".to_string());
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push("pause".to_string());
    }

    fn resume(&mut self) {
        self.calls.borrow_mut().push("resume".to_string());
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.borrow_mut().push(format!("volume {volume:.2}"));
    }
}

fn coordinator_with(backend: impl AudioBackend + 'static) -> PlaybackCoordinator {
    PlaybackCoordinator::with_parts(Box::new(backend), Box::new(SeededRandom::new(3)))
}

fn start_now(
    coordinator: &mut PlaybackCoordinator,
    clock: &ManualClock,
    sound_id: &str,
) -> Vec<PlaybackEvent> {
    let mut events = coordinator
        .play(sound_id, clock.now())
        .unwrap_or_else(|e| panic!("play {sound_id} failed: {e}"));
    clock.advance(Duration::from_millis(500));
    events.extend(coordinator.tick(clock.now()));
    events
}

#[test]
fn start_is_deferred_by_the_presentation_delay() {
    let clock = ManualClock::new();
    let mut coordinator = coordinator_with(RecordingBackend::default());

    coordinator.play("rain", clock.now()).unwrap();
    assert!(coordinator.session().is_none());

    clock.advance(Duration::from_millis(499));
    assert!(coordinator.tick(clock.now()).is_empty());
    assert!(coordinator.session().is_none());

    clock.advance(Duration::from_millis(1));
    let events = coordinator.tick(clock.now());
    assert!(matches!(
        events.as_slice(),
        [PlaybackEvent::Started { simulated: false, .. }]
    ));
    assert!(coordinator.is_playing());
}

#[test]
fn sound_without_resources_plays_simulated() {
    let clock = ManualClock::new();
    let mut coordinator = coordinator_with(RecordingBackend::default());

    let events = start_now(&mut coordinator, &clock, "ocean-waves");

    assert!(matches!(
        events.as_slice(),
        [
            PlaybackEvent::Started { simulated: true, .. },
            PlaybackEvent::SimulatedNotice { .. },
        ]
    ));
    let session = coordinator.session().unwrap();
    assert!(session.simulated());
    assert_eq!(session.sound_id, "ocean-waves");
}

#[test]
fn backend_start_failure_degrades_to_simulated() {
    let clock = ManualClock::new();
    // SilentBackend refuses every start.
    let mut coordinator = coordinator_with(SilentBackend);

    let events = start_now(&mut coordinator, &clock, "rain");

    assert!(matches!(
        events.first(),
        Some(PlaybackEvent::Started { simulated: true, .. })
    ));
    assert!(coordinator.session().unwrap().simulated());
    // Simulated sessions still pause and stop normally.
    assert!(coordinator.pause());
    assert!(!coordinator.is_playing());
    assert!(coordinator.resume());
    assert!(coordinator.is_playing());
}

#[test]
fn replacement_stops_the_old_session_first() {
    let clock = ManualClock::new();
    let backend = RecordingBackend::default();
    let calls = Rc::clone(&backend.calls);
    let mut coordinator = coordinator_with(backend);

    start_now(&mut coordinator, &clock, "rain");
    let events = start_now(&mut coordinator, &clock, "forest");

    assert!(matches!(
        events.as_slice(),
        [
            PlaybackEvent::Stopped,
            PlaybackEvent::Started { simulated: false, .. },
        ]
    ));
    assert_eq!(coordinator.session().unwrap().sound_id, "forest");
    assert!(calls.borrow().iter().any(|c| c == "stop"));
}

#[test]
fn replacing_a_pending_start_keeps_only_the_newest() {
    let clock = ManualClock::new();
    let mut coordinator = coordinator_with(RecordingBackend::default());

    coordinator.play("rain", clock.now()).unwrap();
    clock.advance(Duration::from_millis(200));
    let events = coordinator.play("forest", clock.now()).unwrap();
    // The torn-down pending start counts as activity.
    assert_eq!(events, vec![PlaybackEvent::Stopped]);

    clock.advance(Duration::from_millis(500));
    let events = coordinator.tick(clock.now());
    let started: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::Started { sound_id, .. } => Some(sound_id.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec!["forest".to_string()]);
}

#[test]
fn unknown_sound_is_a_complete_no_op() {
    let clock = ManualClock::new();
    let mut coordinator = coordinator_with(RecordingBackend::default());

    start_now(&mut coordinator, &clock, "rain");
    let result = coordinator.play("thunder", clock.now());

    assert!(result.is_err());
    assert_eq!(coordinator.session().unwrap().sound_id, "rain");
    assert!(coordinator.is_playing());
}

#[test]
fn timer_expiry_stops_playback_and_reports() {
    let clock = ManualClock::new();
    let mut coordinator = coordinator_with(RecordingBackend::default());

    start_now(&mut coordinator, &clock, "white-noise");
    coordinator.set_timer(1, clock.now());
    assert!(coordinator.has_countdown());

    clock.advance(Duration::from_secs(59));
    assert!(coordinator.tick(clock.now()).is_empty());

    clock.advance(Duration::from_secs(1));
    let events = coordinator.tick(clock.now());
    assert_eq!(
        events,
        vec![PlaybackEvent::Stopped, PlaybackEvent::TimerFinished]
    );
    assert!(coordinator.session().is_none());
    assert!(!coordinator.has_countdown());
}

#[test]
fn zero_minutes_clears_the_timer() {
    let clock = ManualClock::new();
    let mut coordinator = coordinator_with(RecordingBackend::default());

    start_now(&mut coordinator, &clock, "rain");
    coordinator.set_timer(1, clock.now());
    coordinator.set_timer(0, clock.now());
    assert!(!coordinator.has_countdown());

    clock.advance(Duration::from_secs(120));
    let events = coordinator.tick(clock.now());
    assert!(events.is_empty());
    assert!(coordinator.is_playing());
}

#[test]
fn stop_is_idempotent() {
    let clock = ManualClock::new();
    let mut coordinator = coordinator_with(RecordingBackend::default());

    start_now(&mut coordinator, &clock, "rain");
    assert_eq!(coordinator.stop(), vec![PlaybackEvent::Stopped]);
    assert!(coordinator.stop().is_empty());
    assert!(!coordinator.pause());
    assert!(!coordinator.resume());
}

#[test]
fn stop_disarms_the_timer() {
    let clock = ManualClock::new();
    let mut coordinator = coordinator_with(RecordingBackend::default());

    start_now(&mut coordinator, &clock, "rain");
    coordinator.set_timer(5, clock.now());
    coordinator.stop();
    assert!(!coordinator.has_countdown());

    clock.advance(Duration::from_secs(600));
    assert!(coordinator.tick(clock.now()).is_empty());
}

#[test]
fn volume_is_clamped_and_applied() {
    let clock = ManualClock::new();
    let backend = RecordingBackend::default();
    let calls = Rc::clone(&backend.calls);
    let mut coordinator = coordinator_with(backend);

    assert_eq!(coordinator.set_volume(1.4), 1.0);
    assert_eq!(coordinator.set_volume(-0.2), 0.0);
    assert_eq!(coordinator.set_volume(0.5), 0.5);

    start_now(&mut coordinator, &clock, "rain");
    coordinator.set_volume(0.8);
    assert!(calls.borrow().iter().any(|c| c == "volume 0.80"));
}

#[test]
fn fade_in_ramps_up_to_the_default_volume() {
    let clock = ManualClock::new();
    let backend = RecordingBackend::default();
    let calls = Rc::clone(&backend.calls);
    let mut coordinator = coordinator_with(backend);

    coordinator.set_volume(0.6);
    start_now(&mut coordinator, &clock, "forest");
    coordinator.fade_in(Duration::from_secs(1), clock.now());
    // The ramp starts from silence.
    assert!(calls.borrow().iter().any(|c| c == "volume 0.00"));

    clock.advance(Duration::from_secs(1));
    coordinator.tick(clock.now());

    assert!(coordinator.is_playing());
    assert_eq!(calls.borrow().last().map(String::as_str), Some("volume 0.60"));
}

#[test]
fn fade_out_ramps_down_then_stops() {
    let clock = ManualClock::new();
    let backend = RecordingBackend::default();
    let calls = Rc::clone(&backend.calls);
    let mut coordinator = coordinator_with(backend);

    start_now(&mut coordinator, &clock, "rain");
    coordinator.fade_out(Duration::from_secs(1), clock.now());

    clock.advance(Duration::from_millis(500));
    coordinator.tick(clock.now());
    assert!(coordinator.session().is_some());

    clock.advance(Duration::from_millis(500));
    let events = coordinator.tick(clock.now());
    assert!(events.contains(&PlaybackEvent::Stopped));
    assert!(coordinator.session().is_none());

    // The ramp touched the backend volume and ended at silence.
    let calls = calls.borrow();
    assert!(calls.iter().any(|c| c.starts_with("volume")));
    assert!(calls.iter().any(|c| c == "volume 0.00"));
}
