//! Scenario tests for the mood state machine.
//!
//! Time is driven by [`ManualClock`] and randomness by [`SeededRandom`], so
//! every timeline here is fully deterministic.

use std::time::Duration;

use sleepbunny::domain::mood::MoodVariant;
use sleepbunny::mood::{messages, MoodEvent, MoodMachine, Reaction};
use sleepbunny::runtime::{Clock, ManualClock, SeededRandom};

fn machine() -> MoodMachine {
    MoodMachine::with_random(Box::new(SeededRandom::new(7)))
}

fn messages_of(events: &[MoodEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            MoodEvent::StateChanged { message, .. } | MoodEvent::MessageChanged { message } => {
                Some(message.clone())
            }
            _ => None,
        })
        .collect()
}

fn idle_returns(events: &[MoodEvent]) -> usize {
    events
        .iter()
        .filter(|e| {
            matches!(
                e,
                MoodEvent::StateChanged {
                    variant: MoodVariant::Idle,
                    ..
                }
            )
        })
        .count()
}

#[test]
fn superseded_auto_return_never_fires() {
    let clock = ManualClock::new();
    let mut machine = machine();

    machine.set_state(MoodVariant::Eating, None, clock.now());
    assert_eq!(machine.variant(), MoodVariant::Eating);
    assert!(machine.has_pending_deferred());

    // Switch moods before the 3-second auto-return comes due.
    clock.advance(Duration::from_millis(1000));
    machine.set_state(MoodVariant::Listening, None, clock.now());

    // Walk well past the original deadline; the stale return must not fire.
    let mut events = Vec::new();
    for _ in 0..100 {
        clock.advance(Duration::from_millis(100));
        events.extend(machine.tick(clock.now()));
    }

    assert_eq!(machine.variant(), MoodVariant::Listening);
    assert_eq!(idle_returns(&events), 0);
}

#[test]
fn eating_timeline_with_fine_ticks() {
    let clock = ManualClock::new();
    let mut machine = machine();

    let events = machine.play_eating_animation("당근", clock.now());
    assert_eq!(machine.variant(), MoodVariant::Eating);
    assert_eq!(machine.message(), "당근을 먹고 있어요");
    assert!(events
        .iter()
        .any(|e| matches!(e, MoodEvent::Reaction(Reaction::Heart))));

    // Dots cycle 1-3 every 500 ms until the meal finishes at 3000 ms.
    let mut seen = Vec::new();
    for _ in 0..10 {
        clock.advance(Duration::from_millis(500));
        seen.extend(messages_of(&machine.tick(clock.now())));
    }

    assert_eq!(seen[0], "당근을 먹고 있어요.");
    assert_eq!(seen[1], "당근을 먹고 있어요..");
    assert_eq!(seen[2], "당근을 먹고 있어요...");
    assert_eq!(seen[3], "당근을 먹고 있어요.");
    assert_eq!(seen[4], "당근을 먹고 있어요..");
    // 3000 ms: the completion message replaces the dots.
    assert_eq!(seen[5], "당근 잘 먹었어요! 😊");
    // 5000 ms: back to idle, sleeping.
    assert_eq!(seen[6], messages::AFTER_MEAL_MESSAGE);
    assert_eq!(seen.len(), 7);
    assert_eq!(machine.variant(), MoodVariant::Idle);
    assert!(!machine.has_pending_deferred());
}

#[test]
fn eating_resolves_in_one_coarse_tick() {
    let clock = ManualClock::new();
    let mut machine = machine();

    machine.play_eating_animation("사과", clock.now());

    // A single late tick past both deadlines runs the whole chain.
    clock.advance(Duration::from_millis(5000));
    let events = machine.tick(clock.now());

    let seen = messages_of(&events);
    assert_eq!(
        seen,
        vec![
            "사과 잘 먹었어요! 😊".to_string(),
            messages::AFTER_MEAL_MESSAGE.to_string(),
        ]
    );
    assert_eq!(idle_returns(&events), 1);
    assert_eq!(machine.variant(), MoodVariant::Idle);
}

#[test]
fn eating_message_attaches_the_right_particle() {
    let clock = ManualClock::new();
    let mut machine = machine();

    machine.play_eating_animation("당근", clock.now());
    assert_eq!(machine.message(), "당근을 먹고 있어요");

    machine.play_eating_animation("사과", clock.now());
    assert_eq!(machine.message(), "사과를 먹고 있어요");
}

#[test]
fn refeeding_restarts_the_sequence_with_one_idle_return() {
    let clock = ManualClock::new();
    let mut machine = machine();

    machine.play_eating_animation("당근", clock.now());
    clock.advance(Duration::from_millis(2000));
    machine.tick(clock.now());

    // Feed again mid-meal; the first meal's deadlines are superseded.
    machine.play_eating_animation("상추", clock.now());

    let mut events = Vec::new();
    for _ in 0..120 {
        clock.advance(Duration::from_millis(100));
        events.extend(machine.tick(clock.now()));
    }

    assert_eq!(idle_returns(&events), 1);
    let seen = messages_of(&events);
    assert!(seen.contains(&"상추 잘 먹었어요! 😊".to_string()));
    assert!(!seen.iter().any(|m| m.starts_with("당근 잘")));
}

#[test]
fn listening_pulses_notes_until_the_mood_changes() {
    let clock = ManualClock::new();
    let mut machine = machine();

    let events = machine.play_listening_animation("빗소리", clock.now());
    assert_eq!(machine.variant(), MoodVariant::Listening);
    assert_eq!(machine.message(), "빗소리를 듣고 있어요 🎶");
    assert!(events
        .iter()
        .any(|e| matches!(e, MoodEvent::EffectStarted(_))));

    clock.advance(Duration::from_millis(3000));
    let pulses = machine
        .tick(clock.now())
        .iter()
        .filter(|e| matches!(e, MoodEvent::NotePulse))
        .count();
    assert_eq!(pulses, 3);

    machine.return_to_idle(clock.now());
    clock.advance(Duration::from_millis(3000));
    let pulses = machine
        .tick(clock.now())
        .iter()
        .filter(|e| matches!(e, MoodEvent::NotePulse))
        .count();
    assert_eq!(pulses, 0);
}

#[test]
fn celebration_fires_exactly_ten_bursts() {
    let clock = ManualClock::new();
    let mut machine = machine();

    let mut bursts = Vec::new();
    let collect = |events: &[MoodEvent], bursts: &mut Vec<u8>| {
        for event in events {
            if let MoodEvent::Reaction(Reaction::CelebrationBurst { index }) = event {
                bursts.push(*index);
            }
        }
    };

    collect(&machine.play_celebration_effect(clock.now()), &mut bursts);
    for _ in 0..30 {
        clock.advance(Duration::from_millis(100));
        collect(&machine.tick(clock.now()), &mut bursts);
    }

    assert_eq!(bursts, (0..10).collect::<Vec<u8>>());
}

#[test]
fn sad_and_happy_reactions_change_the_message_but_not_the_mood() {
    let mut machine = machine();

    let events = machine.play_sad_reaction();
    assert_eq!(machine.variant(), MoodVariant::Idle);
    assert_eq!(machine.message(), "배고파요... 😢");
    assert!(events
        .iter()
        .any(|e| matches!(e, MoodEvent::Reaction(Reaction::Shake))));

    let events = machine.play_happy_reaction(None);
    assert_eq!(machine.variant(), MoodVariant::Idle);
    assert_eq!(machine.message(), messages::HAPPY_MESSAGE);
    assert!(events
        .iter()
        .any(|e| matches!(e, MoodEvent::Reaction(Reaction::Bounce))));
}

#[test]
fn observers_see_the_same_events_the_operation_returns() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let clock = ManualClock::new();
    let mut machine = machine();

    let observed: Rc<RefCell<Vec<MoodEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);
    machine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let returned = machine.play_eating_animation("당근", clock.now());
    assert_eq!(*observed.borrow(), returned);
}

#[test]
fn unknown_mood_name_is_rejected_without_side_effects() {
    let clock = ManualClock::new();
    let mut machine = machine();
    let before = machine.message().to_string();

    let result = machine.set_state_by_name("angry", None, clock.now());
    assert!(result.is_err());
    assert_eq!(machine.variant(), MoodVariant::Idle);
    assert_eq!(machine.message(), before);
}
