use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use focus_timer::session::{Action, Event, Phase, Session, SessionState, TICK_PERIOD};
use focus_timer::text_input::TextInput;
use proptest::prelude::*;

fn phase() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::NamingInput),
        Just(Phase::Running),
        Just(Phase::Paused),
        Just(Phase::Finished),
    ]
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Tick),
        Just(Event::Quit),
        Just(KeyCode::Enter).prop_map(press),
        Just(KeyCode::Esc).prop_map(press),
        Just(KeyCode::Backspace).prop_map(press),
        Just(KeyCode::Left).prop_map(press),
        proptest::char::range('a', 'z').prop_map(|c| press(KeyCode::Char(c))),
    ]
}

fn press(code: KeyCode) -> Event {
    Event::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
}

fn state() -> impl Strategy<Value = SessionState> {
    (phase(), 0u64..5_000, "[a-z ]{0,12}").prop_map(|(phase, secs, text)| {
        let named = phase != Phase::NamingInput;
        SessionState {
            task_name: if named { "task".into() } else { String::new() },
            remaining: Duration::from_secs(secs),
            duration: Duration::from_secs(5_000),
            phase,
            input: if named {
                TextInput::new()
            } else {
                TextInput::new().with_value(&text)
            },
        }
    })
}

proptest! {
    #[test]
    fn handle_is_deterministic(s in state(), e in event()) {
        let session = Session::default();
        let first = session.handle(s.clone(), e.clone());
        let second = session.handle(s, e);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn remaining_only_moves_while_running(s in state(), e in event()) {
        let session = Session::default();
        let before = s.clone();
        let (after, _) = session.handle(s, e);

        prop_assert!(after.remaining <= before.remaining);
        if before.phase != Phase::Running {
            prop_assert_eq!(after.remaining, before.remaining);
        }
    }

    #[test]
    fn task_name_is_set_outside_naming(s in state(), events in prop::collection::vec(event(), 0..40)) {
        let session = Session::default();
        let mut s = s;
        for e in events {
            let (next, _) = session.handle(s, e);
            s = next;
            if s.phase != Phase::NamingInput {
                prop_assert!(!s.task_name.is_empty());
            }
        }
    }

    #[test]
    fn quit_always_terminates(s in state()) {
        let session = Session::default();
        let (_, action) = session.handle(s, Event::Quit);
        prop_assert_eq!(action, Some(Action::Terminate));
    }

    #[test]
    fn t_ticks_finish_a_t_second_session(secs in 1u64..600) {
        let session = Session::default();
        let mut s = SessionState::new(Duration::from_secs(secs)).with_task_hint("focus");
        let (next, action) = session.handle(s, press(KeyCode::Enter));
        s = next;
        prop_assert_eq!(action, Some(Action::ScheduleTick(TICK_PERIOD)));

        for i in 1..=secs {
            let (next, action) = session.handle(s, Event::Tick);
            s = next;
            if i < secs {
                prop_assert_eq!(s.phase, Phase::Running);
                prop_assert_eq!(action, Some(Action::ScheduleTick(TICK_PERIOD)));
            } else {
                prop_assert_eq!(action, Some(Action::Terminate));
            }
        }
        prop_assert_eq!(s.phase, Phase::Finished);
        prop_assert_eq!(s.remaining, Duration::ZERO);
    }

    #[test]
    fn pause_resume_pairs_never_drift(secs in 1u64..600, pairs in 1usize..20) {
        let session = Session::default();
        let mut s = SessionState::new(Duration::from_secs(secs)).with_task_hint("focus");
        s = session.handle(s, press(KeyCode::Enter)).0;
        let before = s.remaining;

        for _ in 0..pairs {
            s = session.handle(s, press(KeyCode::Char('s'))).0;
            prop_assert_eq!(s.phase, Phase::Paused);
            s = session.handle(s, Event::Tick).0;
            s = session.handle(s, press(KeyCode::Char('s'))).0;
            prop_assert_eq!(s.phase, Phase::Running);
        }
        prop_assert_eq!(s.remaining, before);
    }
}
