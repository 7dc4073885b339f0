//! The focus session state machine.
//!
//! All session state lives in [`SessionState`] and only changes through
//! [`Session::handle`], which maps `(state, event)` to the next state plus at
//! most one [`Action`] for the event source. Ticks are self-rescheduling: a
//! running session asks for exactly one more tick each time it consumes one,
//! so pausing simply stops asking.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::keymap::KeyBindings;
use crate::text_input::TextInput;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const DEFAULT_DURATION: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    NamingInput,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Tick,
    KeyPress(KeyEvent),
    Quit,
}

/// What the event source should arrange next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Deliver exactly one `Event::Tick` after the given delay, replacing any
    /// tick that is still pending
    ScheduleTick(Duration),
    Terminate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub task_name: String,
    pub remaining: Duration,
    /// length the countdown started from; only used for progress display
    pub duration: Duration,
    pub phase: Phase,
    pub input: TextInput,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl SessionState {
    pub fn new(duration: Duration) -> Self {
        Self {
            task_name: String::new(),
            remaining: duration,
            duration,
            phase: Phase::NamingInput,
            input: TextInput::new(),
        }
    }

    /// Pre-fills the name field. The session still waits for Enter.
    pub fn with_task_hint(mut self, name: &str) -> Self {
        self.input = self.input.with_value(name);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn elapsed(&self) -> Duration {
        self.duration.saturating_sub(self.remaining)
    }

    /// 0.0 ..= 1.0 share of the countdown already spent
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.is_terminal() { 1.0 } else { 0.0 };
        }
        (self.elapsed().as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Interprets events against a [`SessionState`]
#[derive(Debug, Clone, Default)]
pub struct Session {
    bindings: KeyBindings,
}

impl Session {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn handle(&self, state: SessionState, event: Event) -> (SessionState, Option<Action>) {
        // quit wins in every phase, before any phase-specific reading of the key
        let quit = match &event {
            Event::Quit => true,
            Event::KeyPress(key) => self.bindings.is_quit(key),
            Event::Tick => false,
        };
        if quit {
            return (state, Some(Action::Terminate));
        }

        if let Event::KeyPress(key) = &event {
            if key.kind == KeyEventKind::Release {
                return (state, None);
            }
        }

        match state.phase {
            Phase::NamingInput => self.on_naming(state, event),
            Phase::Running => self.on_running(state, event),
            Phase::Paused => self.on_paused(state, event),
            Phase::Finished => on_finished(state, event),
        }
    }

    fn on_naming(&self, mut state: SessionState, event: Event) -> (SessionState, Option<Action>) {
        let key = match event {
            Event::KeyPress(key) => key,
            // no timer runs before the session starts
            _ => return (state, None),
        };

        if key.code == KeyCode::Enter {
            return match state.input.submission() {
                Some(name) => {
                    state.task_name = name;
                    state.input.clear();
                    state.phase = Phase::Running;
                    (state, Some(Action::ScheduleTick(TICK_PERIOD)))
                }
                None => (state, None),
            };
        }

        state.input.handle_key(&key);
        (state, None)
    }

    fn on_running(&self, mut state: SessionState, event: Event) -> (SessionState, Option<Action>) {
        match event {
            Event::Tick => {
                state.remaining = state.remaining.saturating_sub(TICK_PERIOD);
                if state.remaining.is_zero() {
                    state.phase = Phase::Finished;
                    (state, Some(Action::Terminate))
                } else {
                    (state, Some(Action::ScheduleTick(TICK_PERIOD)))
                }
            }
            Event::KeyPress(key) if self.bindings.is_pause(&key) => {
                state.phase = Phase::Paused;
                (state, None)
            }
            _ => (state, None),
        }
    }

    fn on_paused(&self, mut state: SessionState, event: Event) -> (SessionState, Option<Action>) {
        match event {
            // a tick that was already pending when the pause landed
            Event::Tick => (state, None),
            Event::KeyPress(key) if self.bindings.is_pause(&key) => {
                state.phase = Phase::Running;
                // first decrement comes a full period after resuming
                (state, Some(Action::ScheduleTick(TICK_PERIOD)))
            }
            _ => (state, None),
        }
    }
}

fn on_finished(state: SessionState, event: Event) -> (SessionState, Option<Action>) {
    match event {
        Event::KeyPress(_) => (state, Some(Action::Terminate)),
        _ => (state, None),
    }
}
