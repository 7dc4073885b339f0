use std::io;
use std::time::{Duration, Instant};

use ratatui::{backend::Backend, Frame, Terminal};

use crate::{
    error::{AppError, Result},
    keymap::KeyBindings,
    runtime::{EventSource, Flow, Runner, Step},
    session::{Action, Event, Phase, Session, SessionState},
    text_input::CursorBlink,
    ui::View,
    util::format_remaining,
};

/// Owns the single session state and the machine that advances it
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: SessionState,
    blink: CursorBlink,
    blink_epoch: Instant,
}

impl App {
    pub fn new(session: Session, state: SessionState) -> Self {
        Self {
            session,
            state,
            blink: CursorBlink::default(),
            blink_epoch: Instant::now(),
        }
    }

    pub fn with_blink(mut self, blink: CursorBlink) -> Self {
        self.blink = blink;
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        self.session.bindings()
    }

    /// Feeds one event through the state machine
    pub fn dispatch(&mut self, event: Event) -> Option<Action> {
        if matches!(event, Event::KeyPress(_)) {
            // typing keeps the cursor solid
            self.blink_epoch = Instant::now();
        }

        let before = self.state.phase;
        let state = std::mem::take(&mut self.state);
        let (state, action) = self.session.handle(state, event);

        if state.phase != before {
            tracing::info!(
                from = %before,
                to = %state.phase,
                task = %state.task_name,
                remaining = %format_remaining(state.remaining),
                "phase changed"
            );
        }
        if action == Some(Action::Terminate) {
            tracing::info!(
                phase = %state.phase,
                remaining = %format_remaining(state.remaining),
                "session terminated"
            );
        }

        self.state = state;
        action
    }

    pub fn cursor_visible(&self) -> bool {
        self.blink.visible(self.blink_epoch.elapsed())
    }

    /// Only the name field animates; a countdown redraws on its own ticks
    pub fn redraw_interval(&self) -> Option<Duration> {
        match self.state.phase {
            Phase::NamingInput if !self.blink.interval().is_zero() => Some(self.blink.interval()),
            _ => None,
        }
    }

    /// One-line report printed after the terminal is restored
    pub fn summary(&self) -> Option<String> {
        match self.state.phase {
            Phase::NamingInput => None,
            Phase::Finished => Some(format!(
                "Finished: {} ({})",
                self.state.task_name,
                format_remaining(self.state.duration)
            )),
            Phase::Running | Phase::Paused => Some(format!(
                "Stopped: {} with {} left",
                self.state.task_name,
                format_remaining(self.state.remaining)
            )),
        }
    }
}

pub fn ui(app: &App, f: &mut Frame) {
    let view = View::new(&app.state, app.bindings()).cursor_visible(app.cursor_visible());
    f.render_widget(&view, f.area());
}

/// Draw, wait for the next merged event, handle it, repeat until terminated
pub fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E>,
) -> Result<()> {
    tracing::info!(
        duration = %format_remaining(app.state.duration),
        pause = %app.bindings().pause,
        quit = %app.bindings().quit_label(),
        "session opened"
    );

    loop {
        runner.set_redraw_interval(app.redraw_interval());
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            Step::Resize | Step::Redraw => {}
            Step::Failed(reason) => {
                tracing::error!(%reason, phase = %app.state.phase, "input lost");
                return Err(AppError::Terminal(io::Error::other(reason)));
            }
            Step::Session(event) => {
                let action = app.dispatch(event);
                if runner.apply(action) == Flow::Exit {
                    break;
                }
            }
        }
    }

    Ok(())
}
