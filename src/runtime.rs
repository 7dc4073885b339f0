use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::session::{Action, Event};

/// Raw input coming from the terminal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
    /// The terminal could not be read; nothing else follows on the channel
    Failed { kind: io::ErrorKind, message: String },
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<InputEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => InputEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::error!(%err, "terminal input read failed");
                    let _ = tx.send(InputEvent::Failed {
                        kind: err.kind(),
                        message: err.to_string(),
                    });
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<InputEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// One item out of the merged stream
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Session(Event),
    Resize,
    /// Nothing happened within the redraw cadence
    Redraw,
    /// Input is gone for good; the session cannot continue
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Merges keyboard input and the session's one-shot tick into a single
/// ordered stream.
///
/// There is exactly one pending-tick slot. `ScheduleTick` overwrites it, so
/// at most one tick chain can exist no matter how often the session asks.
pub struct Runner<E: EventSource> {
    event_source: E,
    next_tick: Option<Instant>,
    redraw_every: Option<Duration>,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self {
            event_source,
            next_tick: None,
            redraw_every: None,
        }
    }

    /// Wake up at least this often even without input, e.g. for a blinking cursor
    pub fn set_redraw_interval(&mut self, every: Option<Duration>) {
        self.redraw_every = every;
    }

    pub fn tick_pending(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn apply(&mut self, action: Option<Action>) -> Flow {
        match action {
            Some(Action::ScheduleTick(delay)) => {
                self.next_tick = Some(Instant::now() + delay);
                tracing::trace!(?delay, "tick scheduled");
                Flow::Continue
            }
            Some(Action::Terminate) => {
                self.next_tick = None;
                Flow::Exit
            }
            None => Flow::Continue,
        }
    }

    /// Blocks until the pending tick is due, input arrives, or the redraw
    /// cadence elapses, and returns whichever came first
    pub fn step(&mut self) -> Step {
        loop {
            let now = Instant::now();
            if let Some(deadline) = self.next_tick {
                if deadline <= now {
                    self.next_tick = None;
                    return Step::Session(Event::Tick);
                }
            }

            let until_tick = self
                .next_tick
                .map(|deadline| deadline.saturating_duration_since(now));
            let timeout = match (until_tick, self.redraw_every) {
                (Some(t), Some(r)) => t.min(r),
                (Some(t), None) => t,
                (None, Some(r)) => r,
                // nothing scheduled: wait for input
                (None, None) => Duration::from_secs(3600),
            };

            match self.event_source.recv_timeout(timeout) {
                Ok(InputEvent::Key(key)) => return Step::Session(Event::KeyPress(key)),
                Ok(InputEvent::Resize) => return Step::Resize,
                Ok(InputEvent::Failed { kind, message }) => {
                    self.next_tick = None;
                    return Step::Failed(format!("input device failed ({:?}): {}", kind, message));
                }
                Err(RecvTimeoutError::Timeout) => {
                    if self.next_tick.is_some_and(|d| d <= Instant::now()) {
                        continue;
                    }
                    if self.redraw_every.is_some() {
                        return Step::Redraw;
                    }
                }
                // the sender went away without reporting an error
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("input source disconnected");
                    self.next_tick = None;
                    return Step::Session(Event::Quit);
                }
            }
        }
    }
}
