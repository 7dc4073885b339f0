use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use focus_timer::{
    app::{start_tui, App},
    app_dirs::AppDirs,
    error::{AppError, Result},
    keymap::{KeyBinding, KeyBindings},
    logging::init_file_logging,
    runtime::{CrosstermEventSource, Runner},
    session::{Session, SessionState},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdin},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

/// single-screen focus session countdown
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Name a task, then focus on it while a countdown runs. Pause and resume at any time; the session ends when the time is up."
)]
pub struct Cli {
    /// minutes to count down from
    #[clap(short = 'm', long, default_value_t = 10)]
    minutes: u64,

    /// seconds added on top of --minutes
    #[clap(short = 's', long, default_value_t = 0)]
    seconds: u64,

    /// pre-fill the task name (Enter still starts the session)
    #[clap(short = 't', long)]
    task: Option<String>,

    /// key that pauses and resumes the countdown
    #[clap(long, default_value = "s", value_parser = parse_key)]
    pause_key: KeyBinding,

    /// key that quits; repeat to bind several (default: ctrl+c and esc)
    #[clap(long = "quit-key", value_parser = parse_key)]
    quit_keys: Vec<KeyBinding>,

    /// write a log file under the local state directory
    #[clap(long)]
    log: bool,

    /// write the log file to this path instead (implies --log)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log filter, e.g. "debug" or "focus_timer=trace"
    #[clap(long, default_value = "info")]
    log_level: String,
}

fn parse_key(s: &str) -> std::result::Result<KeyBinding, String> {
    s.parse::<KeyBinding>().map_err(|e| e.to_string())
}

impl Cli {
    fn duration(&self) -> Duration {
        Duration::from_secs(self.minutes.saturating_mul(60).saturating_add(self.seconds))
    }

    fn key_bindings(&self) -> std::result::Result<KeyBindings, String> {
        let mut bindings = KeyBindings {
            pause: self.pause_key,
            ..KeyBindings::default()
        };
        if !self.quit_keys.is_empty() {
            bindings.quit = self.quit_keys.clone();
        }

        if bindings.quit.contains(&bindings.pause) {
            return Err(format!(
                "'{}' cannot be both the pause key and a quit key",
                bindings.pause
            ));
        }
        Ok(bindings)
    }

    fn log_path(&self) -> Option<PathBuf> {
        match (&self.log_file, self.log) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => AppDirs::log_path(),
            (None, false) => None,
        }
    }

    fn initial_state(&self) -> SessionState {
        let state = SessionState::new(self.duration());
        match &self.task {
            Some(task) => state.with_task_hint(task),
            None => state,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, AppError::NotATty).exit();
    }

    let bindings = match cli.key_bindings() {
        Ok(b) => b,
        Err(msg) => Cli::command().error(ErrorKind::ArgumentConflict, msg).exit(),
    };

    let _log_guard = match cli.log_path() {
        Some(path) => match init_file_logging(&path, &cli.log_level) {
            Ok(guard) => Some(guard),
            Err(err) => {
                eprintln!("Error: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut app = App::new(Session::new(bindings), cli.initial_state());

    match run(&mut app) {
        Ok(()) => {
            if let Some(line) = app.summary() {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "session aborted");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }
    install_panic_hook();

    let result = (|| -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        let mut runner = Runner::new(CrosstermEventSource::new());
        start_tui(&mut terminal, app, &mut runner)
    })();

    let restored = restore_terminal();
    if let Err(err) = &restored {
        tracing::error!(%err, "terminal restore failed");
    }
    result?;
    restored
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        tracing::error!(%info, "panic");
        default_panic(info);
    }));
}
