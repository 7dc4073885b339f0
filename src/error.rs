//! Errors raised around the session: terminal setup, input, logging and
//! command line parsing. The session state machine itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// stdin is not attached to a terminal
    #[error("stdin must be a tty")]
    NotATty,

    /// Acquiring, drawing to, or restoring the terminal failed
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// A key binding given on the command line could not be parsed
    #[error("invalid key binding '{0}' (try e.g. 's', 'space', 'esc', 'ctrl+c')")]
    InvalidKey(String),

    /// The log file could not be set up
    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(AppError::NotATty.to_string(), "stdin must be a tty");
        assert!(AppError::InvalidKey("ctrl+".into())
            .to_string()
            .contains("'ctrl+'"));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "no device");
        assert_eq!(AppError::from(io).to_string(), "terminal error: no device");
    }
}
