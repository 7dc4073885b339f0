use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::AppError;

/// A single key chord, e.g. `s` or `ctrl+c`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match (self.code, key.code) {
            // terminals report shifted letters as the uppercase char, sometimes with SHIFT set
            (KeyCode::Char(want), KeyCode::Char(got)) => {
                let mods = key.modifiers.difference(KeyModifiers::SHIFT);
                want == got && mods == self.modifiers.difference(KeyModifiers::SHIFT)
            }
            (want, got) => want == got && key.modifiers == self.modifiers,
        }
    }

    /// Short label for the controls hint
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::F(n) => format!("f{}", n),
            other => format!("{:?}", other).to_lowercase(),
        };

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("ctrl+{}", key)
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            format!("alt+{}", key)
        } else {
            key
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for KeyBinding {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidKey(s.to_string());
        let lowered = s.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(invalid());
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut rest = lowered.as_str();
        loop {
            if let Some(r) = rest.strip_prefix("ctrl+") {
                modifiers |= KeyModifiers::CONTROL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("alt+") {
                modifiers |= KeyModifiers::ALT;
                rest = r;
            } else {
                break;
            }
        }

        let code = match rest {
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            f if f.len() > 1 && f.starts_with('f') => {
                let n = f[1..].parse::<u8>().map_err(|_| invalid())?;
                if !(1..=12).contains(&n) {
                    return Err(invalid());
                }
                KeyCode::F(n)
            }
            single => {
                let mut chars = single.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(invalid()),
                }
            }
        };

        // Enter submits the task name, so it can never be a command key
        if code == KeyCode::Enter && modifiers.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(code, modifiers))
    }
}

/// The logical commands the session understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub pause: KeyBinding,
    pub quit: Vec<KeyBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            pause: KeyBinding::plain('s'),
            quit: vec![
                KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE),
            ],
        }
    }
}

impl KeyBindings {
    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        self.quit.iter().any(|b| b.matches(key))
    }

    pub fn is_pause(&self, key: &KeyEvent) -> bool {
        self.pause.matches(key)
    }

    pub fn quit_label(&self) -> String {
        self.quit
            .iter()
            .map(KeyBinding::label)
            .collect::<Vec<_>>()
            .join("/")
    }
}
