use directories::ProjectDirs;
use std::path::PathBuf;

pub const APP_NAME: &str = "focus-timer";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join(format!("{}.log", APP_NAME)))
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
                proj_dirs
                    .data_local_dir()
                    .join(format!("{}.log", APP_NAME))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_is_named_after_the_app() {
        if let Some(path) = AppDirs::log_path() {
            assert_eq!(path.file_name().unwrap(), "focus-timer.log");
        }
    }
}
