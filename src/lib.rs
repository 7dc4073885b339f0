// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds argument parsing and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod text_input;
pub mod ui;
pub mod util;
