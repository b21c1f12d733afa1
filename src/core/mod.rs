//! Process-wide runtime state.

mod state;

pub use state::{is_shutdown, register_server, request_shutdown, setup_shutdown_handler};

use std::path::PathBuf;

/// Resolved serve configuration, built once in main and handed to the
/// request handlers by Arc. There is no global config cell.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Presentation root directory (watched recursively).
    pub root: PathBuf,
    /// Steps file path (absolute, inside the root).
    pub steps_file: PathBuf,
    /// Dev mode: show the step counter overlay.
    pub dev_mode: bool,
}

impl ServeConfig {
    pub fn new(root: PathBuf, steps_file: &std::path::Path, dev_mode: bool) -> Self {
        let steps_file = root.join(steps_file);
        Self {
            root,
            steps_file,
            dev_mode,
        }
    }
}
