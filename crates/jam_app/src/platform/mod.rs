mod app;
mod effects;
pub mod logging;
mod persistence;
mod ui;

use std::path::Path;

use jam_core::ViewLocation;

pub use app::{run_app, AppConfig};

/// Location to open when none was given on the command line.
pub fn restore_location(state_file: &Path) -> ViewLocation {
    persistence::load_location(state_file)
}
