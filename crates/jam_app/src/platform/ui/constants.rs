use std::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_millis(250);
pub const INPUT_POLL: Duration = Duration::from_millis(50);

pub const APP_TITLE: &str = "Harmonic Jam";
pub const LIST_WIDTH: u16 = 32;
pub const DIALOG_WIDTH: u16 = 56;
pub const TOAST_WIDTH: u16 = 44;

pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub const SKELETON: &str = "░░░░░░░░░░░░░░░░";
