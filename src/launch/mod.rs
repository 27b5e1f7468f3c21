//! Turning grid cells into running processes

pub mod command;
pub mod pool;
pub mod process;

pub use command::{CommandTemplate, LaunchCommand, Rgb};
pub use pool::{CancelToken, DispatchError, DispatchSummary, dispatch};
pub use process::{LaunchError, Launcher, ProcessLauncher};
