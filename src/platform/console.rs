//! Console interrupt handling
//!
//! Ctrl+C (and Ctrl+Break) flip the process-wide [`CancelToken`] instead of
//! killing the process outright. The dispatcher notices the flag, stops
//! waiting and hands control back to `main`, which prints the interrupt
//! message and exits. Child processes that were already spawned are left
//! running.

use crate::launch::pool::CancelToken;
use once_cell::sync::OnceCell;
use thiserror::Error;

static INTERRUPT_TOKEN: OnceCell<CancelToken> = OnceCell::new();

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("interrupt handler already installed")]
    AlreadyInstalled,
    #[error("failed to install console control handler: {0}")]
    InstallFailed(String),
}

/// Routes console interrupts to `token`
///
/// Can only be called once per process.
pub fn install_interrupt_handler(token: CancelToken) -> Result<(), ConsoleError> {
    INTERRUPT_TOKEN
        .set(token)
        .map_err(|_| ConsoleError::AlreadyInstalled)?;
    register()
}

fn on_interrupt() -> bool {
    match INTERRUPT_TOKEN.get() {
        Some(token) => {
            log::debug!("console interrupt received, cancelling pending launches");
            token.cancel();
            true
        }
        None => false,
    }
}

#[cfg(windows)]
fn register() -> Result<(), ConsoleError> {
    use windows::Win32::Foundation::{BOOL, FALSE, TRUE};
    use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};

    unsafe extern "system" fn console_ctrl_handler(ctrl_type: u32) -> BOOL {
        if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT) && on_interrupt() {
            TRUE
        } else {
            FALSE
        }
    }

    unsafe { SetConsoleCtrlHandler(Some(console_ctrl_handler), TRUE) }
        .map_err(|err| ConsoleError::InstallFailed(err.to_string()))
}

// Without a handler the default SIGINT disposition terminates the process,
// which still leaves spawned children running.
#[cfg(not(windows))]
fn register() -> Result<(), ConsoleError> {
    log::debug!("console interrupt routing is only available on Windows");
    Ok(())
}
