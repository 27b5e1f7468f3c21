//! Spawning the companion tool

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::launch::command::LaunchCommand;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to run {executable}: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{executable} exited with {}", exit_code_text(.code))]
    ExitStatus {
        executable: String,
        code: Option<i32>,
    },
    #[error("launch worker exited without reporting a result")]
    WorkerLost,
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code".to_string(),
    }
}

/// Runs one launch command to completion
///
/// Implementations block until the launched work is finished. They are
/// called concurrently from the worker pool.
pub trait Launcher: Send + Sync {
    fn launch(&self, command: &LaunchCommand) -> Result<(), LaunchError>;
}

/// Runs an external executable with the command string as its only argument
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    executable: PathBuf,
}

impl ProcessLauncher {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        let executable = self.executable.display().to_string();
        let status = Command::new(&self.executable)
            .arg(command.as_str())
            .status()
            .map_err(|source| LaunchError::Spawn {
                executable: executable.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::ExitStatus {
                executable,
                code: status.code(),
            })
        }
    }
}
