//! Fire-and-wait worker pool for launch commands
//!
//! All commands are queued on a rayon pool with one worker per command, so
//! every launch runs concurrently. Results come back over one-shot channels
//! and are collected in submission order. A slow launch therefore delays
//! reporting but not the other workers.
//!
//! Cancellation is cooperative. Jobs that have not started when the
//! [`CancelToken`] fires are skipped. Jobs already inside
//! [`Launcher::launch`] run to completion, and nothing kills the processes
//! they started.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, error, info, warn};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

use crate::launch::command::LaunchCommand;
use crate::launch::process::{LaunchError, Launcher};

/// How often a blocked wait re-checks the cancel flag
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened to a single job
#[derive(Debug)]
pub enum JobOutcome {
    Completed,
    Failed(LaunchError),
    /// Cancelled before the launch started
    Skipped,
}

/// Tally of job outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub submitted: usize,
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DispatchSummary {
    fn record(&mut self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Completed => self.completed += 1,
            JobOutcome::Failed(_) => self.failed += 1,
            JobOutcome::Skipped => self.skipped += 1,
        }
    }
}

impl fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} launched: {} completed, {} failed, {} skipped",
            self.submitted, self.completed, self.failed, self.skipped
        )
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to build worker pool with {workers} threads: {source}")]
    PoolBuild {
        workers: usize,
        #[source]
        source: ThreadPoolBuildError,
    },
    #[error("interrupted after {summary}")]
    Interrupted { summary: DispatchSummary },
}

struct Ticket {
    command_index: usize,
    receiver: Receiver<JobOutcome>,
}

/// Runs every command on its own worker and waits for all of them
///
/// Returns [`DispatchError::Interrupted`] as soon as `cancel` fires while
/// waiting. Every job whose result was not collected by then counts as
/// skipped. The pool is dropped without joining, so running launches keep
/// going in the background.
pub fn dispatch(
    launcher: Arc<dyn Launcher>,
    commands: Vec<LaunchCommand>,
    cancel: &CancelToken,
) -> Result<DispatchSummary, DispatchError> {
    let mut summary = DispatchSummary {
        submitted: commands.len(),
        ..Default::default()
    };

    if commands.is_empty() {
        return Ok(summary);
    }

    let pool = build_pool(commands.len())?;
    let tickets: Vec<Ticket> = commands
        .into_iter()
        .enumerate()
        .map(|(command_index, command)| submit(&pool, command_index, command, &launcher, cancel))
        .collect();

    info!("Submitted {} launches", tickets.len());

    let total = tickets.len();
    for (collected, ticket) in tickets.into_iter().enumerate() {
        let Some(outcome) = wait_for(&ticket, cancel) else {
            summary.skipped += total - collected;
            return Err(DispatchError::Interrupted { summary });
        };
        if let JobOutcome::Failed(err) = &outcome {
            warn!("Launch {} failed: {}", ticket.command_index, err);
        }
        summary.record(&outcome);
    }

    Ok(summary)
}

fn build_pool(workers: usize) -> Result<ThreadPool, DispatchError> {
    ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("launch-worker-{i}"))
        .build()
        .map_err(|source| DispatchError::PoolBuild { workers, source })
}

fn submit(
    pool: &ThreadPool,
    command_index: usize,
    command: LaunchCommand,
    launcher: &Arc<dyn Launcher>,
    cancel: &CancelToken,
) -> Ticket {
    let (sender, receiver) = crossbeam_channel::bounded(1);
    let launcher = Arc::clone(launcher);
    let cancel = cancel.clone();

    pool.spawn(move || {
        let outcome = if cancel.is_cancelled() {
            JobOutcome::Skipped
        } else {
            debug!("Launching {}", command);
            match launcher.launch(&command) {
                Ok(()) => JobOutcome::Completed,
                Err(err) => JobOutcome::Failed(err),
            }
        };
        // The dispatcher may have stopped listening after an interrupt
        let _ = sender.send(outcome);
    });

    Ticket {
        command_index,
        receiver,
    }
}

/// Blocks until the job reports back; `None` once cancelled
fn wait_for(ticket: &Ticket, cancel: &CancelToken) -> Option<JobOutcome> {
    loop {
        if cancel.is_cancelled() {
            return None;
        }
        match ticket.receiver.recv_timeout(CANCEL_POLL_INTERVAL) {
            Ok(outcome) => return Some(outcome),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                // The job panicked before sending anything
                error!("Launch {} worker exited without a result", ticket.command_index);
                return Some(JobOutcome::Failed(LaunchError::WorkerLost));
            }
        }
    }
}
