//! Stress run orchestration
//!
//! The controller walks the whole flow once: query monitors, cut each
//! monitor's area into a grid, turn every cell into a launch command and
//! hand the batch to the worker pool.

use std::sync::Arc;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::config::{MAX_CELLS, StressConfig};
use crate::domain::grid::{GridCell, GridError};
use crate::domain::monitor::MonitorLayout;
use crate::launch::{
    CancelToken, CommandTemplate, DispatchError, DispatchSummary, LaunchCommand, Launcher, Rgb,
    dispatch,
};
use crate::platform::monitors::{DisplaySource, MonitorError};

/// Printed when the run is cut short by Ctrl+C
pub const INTERRUPT_MESSAGE: &str = "Program interrupted. Exiting gracefully...doesn't.";

/// Application errors that can occur during a run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("monitor query failed: {0}")]
    Monitor(#[from] MonitorError),
    #[error("cannot build grid for monitor {monitor_index}: {source}")]
    Grid {
        monitor_index: usize,
        #[source]
        source: GridError,
    },
    #[error("{monitors} monitors with a {rows}x{cols} grid exceed the limit of {limit} cells")]
    TooManyCells {
        monitors: usize,
        rows: u32,
        cols: u32,
        limit: usize,
    },
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl AppError {
    /// True when the run stopped because of a console interrupt
    pub fn is_interrupt(&self) -> bool {
        matches!(self, AppError::Dispatch(DispatchError::Interrupted { .. }))
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub monitors: usize,
    /// Launch commands built across all monitors
    pub planned: usize,
    pub dry_run: bool,
    pub summary: DispatchSummary,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

pub struct StressController {
    config: StressConfig,
    displays: Box<dyn DisplaySource>,
    launcher: Arc<dyn Launcher>,
    cancel: CancelToken,
}

impl StressController {
    pub fn new(
        config: StressConfig,
        displays: Box<dyn DisplaySource>,
        launcher: Arc<dyn Launcher>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            config,
            displays,
            launcher,
            cancel,
        }
    }

    /// Queries every monitor's DPI scale and working area
    ///
    /// A failed working-area query aborts the run; a failed DPI query does not.
    pub fn layouts(&self) -> Result<Vec<MonitorLayout>, AppError> {
        let monitors = self.displays.monitors()?;
        let mut layouts = Vec::with_capacity(monitors.len());

        for monitor in monitors {
            let working_area = self.displays.working_area(&monitor)?;
            let dpi_scale = self.displays.dpi_scale(&monitor);
            info!("DPI scaling for monitor {}: {}", monitor.name, dpi_scale);

            layouts.push(MonitorLayout::new(
                monitor,
                working_area,
                dpi_scale,
                self.config.area,
            ));
        }

        Ok(layouts)
    }

    /// Total cells across `monitors`, bounded by [`MAX_CELLS`]
    fn total_cells(&self, monitors: usize) -> Result<usize, AppError> {
        self.config
            .cells_per_monitor()
            .and_then(|per_monitor| per_monitor.checked_mul(monitors))
            .filter(|&total| total <= MAX_CELLS)
            .ok_or(AppError::TooManyCells {
                monitors,
                rows: self.config.rows,
                cols: self.config.cols,
                limit: MAX_CELLS,
            })
    }

    /// Cells of every monitor, monitor by monitor in row-major order
    ///
    /// Monitors whose normalized area is empty contribute no cells.
    pub fn cells(&self, layouts: &[MonitorLayout]) -> Result<Vec<GridCell>, AppError> {
        let mut all = Vec::with_capacity(self.total_cells(layouts.len())?);

        for layout in layouts {
            let cells = match layout.cells(self.config.rows, self.config.cols) {
                Ok(cells) => cells,
                Err(GridError::EmptyArea { w, h }) => {
                    warn!(
                        "Skipping monitor {} ({}): area is {}x{}",
                        layout.monitor.index, layout.monitor.name, w, h
                    );
                    continue;
                }
                Err(source) => {
                    return Err(AppError::Grid {
                        monitor_index: layout.monitor.index,
                        source,
                    });
                }
            };
            for cell in &cells {
                let r = cell.rect;
                info!(
                    "Grid cell (relative to monitor): x={}, y={}, width={}, height={}",
                    r.x, r.y, r.w, r.h
                );
            }
            all.extend(cells);
        }

        Ok(all)
    }

    /// Builds one launch command per cell, shuffled if configured
    pub fn plan(&self, layouts: &[MonitorLayout]) -> Result<Vec<LaunchCommand>, AppError> {
        let mut cells = self.cells(layouts)?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        if self.config.shuffle {
            cells.shuffle(&mut rng);
        }

        let template = CommandTemplate::from_config(&self.config);
        let commands = cells
            .into_iter()
            .map(|cell| {
                let r = cell.rect;
                info!(
                    "Queueing window at x={}, y={}, w={}, h={}, monitor={}",
                    r.x, r.y, r.w, r.h, cell.monitor_index
                );
                template.build(cell, Rgb::random(&mut rng))
            })
            .collect();

        Ok(commands)
    }

    pub fn run(&self) -> Result<RunReport, AppError> {
        let layouts = self.layouts()?;
        let commands = self.plan(&layouts)?;
        let planned = commands.len();

        if self.config.dry_run {
            for command in &commands {
                println!("{command}");
            }
            return Ok(RunReport {
                monitors: layouts.len(),
                planned,
                dry_run: true,
                summary: DispatchSummary::default(),
            });
        }

        let summary = dispatch(Arc::clone(&self.launcher), commands, &self.cancel)?;
        info!("Dispatch finished: {}", summary);

        Ok(RunReport {
            monitors: layouts.len(),
            planned,
            dry_run: false,
            summary,
        })
    }
}
