//! Monitor descriptions and DPI normalization
//!
//! The platform layer fills in [`Monitor`]s, working areas and DPI values.
//! Everything here is plain arithmetic on those values.

use crate::domain::core::Rect;
use crate::domain::grid::{Grid, GridCell, GridError};
use serde::{Deserialize, Serialize};

/// Baseline DPI that corresponds to a 100% scale factor
pub const BASELINE_DPI: u32 = 96;

/// A connected display as reported by the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    /// Zero-based enumeration index
    pub index: usize,
    /// Device name, e.g. `\\.\DISPLAY1`
    pub name: String,
    /// Full monitor rectangle on the virtual desktop
    pub bounds: Rect,
}

/// Which rectangle of a monitor gets partitioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AreaSource {
    /// Monitor rectangle minus taskbar and other reserved regions
    #[default]
    WorkingArea,
    /// Whole monitor rectangle
    FullMonitor,
}

/// Converts a raw DPI reading into a scale factor
///
/// Zero is what a failed query leaves behind and maps to 1.0, so the result
/// is always positive.
pub fn scale_from_dpi(dpi: u32) -> f64 {
    if dpi == 0 {
        return 1.0;
    }
    f64::from(dpi) / f64::from(BASELINE_DPI)
}

/// A monitor together with everything needed to cut a grid from it
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorLayout {
    pub monitor: Monitor,
    pub working_area: Rect,
    pub dpi_scale: f64,
    /// Partitioned rectangle divided by `dpi_scale`
    pub normalized_area: Rect,
}

impl MonitorLayout {
    pub fn new(monitor: Monitor, working_area: Rect, dpi_scale: f64, source: AreaSource) -> Self {
        let dpi_scale = if dpi_scale.is_finite() && dpi_scale > 0.0 {
            dpi_scale
        } else {
            1.0
        };

        let raw = match source {
            AreaSource::WorkingArea => working_area,
            AreaSource::FullMonitor => monitor.bounds,
        };

        Self {
            normalized_area: raw.scaled_down(dpi_scale),
            monitor,
            working_area,
            dpi_scale,
        }
    }

    pub fn grid(&self, rows: u32, cols: u32) -> Result<Grid, GridError> {
        Grid::new(rows, cols, self.normalized_area)
    }

    /// Grid cells for this monitor in row-major order
    pub fn cells(&self, rows: u32, cols: u32) -> Result<Vec<GridCell>, GridError> {
        let grid = self.grid(rows, cols)?;
        Ok(grid
            .cells()
            .map(|rect| GridCell {
                monitor_index: self.monitor.index,
                rect,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(index: usize, bounds: Rect) -> Monitor {
        Monitor {
            index,
            name: format!("\\\\.\\DISPLAY{}", index + 1),
            bounds,
        }
    }

    #[test]
    fn scale_from_common_dpi_values() {
        assert_eq!(scale_from_dpi(96), 1.0);
        assert_eq!(scale_from_dpi(120), 1.25);
        assert_eq!(scale_from_dpi(144), 1.5);
        assert_eq!(scale_from_dpi(192), 2.0);
    }

    #[test]
    fn failed_dpi_query_means_unscaled() {
        assert_eq!(scale_from_dpi(0), 1.0);
    }

    #[test]
    fn layout_rejects_non_positive_scale() {
        let m = monitor(0, Rect::new(0, 0, 1920, 1080));
        let work = Rect::new(0, 0, 1920, 1040);
        for bad in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let layout = MonitorLayout::new(m.clone(), work, bad, AreaSource::WorkingArea);
            assert_eq!(layout.dpi_scale, 1.0);
            assert_eq!(layout.normalized_area, work);
        }
    }

    #[test]
    fn layout_normalizes_working_area() {
        let m = monitor(1, Rect::new(1920, 0, 2560, 1440));
        let work = Rect::from_edges(1920, 0, 4480, 1392);
        let layout = MonitorLayout::new(m, work, 1.25, AreaSource::WorkingArea);
        assert_eq!(layout.normalized_area, Rect::new(1536, 0, 2048, 1113));
    }

    #[test]
    fn layout_can_use_full_monitor() {
        let m = monitor(0, Rect::new(0, 0, 1920, 1080));
        let layout = MonitorLayout::new(m, Rect::new(0, 0, 1920, 1040), 1.0, AreaSource::FullMonitor);
        assert_eq!(layout.normalized_area, Rect::new(0, 0, 1920, 1080));
    }

    #[test]
    fn cells_carry_monitor_index() {
        let m = monitor(2, Rect::new(0, 0, 1000, 800));
        let layout = MonitorLayout::new(m, Rect::new(0, 0, 1000, 800), 1.0, AreaSource::WorkingArea);
        let cells = layout.cells(2, 2).unwrap();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|c| c.monitor_index == 2));
        assert!(cells.iter().all(|c| (c.rect.w, c.rect.h) == (500, 400)));
    }
}
